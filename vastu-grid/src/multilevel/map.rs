//! Multi-level grid map and its spatial intersection queries.

use std::ops::{Deref, DerefMut};

use log::trace;

use crate::core::{
    AlignedBox3, GridIndex, GridSize, LocalMapData, LocalMapType, Point3, Resolution,
    SharedMapData,
};
use crate::error::Result;
use crate::grid::{GridAccess, GridMap};

use super::level_list::LevelList;
use super::patch::VerticalExtent;
use super::view::MultiLevelView;

/// Matched patches with the index of the cell holding them.
pub type PatchVector<'a, P> = Vec<(GridIndex, &'a P)>;

/// Dense grid whose cells hold an ordered list of patches.
///
/// Dereferences to the underlying `GridMap<LevelList<P>>` for cell access,
/// coordinate conversion and the [`GridAccess`] operations.
#[derive(Clone, Debug)]
pub struct MultiLevelGridMap<P> {
    grid: GridMap<LevelList<P>>,
}

impl<P: Clone> MultiLevelGridMap<P> {
    /// Create a map with empty cells and a private metadata block.
    pub fn new(num_cells: GridSize, resolution: Resolution) -> Self {
        Self::with_shared_data(
            num_cells,
            resolution,
            SharedMapData::for_type(LocalMapType::MultiLevelGridMap),
        )
    }

    /// Create a map co-registered with other holders of `map_data`.
    pub fn with_shared_data(
        num_cells: GridSize,
        resolution: Resolution,
        map_data: SharedMapData,
    ) -> Self {
        Self {
            grid: GridMap::with_shared_data(num_cells, resolution, LevelList::new(), map_data),
        }
    }

    /// Wrap an existing grid of level lists.
    pub fn from_grid(grid: GridMap<LevelList<P>>) -> Self {
        Self { grid }
    }

    /// Unwrap into the underlying grid.
    pub fn into_grid(self) -> GridMap<LevelList<P>> {
        self.grid
    }

    /// Total number of patches over all cells.
    pub fn patch_count(&self) -> usize {
        self.grid.iter().map(LevelList::len).sum()
    }

    /// View of every patch in the map, same size and metadata as the source.
    pub fn view(&self) -> MultiLevelView<'_, P> {
        let mut view = MultiLevelView::new(
            self.grid.num_cells(),
            self.grid.resolution(),
            GridIndex::ZERO,
            self.grid.local_map_data().clone(),
        );
        for (index, list) in self.grid.indexed_iter() {
            if let Some(target) = view.get_mut(index) {
                for patch in list {
                    target.push_ordered(patch);
                }
            }
        }
        view
    }

    /// Copy into a map of a convertible patch type, re-sorting each cell.
    pub fn convert<Q>(&self) -> MultiLevelGridMap<Q>
    where
        Q: From<P> + PartialOrd + Clone,
    {
        MultiLevelGridMap {
            grid: self
                .grid
                .map_cells(|list| list.iter().cloned().map(Q::from).collect()),
        }
    }
}

impl<P: Clone + PartialOrd> MultiLevelGridMap<P> {
    /// Insert a patch into the cell at `index`, keeping the cell's order.
    pub fn insert_patch(&mut self, index: GridIndex, patch: P) -> Result<()> {
        self.grid.at_mut(index)?.insert(patch);
        Ok(())
    }
}

impl<P: Clone + VerticalExtent> MultiLevelGridMap<P> {
    /// All patches intersecting `bx`, with their cell indices.
    ///
    /// `bx` is in local grid coordinates (meters from the corner of cell
    /// (0, 0)). Cells from `floor(min / res)` to `floor(max / res)`
    /// inclusive are scanned; the part of that rectangle outside the grid is
    /// ignored. A patch matches when its vertical extent overlaps
    /// `[bx.min.z, bx.max.z]` (closed intervals). Results follow row-major
    /// cell order and level-list order within a cell.
    pub fn intersect_aabb(&self, bx: &AlignedBox3) -> PatchVector<'_, P> {
        let mut matches = Vec::new();
        self.intersect_aabb_with(bx, |index, patch| {
            matches.push((index, patch));
            false
        });
        matches
    }

    /// Same scan as [`intersect_aabb`](Self::intersect_aabb), calling
    /// `callback` per matching patch instead of collecting.
    ///
    /// The scan stops as soon as `callback` returns `true`. Returns whether
    /// the scan was aborted that way.
    pub fn intersect_aabb_with<'a, F>(&'a self, bx: &AlignedBox3, mut callback: F) -> bool
    where
        F: FnMut(GridIndex, &'a P) -> bool,
    {
        let Some((min_idx, max_idx)) = self.clamped_rect(bx) else {
            trace!("[MultiLevelGridMap] AABB query outside grid");
            return false;
        };

        let (min_z, max_z) = (bx.min.z, bx.max.z);
        let mut matched = 0usize;
        for y in min_idx.y..=max_idx.y {
            for x in min_idx.x..=max_idx.x {
                let index = GridIndex::new(x, y);
                let Some(list) = self.grid.get(index) else {
                    continue;
                };
                for patch in list {
                    if !patch.overlaps_z(min_z, max_z) {
                        continue;
                    }
                    matched += 1;
                    if callback(index, patch) {
                        trace!(
                            "[MultiLevelGridMap] AABB query aborted at {} after {} matches",
                            index,
                            matched
                        );
                        return true;
                    }
                }
            }
        }

        trace!(
            "[MultiLevelGridMap] AABB query scanned {}..={}, {} matches",
            min_idx,
            max_idx,
            matched
        );
        false
    }

    /// View of the patches intersecting `bx`.
    ///
    /// See [`intersect_cuboid_counted`](Self::intersect_cuboid_counted).
    pub fn intersect_cuboid(&self, bx: &AlignedBox3) -> MultiLevelView<'_, P> {
        self.intersect_cuboid_counted(bx).0
    }

    /// View of the patches intersecting `bx`, and the number of references
    /// placed in it.
    ///
    /// Both corners of `bx` must lie inside the grid. Otherwise, or when the
    /// box is empty (inverted or NaN on any axis), the result is an empty
    /// (0x0) view and a count of 0. The view spans the cells from the min
    /// corner's cell to the max corner's cell inclusive; view index `i` maps
    /// to source index `i + view.origin()`.
    ///
    /// # Panics
    ///
    /// The view's metadata is copied from the source block, so this panics
    /// if a caller holds a [`SharedMapData::borrow_mut`] guard on it.
    pub fn intersect_cuboid_counted(&self, bx: &AlignedBox3) -> (MultiLevelView<'_, P>, usize) {
        if bx.is_empty() {
            return (self.empty_view(), 0);
        }
        let corners = (
            self.grid.to_grid(bx.min.xy()),
            self.grid.to_grid(bx.max.xy()),
        );
        let (Some(min_idx), Some(max_idx)) = corners else {
            trace!("[MultiLevelGridMap] cuboid corner outside grid, empty view");
            return (self.empty_view(), 0);
        };
        if !(min_idx <= max_idx) {
            return (self.empty_view(), 0);
        }

        let span = max_idx - min_idx;
        let num_cells = GridSize::new(span.x as usize + 1, span.y as usize + 1);
        let mut view = MultiLevelView::new(
            num_cells,
            self.grid.resolution(),
            min_idx,
            self.view_data(min_idx),
        );

        let (min_z, max_z) = (bx.min.z, bx.max.z);
        let mut count = 0usize;
        for y in min_idx.y..=max_idx.y {
            for x in min_idx.x..=max_idx.x {
                let index = GridIndex::new(x, y);
                let (Some(list), Some(target)) =
                    (self.grid.get(index), view.get_mut(index - min_idx))
                else {
                    continue;
                };
                for patch in list.overlapping(min_z, max_z) {
                    target.push_ordered(patch);
                    count += 1;
                }
            }
        }

        trace!(
            "[MultiLevelGridMap] cuboid view {} at {}, {} intersections",
            num_cells,
            min_idx,
            count
        );
        (view, count)
    }

    /// Index rectangle covered by `bx`, clamped to the grid.
    fn clamped_rect(&self, bx: &AlignedBox3) -> Option<(GridIndex, GridIndex)> {
        let n = self.grid.num_cells();
        if n.is_empty() || bx.is_empty() {
            return None;
        }
        let last = GridIndex::new(n.width as i32 - 1, n.height as i32 - 1);
        let lo = self.grid.unchecked_index(bx.min.xy()).max(GridIndex::ZERO);
        let hi = self.grid.unchecked_index(bx.max.xy()).min(last);
        (lo <= hi).then_some((lo, hi))
    }

    fn empty_view(&self) -> MultiLevelView<'_, P> {
        MultiLevelView::empty(self.grid.resolution(), self.view_data(GridIndex::ZERO))
    }

    /// Private metadata for a view whose cell (0, 0) is source cell `origin`.
    fn view_data(&self, origin: GridIndex) -> SharedMapData {
        let source = self.grid.local_map_data().borrow();
        let res = self.grid.resolution();
        let shift = Point3::new(origin.x as f64 * res.x, origin.y as f64 * res.y, 0.0);
        SharedMapData::new(LocalMapData {
            id: source.id.clone(),
            frame_id: source.frame_id.clone(),
            map_type: LocalMapType::MultiLevelGridMap,
            offset: source.offset + shift,
            timestamp_us: source.timestamp_us,
        })
    }
}

impl<P> Deref for MultiLevelGridMap<P> {
    type Target = GridMap<LevelList<P>>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl<P> DerefMut for MultiLevelGridMap<P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;
    use crate::multilevel::HeightPatch;

    fn map_with_two_patches() -> MultiLevelGridMap<HeightPatch> {
        let mut map = MultiLevelGridMap::new(GridSize::new(10, 10), Resolution::uniform(0.1));
        map.insert_patch(GridIndex::new(0, 0), HeightPatch::new(0.0, 1.0))
            .unwrap();
        map.insert_patch(GridIndex::new(0, 0), HeightPatch::new(2.0, 3.0))
            .unwrap();
        map
    }

    fn z_box(min_z: f64, max_z: f64) -> AlignedBox3 {
        AlignedBox3::new(Point3::new(0.0, 0.0, min_z), Point3::new(0.05, 0.05, max_z))
    }

    #[test]
    fn test_metadata_type() {
        let map = map_with_two_patches();
        assert_eq!(
            map.local_map_data().borrow().map_type,
            LocalMapType::MultiLevelGridMap
        );
        assert_eq!(map.patch_count(), 2);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut map = map_with_two_patches();
        assert!(map.insert_patch(GridIndex::new(10, 0), HeightPatch::at(0.0)).is_err());
        assert_eq!(map.patch_count(), 2);
    }

    #[test]
    fn test_aabb_both_patches() {
        let map = map_with_two_patches();
        let hits = map.intersect_aabb(&z_box(0.5, 2.5));
        assert_eq!(hits.len(), 2);
        assert_eq!(*hits[0].1, HeightPatch::new(0.0, 1.0));
        assert_eq!(*hits[1].1, HeightPatch::new(2.0, 3.0));
        assert!(hits.iter().all(|(i, _)| *i == GridIndex::ZERO));
    }

    #[test]
    fn test_aabb_gap_between_patches() {
        let map = map_with_two_patches();
        assert!(map.intersect_aabb(&z_box(1.5, 1.9)).is_empty());
    }

    #[test]
    fn test_aabb_degenerate_z_touching() {
        let map = map_with_two_patches();
        let hits = map.intersect_aabb(&z_box(1.0, 1.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(*hits[0].1, HeightPatch::new(0.0, 1.0));
    }

    #[test]
    fn test_aabb_partially_outside_is_clamped() {
        let mut map = map_with_two_patches();
        map.insert_patch(GridIndex::new(9, 9), HeightPatch::new(0.0, 0.1))
            .unwrap();

        let bx = AlignedBox3::new(Point3::new(-5.0, -5.0, -1.0), Point3::new(50.0, 50.0, 5.0));
        let hits = map.intersect_aabb(&bx);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[2].0, GridIndex::new(9, 9));
    }

    #[test]
    fn test_aabb_fully_outside() {
        let map = map_with_two_patches();
        let bx = AlignedBox3::new(Point3::new(2.0, 2.0, -10.0), Point3::new(3.0, 3.0, 10.0));
        assert!(map.intersect_aabb(&bx).is_empty());

        let bx = AlignedBox3::new(Point3::new(-3.0, 0.0, -10.0), Point3::new(-2.0, 1.0, 10.0));
        assert!(map.intersect_aabb(&bx).is_empty());
    }

    #[test]
    fn test_aabb_callback_aborts() {
        let mut map = MultiLevelGridMap::new(GridSize::new(4, 4), Resolution::uniform(1.0));
        for x in 0..4 {
            map.insert_patch(GridIndex::new(x, 1), HeightPatch::new(0.0, 1.0))
                .unwrap();
        }
        let bx = AlignedBox3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.5, 3.5, 1.0));

        let mut calls = 0;
        let aborted = map.intersect_aabb_with(&bx, |_, _| {
            calls += 1;
            true
        });
        assert!(aborted);
        assert_eq!(calls, 1);

        let mut calls = 0;
        let aborted = map.intersect_aabb_with(&bx, |_, _| {
            calls += 1;
            calls == 3
        });
        assert!(aborted);
        assert_eq!(calls, 3);

        let mut calls = 0;
        assert!(!map.intersect_aabb_with(&bx, |_, _| {
            calls += 1;
            false
        }));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_cuboid_view() {
        let mut map = map_with_two_patches();
        map.insert_patch(GridIndex::new(3, 2), HeightPatch::new(0.5, 0.6))
            .unwrap();
        map.insert_patch(GridIndex::new(5, 5), HeightPatch::new(0.5, 0.6))
            .unwrap();

        let bx = AlignedBox3::new(Point3::new(0.15, 0.15, 0.0), Point3::new(0.35, 0.45, 1.0));
        let (view, count) = map.intersect_cuboid_counted(&bx);

        assert_eq!(view.origin(), GridIndex::new(1, 1));
        assert_eq!(view.num_cells(), GridSize::new(3, 4));
        assert_eq!(count, 1);
        assert_eq!(view.reference_count(), 1);

        let list = view.at(GridIndex::new(2, 1)).unwrap();
        assert_eq!(list.len(), 1);
        assert!(std::ptr::eq(
            list.as_slice()[0],
            &map.at(GridIndex::new(3, 2)).unwrap().as_slice()[0]
        ));
        assert_eq!(view.to_source(GridIndex::new(2, 1)), GridIndex::new(3, 2));
    }

    #[test]
    fn test_box_max_on_cell_boundary_includes_next_cell() {
        let mut map = MultiLevelGridMap::new(GridSize::new(4, 4), Resolution::uniform(1.0));
        for x in 0..4 {
            map.insert_patch(GridIndex::new(x, 0), HeightPatch::new(0.0, 1.0))
                .unwrap();
        }

        let bx = AlignedBox3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.5, 1.0));
        let cells: Vec<GridIndex> = map.intersect_aabb(&bx).iter().map(|(i, _)| *i).collect();
        assert_eq!(cells, vec![GridIndex::new(0, 0), GridIndex::new(1, 0)]);

        let (view, count) = map.intersect_cuboid_counted(&bx);
        assert_eq!(view.num_cells(), GridSize::new(2, 1));
        assert_eq!(count, 2);

        // A box inside a single cell still covers that cell
        let bx = AlignedBox3::new(Point3::new(2.2, 0.2, 0.0), Point3::new(2.8, 0.8, 1.0));
        let cells: Vec<GridIndex> = map.intersect_aabb(&bx).iter().map(|(i, _)| *i).collect();
        assert_eq!(cells, vec![GridIndex::new(2, 0)]);
        assert_eq!(map.intersect_cuboid_counted(&bx).1, 1);
    }

    #[test]
    fn test_nan_z_is_empty_for_both_queries() {
        let map = map_with_two_patches();
        let bx = AlignedBox3::new(
            Point3::new(0.0, 0.0, f64::NAN),
            Point3::new(0.35, 0.35, 2.5),
        );
        assert!(map.intersect_aabb(&bx).is_empty());

        let (view, count) = map.intersect_cuboid_counted(&bx);
        assert!(view.is_empty());
        assert_eq!(count, 0);

        let inverted = z_box(2.0, 1.0);
        assert!(map.intersect_cuboid(&inverted).is_empty());
    }

    #[test]
    fn test_cuboid_outside_is_empty_view() {
        let map = map_with_two_patches();
        let bx = AlignedBox3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.5, 0.5, 3.0));
        let (view, count) = map.intersect_cuboid_counted(&bx);
        assert!(view.is_empty());
        assert_eq!(view.num_cells(), GridSize::new(0, 0));
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cuboid_view_metadata_offset() {
        let map = map_with_two_patches();
        map.local_map_data().borrow_mut().frame_id = "terrain".to_string();

        let bx = AlignedBox3::new(Point3::new(0.25, 0.35, 0.0), Point3::new(0.45, 0.45, 1.0));
        let view = map.intersect_cuboid(&bx);
        let data = view.local_map_data().borrow();
        assert_eq!(data.frame_id, "terrain");
        assert!((data.offset.x - 0.2).abs() < 1e-9);
        assert!((data.offset.y - 0.3).abs() < 1e-9);
        assert!(!view.local_map_data().ptr_eq(map.local_map_data()));
    }

    #[test]
    fn test_full_view() {
        let map = map_with_two_patches();
        let view = map.view();
        assert_eq!(view.num_cells(), map.num_cells());
        assert_eq!(view.reference_count(), 2);
        assert!(view.local_map_data().ptr_eq(map.local_map_data()));
        let patches: Vec<_> = view.patches().collect();
        assert_eq!(patches.len(), 2);
        assert!(std::ptr::eq(patches[1].1, &map.at_xy(0, 0).unwrap().as_slice()[1]));
    }

    #[test]
    fn test_convert_patch_type() {
        #[derive(Clone, Debug, PartialEq, PartialOrd)]
        struct Thick(HeightPatch);

        impl From<HeightPatch> for Thick {
            fn from(p: HeightPatch) -> Self {
                Thick(HeightPatch::new(p.min - 0.5, p.max + 0.5))
            }
        }

        let map = map_with_two_patches();
        let thick: MultiLevelGridMap<Thick> = map.convert();
        let list = thick.at_xy(0, 0).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0].0, HeightPatch::new(-0.5, 1.5));
        assert_eq!(thick.to_grid(WorldPoint::new(0.05, 0.05)), Some(GridIndex::ZERO));
    }
}
