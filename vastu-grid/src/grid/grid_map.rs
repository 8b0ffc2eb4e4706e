//! Dense grid with metric resolution and shared local-map metadata.

use std::slice::{Iter, IterMut};

use crate::core::{
    GridIndex, GridSize, LocalMapType, Resolution, SharedMapData, WorldPoint,
};
use crate::error::Result;

use super::access::GridAccess;
use super::vector_grid::VectorGrid;

/// Dense 2D grid of `T` with a metric resolution.
///
/// The grid uses a local coordinate system where:
/// - Cell (0, 0) covers `[0, res.x) x [0, res.y)`
/// - Cell (x, y) covers `[x*res.x, (x+1)*res.x) x [y*res.y, (y+1)*res.y)`
/// - World to grid conversion uses `floor`, so small negative coordinates
///   map to index -1 and are outside the grid
///
/// The placement of the local frame is described by the shared
/// [`LocalMapData`](crate::core::LocalMapData) offset.
///
/// Cloning deep-copies the cells and shares the metadata block.
#[derive(Clone, Debug)]
pub struct GridMap<T> {
    storage: VectorGrid<T>,
    resolution: Resolution,
    map_data: SharedMapData,
}

impl<T: Clone> GridMap<T> {
    /// Create a grid with a private metadata block.
    pub fn new(num_cells: GridSize, resolution: Resolution, default_value: T) -> Self {
        Self::with_shared_data(
            num_cells,
            resolution,
            default_value,
            SharedMapData::for_type(LocalMapType::GridMap),
        )
    }

    /// Create a grid co-registered with other holders of `map_data`.
    pub fn with_shared_data(
        num_cells: GridSize,
        resolution: Resolution,
        default_value: T,
        map_data: SharedMapData,
    ) -> Self {
        debug_assert!(resolution.is_valid(), "resolution must be positive");
        Self {
            storage: VectorGrid::new(num_cells, default_value),
            resolution,
            map_data,
        }
    }

    // === Basic Properties ===

    /// Cell edge lengths in meters.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Physical extent (width, height) in meters.
    pub fn size_m(&self) -> WorldPoint {
        let n = self.storage.num_cells();
        WorldPoint::new(
            n.width as f64 * self.resolution.x,
            n.height as f64 * self.resolution.y,
        )
    }

    /// Metadata block shared with co-registered grids.
    #[inline]
    pub fn local_map_data(&self) -> &SharedMapData {
        &self.map_data
    }

    // === Cell Access ===

    /// Cell at `index`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, index: GridIndex) -> Option<&T> {
        self.storage.get(index)
    }

    /// Mutable cell at `index`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        self.storage.get_mut(index)
    }

    /// Bounds-checked access by components.
    #[inline]
    pub fn at_xy(&self, x: i32, y: i32) -> Result<&T> {
        self.storage.at(GridIndex::new(x, y))
    }

    /// Bounds-checked mutable access by components.
    #[inline]
    pub fn at_xy_mut(&mut self, x: i32, y: i32) -> Result<&mut T> {
        self.storage.at_mut(GridIndex::new(x, y))
    }

    /// Iterate over all cells with their indices (row-major).
    pub fn indexed_iter(&self) -> impl Iterator<Item = (GridIndex, &T)> + '_ {
        self.storage.indexed_iter()
    }

    /// Iterate over all cells mutably with their indices (row-major).
    pub fn indexed_iter_mut(&mut self) -> impl Iterator<Item = (GridIndex, &mut T)> + '_ {
        self.storage.indexed_iter_mut()
    }

    // === Coordinate Conversion ===

    /// Index of the cell containing `point`, or `None` outside the grid.
    ///
    /// Non-finite coordinates are outside every grid.
    #[inline]
    pub fn to_grid(&self, point: WorldPoint) -> Option<GridIndex> {
        if !(point.x.is_finite() && point.y.is_finite()) {
            return None;
        }
        let index = self.unchecked_index(point);
        self.storage.num_cells().contains(index).then_some(index)
    }

    /// Like [`to_grid`](Self::to_grid), also returning the position of `point`
    /// relative to the cell's minimum corner.
    pub fn to_grid_in_cell(&self, point: WorldPoint) -> Option<(GridIndex, WorldPoint)> {
        let index = self.to_grid(point)?;
        let corner = WorldPoint::new(
            index.x as f64 * self.resolution.x,
            index.y as f64 * self.resolution.y,
        );
        Some((index, point - corner))
    }

    /// Center of the cell at `index`. Not bounds-checked.
    #[inline]
    pub fn from_grid(&self, index: GridIndex) -> WorldPoint {
        WorldPoint::new(
            (index.x as f64 + 0.5) * self.resolution.x,
            (index.y as f64 + 0.5) * self.resolution.y,
        )
    }

    /// Check if `point` lies inside the covered extent.
    #[inline]
    pub fn contains_point(&self, point: WorldPoint) -> bool {
        self.to_grid(point).is_some()
    }

    /// Floor-divided index of `point`; may lie outside the grid.
    #[inline]
    pub(crate) fn unchecked_index(&self, point: WorldPoint) -> GridIndex {
        GridIndex::new(
            (point.x / self.resolution.x).floor() as i32,
            (point.y / self.resolution.y).floor() as i32,
        )
    }

    // === Element Conversion ===

    /// Grid of another element type with the same geometry and metadata block.
    pub fn map_cells<U, F>(&self, f: F) -> GridMap<U>
    where
        F: FnMut(&T) -> U,
    {
        GridMap {
            storage: self.storage.map_cells(f),
            resolution: self.resolution,
            map_data: self.map_data.clone(),
        }
    }

    /// Copy into a grid of a convertible element type.
    pub fn convert<U: From<T>>(&self) -> GridMap<U> {
        self.map_cells(|cell| U::from(cell.clone()))
    }
}

impl<T: Clone + PartialEq> GridMap<T> {
    /// First and last cell (row-major) that differ from the default value.
    pub fn non_default_range(&self) -> Option<(GridIndex, GridIndex)> {
        self.storage.non_default_range()
    }
}

impl<T: Clone + Default> GridMap<T> {
    /// Create a grid whose default value is `T::default()`.
    pub fn with_default(num_cells: GridSize, resolution: Resolution) -> Self {
        Self::new(num_cells, resolution, T::default())
    }
}

impl<T: Clone> GridAccess for GridMap<T> {
    type Cell = T;

    #[inline]
    fn default_value(&self) -> &T {
        self.storage.default_value()
    }

    fn iter(&self) -> Iter<'_, T> {
        self.storage.iter()
    }

    fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.storage.iter_mut()
    }

    fn resize(&mut self, num_cells: GridSize) {
        self.storage.resize(num_cells);
    }

    fn move_by(&mut self, offset: GridIndex) {
        self.storage.move_by(offset);
    }

    #[inline]
    fn at(&self, index: GridIndex) -> Result<&T> {
        self.storage.at(index)
    }

    #[inline]
    fn at_mut(&mut self, index: GridIndex) -> Result<&mut T> {
        self.storage.at_mut(index)
    }

    #[inline]
    fn num_cells(&self) -> GridSize {
        self.storage.num_cells()
    }

    fn clear(&mut self) {
        self.storage.clear();
    }
}

/// Grid holding one elevation value per cell.
pub type ElevationMap = GridMap<f32>;

impl GridMap<f32> {
    /// Lowest and highest elevation over cells that are finite and differ
    /// from the default value. `None` when no cell qualifies.
    pub fn elevation_range(&self) -> Option<(f32, f32)> {
        let default = *self.default_value();
        self.iter()
            .copied()
            .filter(|v| v.is_finite() && *v != default)
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
