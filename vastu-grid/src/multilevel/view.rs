//! Non-owning result grid of multi-level queries.

use std::ops::{Deref, DerefMut};

use crate::core::{GridIndex, GridSize, Resolution, SharedMapData};
use crate::grid::{GridAccess, GridMap};

use super::level_list::LevelList;

/// Grid of references to patches owned by a [`MultiLevelGridMap`](super::MultiLevelGridMap).
///
/// The lifetime `'a` borrows the source map: while a view is alive the source
/// can't be resized, moved, mutated or dropped. Cloning a view copies the
/// references, never the patches.
///
/// View cell `(0, 0)` corresponds to source cell [`origin`](Self::origin).
#[derive(Debug)]
pub struct MultiLevelView<'a, P> {
    grid: GridMap<LevelList<&'a P>>,
    origin: GridIndex,
}

impl<'a, P> MultiLevelView<'a, P> {
    pub(crate) fn new(
        num_cells: GridSize,
        resolution: Resolution,
        origin: GridIndex,
        map_data: SharedMapData,
    ) -> Self {
        Self {
            grid: GridMap::with_shared_data(num_cells, resolution, LevelList::new(), map_data),
            origin,
        }
    }

    /// Zero-sized view.
    pub(crate) fn empty(resolution: Resolution, map_data: SharedMapData) -> Self {
        Self::new(GridSize::default(), resolution, GridIndex::ZERO, map_data)
    }

    /// Source index of view cell (0, 0).
    #[inline]
    pub fn origin(&self) -> GridIndex {
        self.origin
    }

    /// Source index of a view index.
    #[inline]
    pub fn to_source(&self, index: GridIndex) -> GridIndex {
        index + self.origin
    }

    /// True if the view has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid.num_cells().is_empty()
    }

    /// Total number of patch references held.
    pub fn reference_count(&self) -> usize {
        self.grid.iter().map(LevelList::len).sum()
    }

    /// Every referenced patch with its source index, row-major.
    pub fn patches(&self) -> impl Iterator<Item = (GridIndex, &'a P)> + '_ {
        self.grid.indexed_iter().flat_map(move |(index, list)| {
            let source = self.to_source(index);
            list.iter().map(move |&patch| (source, patch))
        })
    }
}

impl<P> Clone for MultiLevelView<'_, P> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            origin: self.origin,
        }
    }
}

impl<'a, P> Deref for MultiLevelView<'a, P> {
    type Target = GridMap<LevelList<&'a P>>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl<P> DerefMut for MultiLevelView<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.grid
    }
}
