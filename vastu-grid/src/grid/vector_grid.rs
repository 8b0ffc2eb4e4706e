//! Contiguous cell storage with a default value.
//!
//! ## Memory Layout
//!
//! Cells are stored row-major in one `Vec`:
//!
//! ```text
//! linear = y * width + x
//!
//! y=0: [ (0,0) (1,0) (2,0) ... (w-1,0) ]
//! y=1: [ (0,1) (1,1) (2,1) ... (w-1,1) ]
//! ...
//! ```

use std::slice::{Iter, IterMut};

use log::debug;

use crate::core::{GridIndex, GridSize};
use crate::error::{GridError, Result};

use super::access::GridAccess;

/// Dense row-major 2D array of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorGrid<T> {
    cells: Vec<T>,
    num_cells: GridSize,
    default_value: T,
}

impl<T: Clone> VectorGrid<T> {
    /// Allocate `num_cells` cells, all holding `default_value`.
    pub fn new(num_cells: GridSize, default_value: T) -> Self {
        Self {
            cells: vec![default_value.clone(); num_cells.cell_count()],
            num_cells,
            default_value,
        }
    }

    /// Cell at `index`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, index: GridIndex) -> Option<&T> {
        self.num_cells.linear(index).map(|i| &self.cells[i])
    }

    /// Mutable cell at `index`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        self.num_cells.linear(index).map(move |i| &mut self.cells[i])
    }

    /// Cells as a row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over all cells with their indices.
    pub fn indexed_iter(&self) -> impl Iterator<Item = (GridIndex, &T)> + '_ {
        let size = self.num_cells;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (size.index_of(i), cell))
    }

    /// Iterate over all cells mutably with their indices.
    pub fn indexed_iter_mut(&mut self) -> impl Iterator<Item = (GridIndex, &mut T)> + '_ {
        let size = self.num_cells;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, cell)| (size.index_of(i), cell))
    }

    /// Build a grid of another element type by mapping every cell and the default.
    pub fn map_cells<U, F>(&self, mut f: F) -> VectorGrid<U>
    where
        F: FnMut(&T) -> U,
    {
        VectorGrid {
            cells: self.cells.iter().map(&mut f).collect(),
            num_cells: self.num_cells,
            default_value: f(&self.default_value),
        }
    }

    fn out_of_bounds(&self, index: GridIndex) -> GridError {
        GridError::OutOfBounds {
            index,
            num_cells: self.num_cells,
        }
    }
}

/// Indices `0..len`, descending when `reversed`.
#[inline]
fn axis_order(len: i64, reversed: bool) -> impl Iterator<Item = i64> {
    (0..len).map(move |i| if reversed { len - 1 - i } else { i })
}

impl<T: Clone + PartialEq> VectorGrid<T> {
    /// First and last cell (row-major) that differ from the default value.
    ///
    /// Returns `None` if every cell holds the default.
    pub fn non_default_range(&self) -> Option<(GridIndex, GridIndex)> {
        let first = self.cells.iter().position(|c| *c != self.default_value)?;
        let last = self.cells.iter().rposition(|c| *c != self.default_value)?;
        Some((
            self.num_cells.index_of(first),
            self.num_cells.index_of(last),
        ))
    }
}

impl<T: Clone> GridAccess for VectorGrid<T> {
    type Cell = T;

    #[inline]
    fn default_value(&self) -> &T {
        &self.default_value
    }

    fn iter(&self) -> Iter<'_, T> {
        self.cells.iter()
    }

    fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.cells.iter_mut()
    }

    fn resize(&mut self, num_cells: GridSize) {
        // Build the new buffer before touching state
        let cells = vec![self.default_value.clone(); num_cells.cell_count()];
        debug!("[VectorGrid] resize {} -> {}", self.num_cells, num_cells);
        self.cells = cells;
        self.num_cells = num_cells;
    }

    fn move_by(&mut self, offset: GridIndex) {
        let width = self.num_cells.width as i64;
        let height = self.num_cells.height as i64;
        let (dx, dy) = (offset.x as i64, offset.y as i64);

        if dx == 0 && dy == 0 {
            return;
        }
        if dx.abs() >= width || dy.abs() >= height {
            self.clear();
            return;
        }

        // Visit destinations so that every source is read before it is written.
        for y in axis_order(height, dy > 0) {
            for x in axis_order(width, dx > 0) {
                let dst = (y * width + x) as usize;
                let (sx, sy) = (x - dx, y - dy);
                if sx >= 0 && sx < width && sy >= 0 && sy < height {
                    let src = (sy * width + sx) as usize;
                    self.cells.swap(dst, src);
                } else {
                    self.cells[dst] = self.default_value.clone();
                }
            }
        }
    }

    #[inline]
    fn at(&self, index: GridIndex) -> Result<&T> {
        self.get(index).ok_or_else(|| self.out_of_bounds(index))
    }

    #[inline]
    fn at_mut(&mut self, index: GridIndex) -> Result<&mut T> {
        match self.num_cells.linear(index) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_bounds(index)),
        }
    }

    #[inline]
    fn num_cells(&self) -> GridSize {
        self.num_cells
    }

    fn clear(&mut self) {
        self.cells.fill(self.default_value.clone());
    }
}
