//! Element-type independent grid contract.

use std::slice::{Iter, IterMut};

use crate::core::{GridIndex, GridSize};
use crate::error::Result;

/// Capabilities every concrete grid provides, whatever its cell type.
///
/// Iteration is row-major: `x` varies fastest.
pub trait GridAccess {
    /// Element stored in each cell.
    type Cell;

    /// Value that new, resized and cleared cells hold.
    fn default_value(&self) -> &Self::Cell;

    /// Cells in row-major order.
    fn iter(&self) -> Iter<'_, Self::Cell>;

    /// Cells in row-major order, mutably.
    fn iter_mut(&mut self) -> IterMut<'_, Self::Cell>;

    /// Reallocate to `num_cells`. Every cell holds the default value afterwards.
    fn resize(&mut self, num_cells: GridSize);

    /// Shift contents by `offset`: the cell at `i` moves to `i + offset`.
    ///
    /// Cells shifted past the edge are dropped and uncovered cells take the
    /// default value. A shift at least as large as the extent clears the grid.
    fn move_by(&mut self, offset: GridIndex);

    /// Bounds-checked read access.
    fn at(&self, index: GridIndex) -> Result<&Self::Cell>;

    /// Bounds-checked write access.
    fn at_mut(&mut self, index: GridIndex) -> Result<&mut Self::Cell>;

    /// Cell counts per axis.
    fn num_cells(&self) -> GridSize;

    /// Reset every cell to the default value.
    fn clear(&mut self);
}
