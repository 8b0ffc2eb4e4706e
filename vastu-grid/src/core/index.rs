//! Integer cell indices and grid dimensions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Grid index (integer cell coordinates).
///
/// Comparison is component-wise: `a <= b` holds only when both `a.x <= b.x`
/// and `a.y <= b.y`. Indices where the axes disagree are incomparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridIndex {
    /// X index (column)
    pub x: i32,
    /// Y index (row)
    pub y: i32,
}

impl GridIndex {
    /// Index of the first cell.
    pub const ZERO: GridIndex = GridIndex { x: 0, y: 0 };

    /// Create a new grid index
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(self, other: GridIndex) -> GridIndex {
        GridIndex::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(self, other: GridIndex) -> GridIndex {
        GridIndex::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl PartialOrd for GridIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.x.cmp(&other.x), self.y.cmp(&other.y)) {
            (x, y) if x == y => Some(x),
            (Ordering::Equal, y) => Some(y),
            (x, Ordering::Equal) => Some(x),
            _ => None,
        }
    }
}

impl Add for GridIndex {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridIndex::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for GridIndex {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for GridIndex {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridIndex::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for GridIndex {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl From<(i32, i32)> for GridIndex {
    fn from((x, y): (i32, i32)) -> Self {
        GridIndex::new(x, y)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of cells along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    /// Cells along X
    pub width: usize,
    /// Cells along Y
    pub height: usize,
}

impl GridSize {
    /// Create a new grid size
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// True if either axis has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if an index lies in `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(&self, index: GridIndex) -> bool {
        index.x >= 0
            && index.y >= 0
            && (index.x as usize) < self.width
            && (index.y as usize) < self.height
    }

    /// Row-major offset of an index, if it is in bounds.
    #[inline]
    pub fn linear(&self, index: GridIndex) -> Option<usize> {
        if self.contains(index) {
            Some(index.y as usize * self.width + index.x as usize)
        } else {
            None
        }
    }

    /// Index of a row-major offset.
    #[inline]
    pub fn index_of(&self, linear: usize) -> GridIndex {
        GridIndex::new((linear % self.width) as i32, (linear / self.width) as i32)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_arithmetic() {
        let a = GridIndex::new(3, -2);
        let b = GridIndex::new(1, 5);
        assert_eq!(a + b, GridIndex::new(4, 3));
        assert_eq!(a - b, GridIndex::new(2, -7));
        assert_eq!(a.min(b), GridIndex::new(1, -2));
        assert_eq!(a.max(b), GridIndex::new(3, 5));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_index_componentwise_order() {
        let a = GridIndex::new(1, 1);
        assert!(a <= GridIndex::new(1, 2));
        assert!(a < GridIndex::new(2, 2));
        assert!(GridIndex::new(3, 3) > a);
        // Mixed axes are incomparable
        assert_eq!(a.partial_cmp(&GridIndex::new(0, 2)), None);
        assert!(!(a < GridIndex::new(0, 2)));
        assert!(!(a > GridIndex::new(0, 2)));
    }

    #[test]
    fn test_size_linear_is_row_major() {
        let size = GridSize::new(4, 3);
        assert_eq!(size.cell_count(), 12);
        assert_eq!(size.linear(GridIndex::new(0, 0)), Some(0));
        assert_eq!(size.linear(GridIndex::new(3, 0)), Some(3));
        assert_eq!(size.linear(GridIndex::new(0, 1)), Some(4));
        assert_eq!(size.linear(GridIndex::new(3, 2)), Some(11));
        assert_eq!(size.linear(GridIndex::new(4, 0)), None);
        assert_eq!(size.linear(GridIndex::new(-1, 0)), None);
        assert_eq!(size.index_of(7), GridIndex::new(3, 1));
    }

    #[test]
    fn test_empty_size() {
        assert!(GridSize::new(0, 5).is_empty());
        assert!(!GridSize::new(0, 5).contains(GridIndex::ZERO));
    }
}
