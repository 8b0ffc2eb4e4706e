//! Vertical extent of patches stored in multi-level cells.

use serde::{Deserialize, Serialize};

/// A value occupying a vertical interval `[min_z, max_z]` within a cell.
///
/// Overlap tests against query boxes use closed intervals.
pub trait VerticalExtent {
    /// Lowest height covered (meters).
    fn min_z(&self) -> f64;

    /// Highest height covered (meters).
    fn max_z(&self) -> f64;

    /// Closed-interval overlap with `[lo, hi]`.
    #[inline]
    fn overlaps_z(&self, lo: f64, hi: f64) -> bool {
        self.min_z() <= hi && self.max_z() >= lo
    }
}

impl<P: VerticalExtent + ?Sized> VerticalExtent for &P {
    #[inline]
    fn min_z(&self) -> f64 {
        (**self).min_z()
    }

    #[inline]
    fn max_z(&self) -> f64 {
        (**self).max_z()
    }
}

/// Plain vertical interval, ordered by `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct HeightPatch {
    /// Bottom of the patch
    pub min: f64,
    /// Top of the patch
    pub max: f64,
}

impl HeightPatch {
    /// Patch spanning `a` to `b`, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Zero-thickness patch at `z`.
    pub fn at(z: f64) -> Self {
        Self { min: z, max: z }
    }

    /// Vertical thickness.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max - self.min
    }
}

impl VerticalExtent for HeightPatch {
    #[inline]
    fn min_z(&self) -> f64 {
        self.min
    }

    #[inline]
    fn max_z(&self) -> f64 {
        self.max
    }
}
