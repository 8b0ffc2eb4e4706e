//! Metric point, resolution and box types.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Planar point in meters, expressed in a grid's local frame.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl WorldPoint {
    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Create a new world point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// 3D point in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (height)
    pub z: f64,
}

impl Point3 {
    /// Zero point (origin)
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new 3D point
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar part of the point.
    #[inline]
    pub fn xy(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// Cell edge lengths in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Cell size along X
    pub x: f64,
    /// Cell size along Y
    pub y: f64,
}

impl Resolution {
    /// Create a resolution with different edge lengths per axis
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Square cells
    #[inline]
    pub const fn uniform(size: f64) -> Self {
        Self { x: size, y: size }
    }

    /// Both edge lengths are finite and strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Axis-aligned 3D box, used as a query region.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedBox3 {
    /// Minimum corner
    pub min: Point3,
    /// Maximum corner
    pub max: Point3,
}

impl AlignedBox3 {
    /// Create a box from its corners
    #[inline]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// True if `min > max` on any axis, or any bound is NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_point_ops() {
        let a = WorldPoint::new(1.0, 2.0);
        let b = WorldPoint::new(4.0, 6.0);
        assert_eq!(b - a, WorldPoint::new(3.0, 4.0));
        assert_eq!(a + b, WorldPoint::new(5.0, 8.0));
    }

    #[test]
    fn test_resolution_validity() {
        assert!(Resolution::uniform(0.05).is_valid());
        assert!(!Resolution::new(0.0, 0.1).is_valid());
        assert!(!Resolution::new(0.1, -0.1).is_valid());
        assert!(!Resolution::new(f64::NAN, 0.1).is_valid());
    }

    #[test]
    fn test_degenerate_box_is_not_empty() {
        let bx = AlignedBox3::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        assert!(!bx.is_empty());
    }

    #[test]
    fn test_inverted_box_is_empty() {
        let bx = AlignedBox3::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        assert!(bx.is_empty());

        let nan = AlignedBox3::new(Point3::new(0.0, 0.0, f64::NAN), Point3::new(1.0, 1.0, 1.0));
        assert!(nan.is_empty());
    }
}
