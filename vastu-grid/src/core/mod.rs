//! Core types for the VastuGrid library.
//!
//! ## Type Categories
//!
//! ### Indices
//! - [`GridIndex`]: Integer cell indices, component-wise ordered
//! - [`GridSize`]: Cell counts per axis, row-major linearization
//!
//! ### Metric
//! - [`WorldPoint`]: Planar coordinates in meters (grid-local frame)
//! - [`Point3`]: 3D coordinates in meters
//! - [`Resolution`]: Cell edge lengths
//! - [`AlignedBox3`]: Axis-aligned query box
//!
//! ### Metadata
//! - [`LocalMapData`]: Frame, offset and timestamp of a local map
//! - [`SharedMapData`]: Reference-counted handle shared by co-registered grids

mod index;
mod map_data;
mod point;

pub use index::{GridIndex, GridSize};
pub use map_data::{LocalMapData, LocalMapType, SharedMapData};
pub use point::{AlignedBox3, Point3, Resolution, WorldPoint};
