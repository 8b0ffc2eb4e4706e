//! # VastuGrid
//!
//! Generic 2D grid maps for robot mapping and terrain representation.
//!
//! ## Overview
//!
//! VastuGrid provides three grid flavours over one storage core:
//!
//! - **GridMap** - Dense grid of any cloneable cell type with a metric resolution
//! - **LayeredGridMap** - Named, heterogeneously typed layers sharing one geometry
//! - **MultiLevelGridMap** - Cells holding sorted vertical patches, with box queries
//!
//! All grids carry a [`SharedMapData`] handle. Grids created from one another
//! (layers of a registry, full views) share the same metadata block, so a
//! frame or offset update is seen by every holder.
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_grid::{GridAccess, GridIndex, GridSize, LayeredGridMap, Resolution};
//!
//! let mut map = LayeredGridMap::new(GridSize::new(100, 100), Resolution::uniform(0.05));
//! map.add_layer("elevation", f32::NAN)?;
//! map.add_layer("cost", 0u8)?;
//!
//! *map.layer_mut::<u8>("cost")?.at_mut(GridIndex::new(3, 4))? = 200;
//! assert_eq!(*map.layer::<u8>("cost")?.at(GridIndex::new(3, 4))?, 200);
//! # Ok::<(), vastu_grid::GridError>(())
//! ```
//!
//! ## Coordinate System
//!
//! Coordinates are grid-local meters:
//! - Cell (0, 0) spans `[0, res.x) x [0, res.y)`
//! - X grows with column index, Y with row index
//! - Storage is row-major: `linear = y * width + x`
//!
//! Grids are single-threaded (`!Send`) because of the shared metadata handle.

#![warn(missing_docs)]

// Core types
pub mod core;

// Dense storage
pub mod grid;

// Layer registry
pub mod layered;

// Multi-level surfaces and queries
pub mod multilevel;

// YAML configuration
pub mod config;

// Errors
pub mod error;

pub use config::{ConfigLoadError, GridConfig, GridSection};
pub use crate::core::{
    AlignedBox3, GridIndex, GridSize, LocalMapData, LocalMapType, Point3, Resolution,
    SharedMapData, WorldPoint,
};
pub use error::{GridError, Result};
pub use grid::{ElevationMap, GridAccess, GridMap, VectorGrid};
pub use layered::{LayerMut, LayeredGridMap};
pub use multilevel::{
    HeightPatch, LevelList, MultiLevelGridMap, MultiLevelView, PatchVector, VerticalExtent,
};
