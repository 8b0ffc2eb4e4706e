//! Dense grid storage.
//!
//! ## Key Components
//!
//! - [`GridAccess`]: Contract shared by every grid regardless of cell type
//! - [`VectorGrid`]: Row-major cell storage with a default value
//! - [`GridMap`]: Vector grid plus resolution and shared local-map metadata
//! - [`ElevationMap`]: `GridMap<f32>` with an elevation range query
//!
//! ## Coordinates
//!
//! ```text
//!   y
//!   ▲
//!   │ (0,1) (1,1) (2,1)
//!   │ (0,0) (1,0) (2,0)
//!   └──────────────────▶ x
//!
//! index = floor(point / resolution)
//! point = (index + 0.5) * resolution     # cell center
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vastu_grid::{GridAccess, GridIndex, GridMap, GridSize, Resolution, WorldPoint};
//!
//! let mut grid = GridMap::new(GridSize::new(40, 40), Resolution::uniform(0.05), 0u8);
//! let index = grid.to_grid(WorldPoint::new(0.52, 1.01)).expect("inside the grid");
//! *grid.at_mut(index)? = 1;
//! assert_eq!(index, GridIndex::new(10, 20));
//! # Ok::<(), vastu_grid::GridError>(())
//! ```

mod access;
mod grid_map;
mod vector_grid;

pub use access::GridAccess;
pub use grid_map::{ElevationMap, GridMap};
pub use vector_grid::VectorGrid;
