//! Multi-level surface grids.
//!
//! Each cell holds an ordered list of patches, where a patch is anything with
//! a vertical extent (see [`VerticalExtent`]). This models terrain with
//! overhangs, bridges or multiple floors in a single 2D grid.
//!
//! ## Key Components
//!
//! - [`HeightPatch`]: Plain `[min, max]` interval patch
//! - [`LevelList`]: Sorted patches of one cell
//! - [`MultiLevelGridMap`]: Grid of level lists with box queries
//! - [`MultiLevelView`]: Borrowed query result, references into the source map
//!
//! ## Queries
//!
//! | Query | Result | Outside the grid |
//! |-------|--------|------------------|
//! | `intersect_aabb` | `Vec<(GridIndex, &P)>` | xy rectangle clamped |
//! | `intersect_aabb_with` | callback, early exit | xy rectangle clamped |
//! | `intersect_cuboid` | `MultiLevelView` | empty view |
//!
//! ```rust
//! use vastu_grid::{
//!     AlignedBox3, GridIndex, GridSize, HeightPatch, MultiLevelGridMap, Point3, Resolution,
//! };
//!
//! let mut map = MultiLevelGridMap::new(GridSize::new(10, 10), Resolution::uniform(0.1));
//! map.insert_patch(GridIndex::new(0, 0), HeightPatch::new(0.0, 1.0))?;
//! map.insert_patch(GridIndex::new(0, 0), HeightPatch::new(2.0, 3.0))?;
//!
//! let bx = AlignedBox3::new(Point3::new(0.0, 0.0, 0.5), Point3::new(0.05, 0.05, 2.5));
//! assert_eq!(map.intersect_aabb(&bx).len(), 2);
//! # Ok::<(), vastu_grid::GridError>(())
//! ```

mod level_list;
mod map;
mod patch;
mod view;

pub use level_list::LevelList;
pub use map::{MultiLevelGridMap, PatchVector};
pub use patch::{HeightPatch, VerticalExtent};
pub use view::MultiLevelView;
