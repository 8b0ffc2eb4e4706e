//! Local map metadata shared between co-registered grids.
//!
//! Several grids describing the same physical area (the layers of a
//! [`LayeredGridMap`](crate::LayeredGridMap), or a multi-level map and its
//! derived grids) hold one [`SharedMapData`] handle to the same block.
//! The block lives as long as its longest holder.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::point::Point3;

/// Kind of map a metadata block describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocalMapType {
    /// Single dense grid
    #[default]
    GridMap,
    /// Registry of named typed layers
    LayeredGridMap,
    /// Grid of per-cell patch lists
    MultiLevelGridMap,
}

impl fmt::Display for LocalMapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocalMapType::GridMap => "grid_map",
            LocalMapType::LayeredGridMap => "layered_grid_map",
            LocalMapType::MultiLevelGridMap => "multi_level_grid_map",
        };
        f.write_str(name)
    }
}

/// Descriptive data for a local map.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalMapData {
    /// Map identifier
    pub id: String,
    /// Reference frame the map is expressed in
    pub frame_id: String,
    /// Kind of map
    pub map_type: LocalMapType,
    /// Position of the grid's cell (0, 0) corner in the reference frame (meters)
    pub offset: Point3,
    /// Acquisition time in microseconds
    pub timestamp_us: u64,
}

impl LocalMapData {
    /// Create metadata for a map type with empty id and frame.
    pub fn new(map_type: LocalMapType) -> Self {
        Self {
            map_type,
            ..Default::default()
        }
    }

    /// Set the frame id
    pub fn with_frame(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }
}

/// Reference-counted handle to a [`LocalMapData`] block.
///
/// Cloning the handle shares the block. Mutation goes through
/// [`borrow_mut`](Self::borrow_mut); overlapping mutable borrows panic.
/// Grids holding a handle are `!Send`.
#[derive(Clone, Default)]
pub struct SharedMapData(Rc<RefCell<LocalMapData>>);

impl SharedMapData {
    /// Wrap a metadata block in a new handle.
    pub fn new(data: LocalMapData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    /// Private block for a map type.
    pub fn for_type(map_type: LocalMapType) -> Self {
        Self::new(LocalMapData::new(map_type))
    }

    /// Read the metadata.
    pub fn borrow(&self) -> Ref<'_, LocalMapData> {
        self.0.borrow()
    }

    /// Modify the metadata; the change is visible to every holder.
    pub fn borrow_mut(&self) -> RefMut<'_, LocalMapData> {
        self.0.borrow_mut()
    }

    /// Copy of the current metadata.
    pub fn snapshot(&self) -> LocalMapData {
        self.0.borrow().clone()
    }

    /// True if both handles refer to the same block.
    pub fn ptr_eq(&self, other: &SharedMapData) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this block.
    pub fn holder_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl fmt::Debug for SharedMapData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => f.debug_tuple("SharedMapData").field(&*data).finish(),
            Err(_) => f.write_str("SharedMapData(<mutably borrowed>)"),
        }
    }
}
