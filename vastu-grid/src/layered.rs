//! Named registry of typed grids sharing one coordinate frame.
//!
//! Layers of different element types live side by side behind a type-erased
//! handle. Typed lookup checks the stored element type at runtime and reports
//! a [`GridError::TypeMismatch`] instead of reinterpreting the grid.
//!
//! ```rust
//! use vastu_grid::{GridError, GridSize, LayeredGridMap, Resolution};
//!
//! let mut map = LayeredGridMap::new(GridSize::new(10, 10), Resolution::uniform(0.1));
//! map.add_layer("elevation", f32::NAN)?;
//! map.add_layer("traversable", false)?;
//!
//! assert_eq!(map.basis_layer(), Some("elevation"));
//! assert!(map.layer::<f32>("elevation").is_ok());
//! assert!(matches!(
//!     map.layer::<u8>("traversable"),
//!     Err(GridError::TypeMismatch { .. })
//! ));
//! # Ok::<(), GridError>(())
//! ```

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::Deref;
use std::slice::IterMut;

use log::debug;

use crate::core::{GridIndex, GridSize, LocalMapType, Resolution, SharedMapData};
use crate::error::{GridError, Result};
use crate::grid::{GridAccess, GridMap};

/// Operations available on a layer without knowing its element type.
trait LayerHandle: Any {
    fn element_type(&self) -> &'static str;
    fn reset_to(&mut self, num_cells: GridSize);
    fn shift(&mut self, offset: GridIndex);
    fn fill_default(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Clone + 'static> LayerHandle for GridMap<T> {
    fn element_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn reset_to(&mut self, num_cells: GridSize) {
        self.resize(num_cells);
    }

    fn shift(&mut self, offset: GridIndex) {
        self.move_by(offset);
    }

    fn fill_default(&mut self) {
        self.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Write access to one layer of a [`LayeredGridMap`].
///
/// Cells can be written and the layer read through `Deref`, but the layer
/// can't be resized or shifted on its own: geometry changes go through
/// [`LayeredGridMap::resize`] and [`LayeredGridMap::move_by`] so every layer
/// keeps the registry's size.
///
/// ```compile_fail
/// use vastu_grid::{GridAccess, GridSize, LayeredGridMap, Resolution};
///
/// let mut map = LayeredGridMap::new(GridSize::new(8, 8), Resolution::uniform(0.1));
/// map.add_layer("a", 0u8).unwrap().resize(GridSize::new(2, 3));
/// ```
#[derive(Debug)]
pub struct LayerMut<'a, T> {
    grid: &'a mut GridMap<T>,
}

impl<'a, T: Clone> LayerMut<'a, T> {
    fn new(grid: &'a mut GridMap<T>) -> Self {
        Self { grid }
    }

    /// Bounds-checked write access.
    #[inline]
    pub fn at_mut(&mut self, index: GridIndex) -> Result<&mut T> {
        self.grid.at_mut(index)
    }

    /// Bounds-checked write access by components.
    #[inline]
    pub fn at_xy_mut(&mut self, x: i32, y: i32) -> Result<&mut T> {
        self.grid.at_xy_mut(x, y)
    }

    /// Mutable cell at `index`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        self.grid.get_mut(index)
    }

    /// Cells in row-major order, mutably.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.grid.iter_mut()
    }

    /// Cells with their indices (row-major), mutably.
    pub fn indexed_iter_mut(&mut self) -> impl Iterator<Item = (GridIndex, &mut T)> + '_ {
        self.grid.indexed_iter_mut()
    }

    /// Reset every cell of this layer to its default value.
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

impl<T> Deref for LayerMut<'_, T> {
    type Target = GridMap<T>;

    fn deref(&self) -> &Self::Target {
        &*self.grid
    }
}

struct LayerEntry {
    grid: Box<dyn LayerHandle>,
    /// Insertion sequence number, used to pick the basis layer.
    seq: u64,
}

/// Registry of named grids with possibly different element types.
///
/// Every layer has the registry's cell count and resolution and holds the
/// registry's metadata block. The first layer added is the basis layer; if it
/// is removed, the earliest-added remaining layer takes over.
pub struct LayeredGridMap {
    num_cells: GridSize,
    resolution: Resolution,
    map_data: SharedMapData,
    layers: BTreeMap<String, LayerEntry>,
    next_seq: u64,
}

impl LayeredGridMap {
    /// Create an empty registry. No layers are allocated.
    pub fn new(num_cells: GridSize, resolution: Resolution) -> Self {
        Self::with_shared_data(
            num_cells,
            resolution,
            SharedMapData::for_type(LocalMapType::LayeredGridMap),
        )
    }

    /// Create an empty registry co-registered with other holders of `map_data`.
    pub fn with_shared_data(
        num_cells: GridSize,
        resolution: Resolution,
        map_data: SharedMapData,
    ) -> Self {
        Self {
            num_cells,
            resolution,
            map_data,
            layers: BTreeMap::new(),
            next_seq: 0,
        }
    }

    // === Basic Properties ===

    /// Cell counts shared by all layers.
    #[inline]
    pub fn num_cells(&self) -> GridSize {
        self.num_cells
    }

    /// Resolution shared by all layers.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Metadata block shared by all layers.
    #[inline]
    pub fn local_map_data(&self) -> &SharedMapData {
        &self.map_data
    }

    /// Number of layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if no layer is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // === Layer Management ===

    /// Register a new layer filled with `default_value`.
    ///
    /// Fails with [`GridError::LayerExists`] if `key` is taken; the registry
    /// is left unchanged in that case.
    pub fn add_layer<T: Clone + 'static>(
        &mut self,
        key: &str,
        default_value: T,
    ) -> Result<LayerMut<'_, T>> {
        match self.layers.entry(key.to_string()) {
            Entry::Occupied(_) => return Err(GridError::LayerExists(key.to_string())),
            Entry::Vacant(slot) => {
                let grid = GridMap::with_shared_data(
                    self.num_cells,
                    self.resolution,
                    default_value,
                    self.map_data.clone(),
                );
                slot.insert(LayerEntry {
                    grid: Box::new(grid),
                    seq: self.next_seq,
                });
                self.next_seq += 1;
            }
        }

        debug!(
            "[LayeredGridMap] added layer '{}' ({}, {} cells)",
            key,
            type_name::<T>(),
            self.num_cells
        );
        self.layer_mut(key)
    }

    /// Check if a layer is registered under `key`.
    #[inline]
    pub fn has_layer(&self, key: &str) -> bool {
        self.layers.contains_key(key)
    }

    /// Drop the layer under `key`. Returns `false` if there was none.
    pub fn remove_layer(&mut self, key: &str) -> bool {
        let removed = self.layers.remove(key).is_some();
        if removed {
            debug!("[LayeredGridMap] removed layer '{}'", key);
        }
        removed
    }

    /// Drop every layer. Safe to call repeatedly.
    pub fn remove_all_layers(&mut self) {
        if !self.layers.is_empty() {
            debug!("[LayeredGridMap] removing {} layers", self.layers.len());
        }
        self.layers.clear();
    }

    /// Typed read access to a layer.
    pub fn layer<T: Clone + 'static>(&self, key: &str) -> Result<&GridMap<T>> {
        let entry = self
            .layers
            .get(key)
            .ok_or_else(|| GridError::LayerNotFound(key.to_string()))?;
        let stored = entry.grid.element_type();
        entry
            .grid
            .as_any()
            .downcast_ref::<GridMap<T>>()
            .ok_or_else(|| type_mismatch::<T>(key, stored))
    }

    /// Typed write access to a layer's cells.
    pub fn layer_mut<T: Clone + 'static>(&mut self, key: &str) -> Result<LayerMut<'_, T>> {
        let entry = self
            .layers
            .get_mut(key)
            .ok_or_else(|| GridError::LayerNotFound(key.to_string()))?;
        let stored = entry.grid.element_type();
        entry
            .grid
            .as_any_mut()
            .downcast_mut::<GridMap<T>>()
            .map(LayerMut::new)
            .ok_or_else(|| type_mismatch::<T>(key, stored))
    }

    /// Element type name of the layer under `key`.
    pub fn layer_type_name(&self, key: &str) -> Option<&'static str> {
        self.layers.get(key).map(|entry| entry.grid.element_type())
    }

    /// Keys of all layers, sorted.
    pub fn layer_keys(&self) -> Vec<String> {
        self.layers.keys().cloned().collect()
    }

    /// Key of the basis layer (earliest-added layer still present).
    pub fn basis_layer(&self) -> Option<&str> {
        self.layers
            .iter()
            .min_by_key(|(_, entry)| entry.seq)
            .map(|(key, _)| key.as_str())
    }

    // === Uniform Layer Operations ===

    /// Reset every cell of every layer to its layer's default value.
    pub fn clear_all_layers(&mut self) {
        for entry in self.layers.values_mut() {
            entry.grid.fill_default();
        }
    }

    /// Resize the registry and every layer. All cells hold their default afterwards.
    pub fn resize(&mut self, num_cells: GridSize) {
        debug!(
            "[LayeredGridMap] resize {} layers {} -> {}",
            self.layers.len(),
            self.num_cells,
            num_cells
        );
        for entry in self.layers.values_mut() {
            entry.grid.reset_to(num_cells);
        }
        self.num_cells = num_cells;
    }

    /// Shift the contents of every layer by `offset`.
    pub fn move_by(&mut self, offset: GridIndex) {
        for entry in self.layers.values_mut() {
            entry.grid.shift(offset);
        }
    }
}

impl Drop for LayeredGridMap {
    fn drop(&mut self) {
        self.remove_all_layers();
    }
}

impl std::fmt::Debug for LayeredGridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layers: BTreeMap<&str, &'static str> = self
            .layers
            .iter()
            .map(|(key, entry)| (key.as_str(), entry.grid.element_type()))
            .collect();
        f.debug_struct("LayeredGridMap")
            .field("num_cells", &self.num_cells)
            .field("resolution", &self.resolution)
            .field("layers", &layers)
            .finish()
    }
}

fn type_mismatch<T>(key: &str, stored: &'static str) -> GridError {
    GridError::TypeMismatch {
        key: key.to_string(),
        requested: type_name::<T>(),
        stored,
    }
}
