//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::{GridSize, LocalMapData, LocalMapType, Resolution, SharedMapData};
use crate::grid::GridMap;
use crate::layered::LayeredGridMap;
use crate::multilevel::MultiLevelGridMap;

use super::defaults;
use super::error::ConfigLoadError;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Grid width (cells)
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Cell size along x (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution_x: f64,

    /// Cell size along y (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution_y: f64,

    /// Frame the grids are expressed in
    #[serde(default = "defaults::frame_id")]
    pub frame_id: String,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: defaults::grid_size(),
            height: defaults::grid_size(),
            resolution_x: defaults::resolution(),
            resolution_y: defaults::resolution(),
            frame_id: defaults::frame_id(),
        }
    }
}

impl GridSection {
    /// Grid extent in cells.
    pub fn num_cells(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Cell edge lengths.
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.resolution_x, self.resolution_y)
    }

    /// Fresh metadata block carrying the configured frame.
    pub fn shared_data(&self, map_type: LocalMapType) -> SharedMapData {
        SharedMapData::new(LocalMapData::new(map_type).with_frame(self.frame_id.clone()))
    }

    /// Check values serde can't reject on its own.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !self.resolution().is_valid() {
            return Err(ConfigLoadError::Invalid(format!(
                "resolution must be positive and finite, got {} x {}",
                self.resolution_x, self.resolution_y
            )));
        }
        Ok(())
    }

    /// Build a plain grid filled with `default_value`.
    pub fn build_grid<T: Clone>(&self, default_value: T) -> Result<GridMap<T>, ConfigLoadError> {
        self.validate()?;
        Ok(GridMap::with_shared_data(
            self.num_cells(),
            self.resolution(),
            default_value,
            self.shared_data(LocalMapType::GridMap),
        ))
    }

    /// Build an empty layer registry.
    pub fn build_layered(&self) -> Result<LayeredGridMap, ConfigLoadError> {
        self.validate()?;
        Ok(LayeredGridMap::with_shared_data(
            self.num_cells(),
            self.resolution(),
            self.shared_data(LocalMapType::LayeredGridMap),
        ))
    }

    /// Build a multi-level grid with empty cells.
    pub fn build_multi_level<P: Clone>(&self) -> Result<MultiLevelGridMap<P>, ConfigLoadError> {
        self.validate()?;
        Ok(MultiLevelGridMap::with_shared_data(
            self.num_cells(),
            self.resolution(),
            self.shared_data(LocalMapType::MultiLevelGridMap),
        ))
    }
}
