//! YAML configuration for grid geometry.
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_grid::config::GridConfig;
//!
//! let config = GridConfig::from_yaml("grid:\n  width: 64\n  resolution_x: 0.1\n")?;
//! let grid = config.grid.build_grid(0u8)?;
//! assert_eq!(grid.local_map_data().borrow().frame_id, "map");
//! # Ok::<(), vastu_grid::config::ConfigLoadError>(())
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   width: 200          # cells
//!   height: 200         # cells
//!   resolution_x: 0.05  # meters
//!   resolution_y: 0.05
//!   frame_id: "map"
//! ```
//!
//! Every key is optional; missing keys take the values shown above.

mod defaults;
mod error;
mod grid;

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

pub use error::ConfigLoadError;
pub use grid::GridSection;

/// Full configuration file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid geometry
    #[serde(default)]
    pub grid: GridSection,
}

impl GridConfig {
    /// Load and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        debug!("[GridConfig] Loaded {}", path.display());
        Self::from_yaml(&contents)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check all sections.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.grid.validate()
    }
}
