//! Error types for VastuGrid

use thiserror::Error;

use crate::core::{GridIndex, GridSize};

/// Result type alias
pub type Result<T> = std::result::Result<T, GridError>;

/// Grid access and layer registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Index outside the grid extent
    #[error("index {index} is outside the grid of {num_cells} cells")]
    OutOfBounds {
        /// Requested index
        index: GridIndex,
        /// Grid extent at the time of the access
        num_cells: GridSize,
    },

    /// A layer with this key is already registered
    #[error("layer '{0}' already exists")]
    LayerExists(String),

    /// No layer with this key
    #[error("layer '{0}' not found")]
    LayerNotFound(String),

    /// The layer exists but stores a different element type
    #[error("layer '{key}' stores {stored}, not {requested}")]
    TypeMismatch {
        /// Layer key
        key: String,
        /// Element type asked for
        requested: &'static str,
        /// Element type actually stored
        stored: &'static str,
    },
}

impl GridError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::LayerExists(_) => "LAYER_EXISTS",
            Self::LayerNotFound(_) => "LAYER_NOT_FOUND",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridError::OutOfBounds {
            index: GridIndex::new(5, -1),
            num_cells: GridSize::new(4, 4),
        };
        assert_eq!(err.to_string(), "index (5, -1) is outside the grid of 4x4 cells");

        let err = GridError::TypeMismatch {
            key: "elevation".to_string(),
            requested: "u8",
            stored: "f32",
        };
        assert_eq!(err.to_string(), "layer 'elevation' stores f32, not u8");
    }

    #[test]
    fn test_error_code() {
        assert_eq!(GridError::LayerExists("a".into()).code(), "LAYER_EXISTS");
        assert_eq!(GridError::LayerNotFound("a".into()).code(), "LAYER_NOT_FOUND");
    }
}
