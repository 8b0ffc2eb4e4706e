//! Default value functions for serde deserialization.

pub fn grid_size() -> usize {
    200
}

pub fn resolution() -> f64 {
    0.05
}

pub fn frame_id() -> String {
    "map".to_string()
}
