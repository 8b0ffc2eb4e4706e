//! Test utilities for VastuGrid integration tests.
//!
//! Builders for small terrain scenes with known patch layouts.

#![allow(dead_code)]

use vastu_grid::{
    AlignedBox3, GridIndex, GridSize, HeightPatch, MultiLevelGridMap, Point3, Resolution,
};

/// Initialise logging once per test binary.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Flat floor at z = 0 in every cell.
pub fn flat_floor(width: usize, height: usize, resolution: f64) -> MultiLevelGridMap<HeightPatch> {
    let mut map = MultiLevelGridMap::new(
        GridSize::new(width, height),
        Resolution::uniform(resolution),
    );
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            map.insert_patch(GridIndex::new(x, y), HeightPatch::new(-0.02, 0.0))
                .unwrap();
        }
    }
    map
}

/// Floor everywhere plus a bridge deck at 2 m over columns `x0..x1`.
pub fn bridge_scene(
    width: usize,
    height: usize,
    resolution: f64,
    x0: i32,
    x1: i32,
) -> MultiLevelGridMap<HeightPatch> {
    let mut map = flat_floor(width, height, resolution);
    for y in 0..height as i32 {
        for x in x0..x1 {
            map.insert_patch(GridIndex::new(x, y), HeightPatch::new(2.0, 2.2))
                .unwrap();
        }
    }
    map
}

/// Query box over the xy rectangle `[x0, x1] x [y0, y1]` and heights `[z0, z1]`.
pub fn query_box(x0: f64, y0: f64, x1: f64, y1: f64, z0: f64, z1: f64) -> AlignedBox3 {
    AlignedBox3::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))
}
