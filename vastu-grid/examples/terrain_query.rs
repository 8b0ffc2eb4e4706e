//! Terrain query example.
//!
//! This example demonstrates:
//! - Building grids from a YAML config (optional file argument)
//! - Keeping elevation and traversability in a layered map
//! - Querying a multi-level map with a robot footprint under a bridge
//!
//! # Usage
//!
//! ```bash
//! cargo run --example terrain_query -- configs/grid.yaml
//! ```

use std::path::Path;

use log::info;

use vastu_grid::{
    AlignedBox3, GridAccess, GridConfig, GridIndex, HeightPatch, Point3, VerticalExtent,
};

/// Deck height of the bridge (meters)
const DECK: (f64, f64) = (1.6, 1.8);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GridConfig::load(Path::new(&path))?,
        None => GridConfig::from_yaml("grid:\n  width: 80\n  height: 40\n  frame_id: terrain\n")?,
    };
    let section = &config.grid;
    info!(
        "Grid {}x{} at {:.3} m, frame '{}'",
        section.width, section.height, section.resolution_x, section.frame_id
    );

    // Surface patches: gentle ramp everywhere, bridge deck over the middle third
    let mut surfaces = section.build_multi_level::<HeightPatch>()?;
    let n = surfaces.num_cells();
    let (bridge_start, bridge_end) = (n.width as i32 / 3, 2 * n.width as i32 / 3);
    for y in 0..n.height as i32 {
        for x in 0..n.width as i32 {
            let ground = 0.002 * x as f64;
            surfaces.insert_patch(GridIndex::new(x, y), HeightPatch::new(ground - 0.05, ground))?;
            if (bridge_start..bridge_end).contains(&x) {
                surfaces.insert_patch(GridIndex::new(x, y), HeightPatch::new(DECK.0, DECK.1))?;
            }
        }
    }
    info!("Inserted {} patches", surfaces.patch_count());

    // Layers derived from the lowest surface of each cell
    let mut layers = section.build_layered()?;
    layers.add_layer("elevation", f32::NAN)?;
    layers.add_layer("clearance", f32::INFINITY)?;
    for (index, levels) in surfaces.indexed_iter() {
        let Some(ground) = levels.first() else {
            continue;
        };
        *layers.layer_mut::<f32>("elevation")?.at_mut(index)? = ground.max_z() as f32;
        if let Some(above) = levels.get(1) {
            *layers.layer_mut::<f32>("clearance")?.at_mut(index)? =
                (above.min_z() - ground.max_z()) as f32;
        }
    }
    if let Some((lo, hi)) = layers.layer::<f32>("elevation")?.elevation_range() {
        info!("Elevation range {:.3}..{:.3} m", lo, hi);
    }

    // Robot footprint centered under the bridge, 0.5 m tall
    let size = surfaces.size_m();
    let center = Point3::new(size.x / 2.0, size.y / 2.0, 0.0);
    let footprint = AlignedBox3::new(
        Point3::new(center.x - 0.2, center.y - 0.2, center.z - 0.1),
        Point3::new(center.x + 0.2, center.y + 0.2, center.z + 0.5),
    );

    let hits = surfaces.intersect_aabb(&footprint);
    let collides = surfaces.intersect_aabb_with(&footprint, |_, patch| patch.min_z() > 0.3);
    info!(
        "Footprint touches {} patches, hits the deck: {}",
        hits.len(),
        collides
    );

    let (view, count) = surfaces.intersect_cuboid_counted(&footprint);
    info!(
        "View {} at source {}, {} references",
        view.num_cells(),
        view.origin(),
        count
    );
    for (index, patch) in view.patches().take(3) {
        info!("  {} -> [{:.3}, {:.3}]", index, patch.min, patch.max);
    }

    Ok(())
}
