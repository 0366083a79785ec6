//! Terrain synthesis configuration.

use serde::{Deserialize, Serialize};

/// Thresholds for turning layered noise into a land/water mask and levels.
///
/// Heights here are the normalized composite land height in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Angle (radians) between successive noise layers; layer `k` is rotated
    /// about the Z axis by `k * rotation_angle`.
    pub rotation_angle: f64,
    /// Heights at or below this are sea.
    pub sea_level: f64,
    /// Pocket lakes only form above this height...
    pub lake_min_height: f64,
    /// ...where the lake-seed layer exceeds this value.
    pub lake_seed_threshold: f64,
    /// River layer values below this band carve a river.
    pub river_band: f64,
    /// Rivers only carve land above this height.
    pub river_min_height: f64,
    /// Faces smaller than this get no rivers.
    pub river_min_size: u32,
    /// Faces smaller than this get no coastal noise.
    pub coastal_min_size: u32,
    /// Beach probe radius is `max(1, size / beach_probe_divisor)`.
    pub beach_probe_divisor: u32,
    /// Keep the per-layer scalar fields on each face for inspection.
    pub keep_layers: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            rotation_angle: 1.27409,
            sea_level: 0.3,
            lake_min_height: 0.4,
            lake_seed_threshold: 0.7,
            river_band: 0.1,
            river_min_height: 0.25,
            river_min_size: 10,
            coastal_min_size: 20,
            beach_probe_divisor: 100,
            keep_layers: false,
        }
    }
}
