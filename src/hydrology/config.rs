//! Configuration for the cross-face hydrology passes.

use serde::{Deserialize, Serialize};

/// Distance bands for ocean depth and size limits for water bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrologyConfig {
    /// Water within this many cells of land is always shallow.
    pub shallow_min_distance: f32,
    /// Beyond this distance from land water is deep.
    pub shallow_max_distance: f32,
    /// Extra search radius past `shallow_max_distance`.
    pub search_margin: f32,
    /// Bodies with at most this many cells are filled in as land.
    pub min_body_cells: usize,
    /// Lower bound on the largest body still treated as a lake.
    pub min_lake_cells: usize,
    /// Largest lake as a fraction of one face's cell count.
    pub lake_area_fraction: f64,
}

impl Default for HydrologyConfig {
    fn default() -> Self {
        Self {
            shallow_min_distance: 2.0,
            shallow_max_distance: 15.0,
            search_margin: 5.0,
            min_body_cells: 5,
            min_lake_cells: 20,
            lake_area_fraction: 0.1,
        }
    }
}

impl HydrologyConfig {
    /// Search radius in cells for a face of `size`.
    ///
    /// Small faces search a quarter of their width at most.
    pub fn search_radius(&self, size: u32) -> f32 {
        (self.shallow_max_distance + self.search_margin).min(size as f32 / 4.0)
    }

    /// Largest body, in cells, that counts as a lake on faces of `size`.
    pub fn max_lake_cells(&self, size: u32) -> usize {
        let area = (size as f64) * (size as f64) * self.lake_area_fraction;
        (area.floor() as usize).max(self.min_lake_cells)
    }
}
