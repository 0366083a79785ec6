//! Cross-face hydrology.
//!
//! Both passes run once all six faces exist and walk the stitched cube
//! through the seam table.

mod config;
pub mod depth;
pub mod water_bodies;

pub use config::HydrologyConfig;
pub use depth::{compute_distance_map, depth_level_for_distance, propagate_depth, DistanceMap};
pub use water_bodies::{classify_water_bodies, find_water_bodies, CellRef, WaterBody, WaterBodySummary};
