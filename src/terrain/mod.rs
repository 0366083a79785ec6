//! Terrain module.
//!
//! Provides the Planet and FaceGrid data structures and the per-face
//! synthesis that fills them from layered noise.

mod config;
mod planet;
mod heightmap;

pub use config::TerrainConfig;
pub use planet::{FaceGrid, Planet, TerrainLayers, DEEP, MAX_LAND_LEVEL, MEDIUM, MIN_LAND_LEVEL, SHALLOW};
pub use heightmap::{synthesize_face, synthesize_planet};
