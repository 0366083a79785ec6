//! Seamless cube-sphere terrain generation.
//!
//! Six square face grids are filled from seeded value noise sampled on the
//! unit sphere, then corrected by passes that walk the whole cube across its
//! seams: ocean depth by distance to land, and water bodies sorted into
//! puddles, lakes and seas.

pub mod geometry;
pub mod noise;
pub mod terrain;
pub mod hydrology;
pub mod biomes;
pub mod config;
pub mod pipeline;

pub use geometry::{Edge, Face, FaceCoord};
pub use noise::ValueNoise;
pub use terrain::{FaceGrid, Planet, TerrainConfig};
pub use hydrology::HydrologyConfig;
pub use biomes::Biome;
pub use config::{ConfigError, GenerationConfig};
pub use pipeline::{generate_planet, GenerationStage, Pipeline, PipelineError};
