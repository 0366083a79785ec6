//! Noise generation module for terrain synthesis.
//!
//! A seeded lattice value noise with smoothstep interpolation, and fractal
//! sums of it.

mod value;
mod fractal;

pub use value::{seed_hash, ValueNoise};
pub use fractal::FractalLayer;
