//! Per-face terrain synthesis from rotated fractal noise layers.
//!
//! Each face is built from local noise only. Ocean depth and lake levels
//! produced here are provisional; the hydrology stages correct them once all
//! six faces exist.

use glam::DVec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::TerrainConfig;
use super::planet::{FaceGrid, Planet, TerrainLayers, DEEP, MAX_LAND_LEVEL, MEDIUM, MIN_LAND_LEVEL, SHALLOW};
use crate::geometry::{pixel_to_uv, project_to_sphere, Face};
use crate::noise::{FractalLayer, ValueNoise};

/// A noise layer whose frequency follows the face size, so features keep
/// the same pixel footprint at every resolution.
#[derive(Debug, Clone, Copy)]
struct LayerSpec {
    /// Frequency is `size / size_divisor`.
    size_divisor: f64,
    octaves: u8,
    amplitude: f64,
    offset: f64,
    /// Multiple of the base rotation angle.
    rotation_steps: u32,
}

impl LayerSpec {
    const fn new(size_divisor: f64, octaves: u8, amplitude: f64, offset: f64, rotation_steps: u32) -> Self {
        Self {
            size_divisor,
            octaves,
            amplitude,
            offset,
            rotation_steps,
        }
    }
}

const CONTINENTS: LayerSpec = LayerSpec::new(80.0, 3, 0.7, 0.0, 0);
const ISLANDS: LayerSpec = LayerSpec::new(20.0, 4, 0.4, 100.0, 1);
const MOUNTAINS: LayerSpec = LayerSpec::new(40.0, 3, 0.5, 200.0, 2);
const RIVERS: LayerSpec = LayerSpec::new(4.0, 2, 1.0, 300.0, 3);
const HILLS: LayerSpec = LayerSpec::new(8.0, 4, 0.2, 400.0, 4);
const DETAILS: LayerSpec = LayerSpec::new(2.0, 3, 0.1, 500.0, 5);
const TECTONICS: LayerSpec = LayerSpec::new(60.0, 2, 1.0, 700.0, 6);
const LAKES: LayerSpec = LayerSpec::new(15.0, 3, 1.0, 600.0, 7);
const RIDGES: LayerSpec = LayerSpec::new(30.0, 2, 1.0, 1100.0, 8);
const COASTAL: LayerSpec = LayerSpec::new(6.0, 2, 0.05, 800.0, 9);

// Threshold-gated boosts: (layer threshold, height gate, gain).
const TECTONIC_UPLIFT: (f64, f64, f64) = (0.5, 0.25, 1.5);
const TECTONIC_PEAKS: (f64, f64, f64) = (0.75, 0.4, 2.0);
const RIDGE_BOOST: (f64, f64, f64) = (0.6, 0.5, 1.2);

/// A layer bound to one face size, with its rotation precomputed.
#[derive(Debug, Clone, Copy)]
struct BoundLayer {
    layer: FractalLayer,
    cos: f64,
    sin: f64,
}

impl BoundLayer {
    fn new(spec: LayerSpec, size: u32, rotation_angle: f64) -> Self {
        let angle = rotation_angle * spec.rotation_steps as f64;
        Self {
            layer: FractalLayer::new(spec.octaves, size as f64 / spec.size_divisor, spec.amplitude, spec.offset),
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    fn sample(&self, noise: &ValueNoise, p: DVec3) -> f64 {
        let rotated = DVec3::new(p.x * self.cos - p.y * self.sin, p.x * self.sin + p.y * self.cos, p.z);
        self.layer.sample(noise, rotated)
    }
}

/// All layers for one face size.
struct LayerStack {
    continents: BoundLayer,
    islands: BoundLayer,
    mountains: BoundLayer,
    rivers: BoundLayer,
    hills: BoundLayer,
    details: BoundLayer,
    tectonics: BoundLayer,
    lakes: BoundLayer,
    ridges: BoundLayer,
    coastal: BoundLayer,
    // Cheap unrotated estimate used by the beach probe.
    probe_continents: FractalLayer,
    probe_islands: FractalLayer,
}

impl LayerStack {
    fn new(size: u32, rotation_angle: f64) -> Self {
        let bind = |spec| BoundLayer::new(spec, size, rotation_angle);
        let continents = bind(CONTINENTS);
        let islands = bind(ISLANDS);
        Self {
            continents,
            islands,
            mountains: bind(MOUNTAINS),
            rivers: bind(RIVERS),
            hills: bind(HILLS),
            details: bind(DETAILS),
            tectonics: bind(TECTONICS),
            lakes: bind(LAKES),
            ridges: bind(RIDGES),
            coastal: bind(COASTAL),
            probe_continents: continents.layer.with_octaves(2),
            probe_islands: islands.layer.with_octaves(2),
        }
    }
}

/// Everything synthesis learns about one cell.
#[derive(Debug, Clone, Copy)]
struct CellSample {
    height: f64,
    continents: f64,
    islands: f64,
    mountains: f64,
    rivers: f64,
    hills: f64,
    details: f64,
    tectonics: f64,
    lakes: f64,
}

fn gated_boost(value: f64, height: f64, (threshold, gate, gain): (f64, f64, f64)) -> f64 {
    if value > threshold && height > gate {
        (value - threshold) * gain
    } else {
        0.0
    }
}

fn sample_cell(stack: &LayerStack, noise: &ValueNoise, p: DVec3, size: u32, config: &TerrainConfig) -> CellSample {
    let continents = stack.continents.sample(noise, p);
    let islands = stack.islands.sample(noise, p);
    let mountains = stack.mountains.sample(noise, p);
    let rivers = stack.rivers.sample(noise, p);
    let hills = stack.hills.sample(noise, p);
    let details = stack.details.sample(noise, p);
    let tectonics = stack.tectonics.sample(noise, p);
    let lakes = stack.lakes.sample(noise, p);

    let mut height = continents * 0.35 + islands * 0.2 + mountains * 0.3 + hills * 0.1 + details * 0.05;

    height += gated_boost(tectonics, height, TECTONIC_UPLIFT);
    height += gated_boost(tectonics, height, TECTONIC_PEAKS);

    let ridges = stack.ridges.sample(noise, p);
    height += gated_boost(ridges, height, RIDGE_BOOST);

    if size >= config.coastal_min_size && height > 0.15 && height < 0.4 {
        height += stack.coastal.sample(noise, p);
    }

    CellSample {
        height: height.clamp(0.0, 1.0),
        continents,
        islands,
        mountains,
        rivers,
        hills,
        details,
        tectonics,
        lakes,
    }
}

fn is_water_cell(cell: &CellSample, size: u32, config: &TerrainConfig) -> bool {
    let h = cell.height;
    if h <= config.sea_level {
        return true;
    }
    if h > config.lake_min_height && cell.lakes > config.lake_seed_threshold {
        return true;
    }
    size >= config.river_min_size && h > config.river_min_height && cell.rivers.abs() < config.river_band
}

/// Provisional depth from raw height; depth propagation replaces it later.
fn provisional_depth(height: f64) -> f32 {
    if height <= 0.1 {
        DEEP
    } else if height <= 0.2 {
        MEDIUM
    } else {
        SHALLOW
    }
}

/// Number of equal-width bands the land range is cut into. The top band
/// shares level 10 with the one below it.
const LAND_BANDS: f64 = 7.0;

/// Maps the land range `(sea_level, 1]` onto levels 4..=10.
fn quantize_land(height: f64, sea_level: f64) -> u8 {
    let level = ((height - sea_level) / (1.0 - sea_level) * LAND_BANDS).floor() + MIN_LAND_LEVEL as f64;
    level.clamp(MIN_LAND_LEVEL as f64, MAX_LAND_LEVEL as f64) as u8
}

/// Probes a ring of 8 directions at growing radius for sea, stopping at the first hit.
fn beach_has_water_nearby(
    stack: &LayerStack,
    noise: &ValueNoise,
    face: Face,
    size: u32,
    x: u32,
    y: u32,
    config: &TerrainConfig,
) -> bool {
    let radius = (size / config.beach_probe_divisor.max(1)).max(1);
    let last = size as i64 - 1;

    for r in 1..=radius {
        for k in 0..8 {
            let angle = k as f64 * std::f64::consts::FRAC_PI_4;
            let dx = (r as f64 * angle.cos()).round() as i64;
            let dy = (r as f64 * angle.sin()).round() as i64;

            let cx = (x as i64 + dx).clamp(0, last) as u32;
            let cy = (y as i64 + dy).clamp(0, last) as u32;
            if cx == x && cy == y {
                continue;
            }

            let (u, v) = pixel_to_uv(size, cx, cy);
            let p = project_to_sphere(face, u, v);
            let estimate = (stack.probe_continents.sample(noise, p) * 0.6 + stack.probe_islands.sample(noise, p) * 0.4)
                .clamp(0.0, 1.0);
            if estimate <= config.sea_level {
                return true;
            }
        }
    }

    false
}

/// Lifts kept layer samples to mid-grey so low-amplitude layers stay visible.
const LAYER_DISPLAY_OFFSET: f64 = 0.5;

/// Builds the provisional grid for one face.
pub fn synthesize_face(face: Face, size: u32, noise: &ValueNoise, config: &TerrainConfig) -> FaceGrid {
    let stack = LayerStack::new(size, config.rotation_angle);
    let mut grid = FaceGrid::new(face, size);
    let mut layers = config.keep_layers.then(|| TerrainLayers::new(grid.pixel_count()));

    for y in 0..size {
        for x in 0..size {
            let i = grid.index(x, y);
            let (u, v) = pixel_to_uv(size, x, y);
            let p = project_to_sphere(face, u, v);
            let cell = sample_cell(&stack, noise, p, size, config);

            if let Some(l) = layers.as_mut() {
                let centered = |v: f64| (v + LAYER_DISPLAY_OFFSET).clamp(0.0, 1.0) as f32;
                l.continents[i] = centered(cell.continents);
                l.islands[i] = centered(cell.islands);
                l.mountains[i] = centered(cell.mountains);
                l.rivers[i] = cell.rivers.abs().clamp(0.0, 1.0) as f32;
                l.hills[i] = centered(cell.hills);
                l.details[i] = centered(cell.details);
                l.tectonics[i] = centered(cell.tectonics);
                l.lakes[i] = centered(cell.lakes);
            }

            if is_water_cell(&cell, size, config) {
                grid.set_water_at(i, provisional_depth(cell.height));
                continue;
            }

            let mut level = quantize_land(cell.height, config.sea_level);
            if level == MIN_LAND_LEVEL && !beach_has_water_nearby(&stack, noise, face, size, x, y, config) {
                level = MIN_LAND_LEVEL + 1;
            }
            grid.set_land_at(i, level);
        }
    }

    grid.layers = layers;
    grid.refresh_height_field();
    grid
}

/// Synthesizes all six faces of `planet` in place.
///
/// Faces are independent at this stage, so the `parallel` feature may build
/// them concurrently without changing the result.
pub fn synthesize_planet(planet: &mut Planet, noise: &ValueNoise, config: &TerrainConfig) {
    let size = planet.size;

    #[cfg(feature = "parallel")]
    planet.faces.par_iter_mut().for_each(|grid| {
        *grid = synthesize_face(grid.id, size, noise, config);
    });

    #[cfg(not(feature = "parallel"))]
    for grid in planet.faces.iter_mut() {
        *grid = synthesize_face(grid.id, size, noise, config);
    }
}
