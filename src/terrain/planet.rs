//! Planet and FaceGrid data structures.

use serde::{Deserialize, Serialize};

use crate::geometry::Face;

/// Lowest and highest land elevation levels.
pub const MIN_LAND_LEVEL: u8 = 4;
pub const MAX_LAND_LEVEL: u8 = 10;

/// Ocean depth levels.
pub const DEEP: f32 = 1.0;
pub const MEDIUM: f32 = 2.0;
pub const SHALLOW: f32 = 3.0;

/// A generated planet: six face grids of equal size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Seed text the planet was generated from.
    pub seed: String,
    /// Side length of every face in pixels.
    pub size: u32,
    /// Face grids indexed by [`Face::index`].
    pub faces: [FaceGrid; 6],
}

impl Planet {
    /// Creates an all-water planet (every cell deep ocean).
    pub fn new(seed: &str, size: u32) -> Self {
        Self {
            seed: seed.to_string(),
            size,
            faces: Face::all().map(|id| FaceGrid::new(id, size)),
        }
    }

    /// Returns a reference to a specific face.
    pub fn face(&self, id: Face) -> &FaceGrid {
        &self.faces[id.index()]
    }

    /// Returns a mutable reference to a specific face.
    pub fn face_mut(&mut self, id: Face) -> &mut FaceGrid {
        &mut self.faces[id.index()]
    }

    /// Total cells across all six faces.
    pub fn pixel_count(&self) -> usize {
        self.faces.iter().map(FaceGrid::pixel_count).sum()
    }

    /// Fraction of cells that are land.
    pub fn land_fraction(&self) -> f64 {
        let total = self.pixel_count();
        if total == 0 {
            return 0.0;
        }
        let land: usize = self.faces.iter().map(FaceGrid::land_count).sum();
        land as f64 / total as f64
    }

    /// Recomputes every face's normalized height field.
    pub fn refresh_height_fields(&mut self) {
        for face in &mut self.faces {
            face.refresh_height_field();
        }
    }
}

/// Per-layer scalar fields kept for diagnostic display.
///
/// Each field holds the layer sample plus 0.5, clamped to [0, 1]. Rivers
/// hold the raw band value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainLayers {
    pub continents: Vec<f32>,
    pub islands: Vec<f32>,
    pub mountains: Vec<f32>,
    pub rivers: Vec<f32>,
    pub hills: Vec<f32>,
    pub details: Vec<f32>,
    pub tectonics: Vec<f32>,
    pub lakes: Vec<f32>,
}

impl TerrainLayers {
    pub fn new(len: usize) -> Self {
        Self {
            continents: vec![0.0; len],
            islands: vec![0.0; len],
            mountains: vec![0.0; len],
            rivers: vec![0.0; len],
            hills: vec![0.0; len],
            details: vec![0.0; len],
            tectonics: vec![0.0; len],
            lakes: vec![0.0; len],
        }
    }
}

/// One face of the cube with its classification and level grids.
///
/// All arrays are row-major (`y * size + x`). For every cell exactly one of
/// `water_level` / `land_level` is meaningful and the other is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceGrid {
    /// Which face of the cube this represents.
    pub id: Face,
    /// Width and height in pixels.
    pub size: u32,
    /// Water/land classification.
    pub is_water: Vec<bool>,
    /// Water level: 1=deep, 2=medium, 3=shallow for seas and rivers; leveled
    /// lakes carry their shore elevation (4..=10). Zero on land.
    pub water_level: Vec<f32>,
    /// Land elevation level in 4..=10. Zero on water.
    pub land_level: Vec<u8>,
    /// `level / 10` of whichever level applies.
    pub height_field: Vec<f32>,
    /// Noise layers that produced the face (only with `keep_layers`).
    #[serde(skip)]
    pub layers: Option<TerrainLayers>,
}

impl FaceGrid {
    /// Creates an all-water face at deep-ocean level.
    pub fn new(id: Face, size: u32) -> Self {
        let n = (size as usize) * (size as usize);
        Self {
            id,
            size,
            is_water: vec![true; n],
            water_level: vec![DEEP; n],
            land_level: vec![0; n],
            height_field: vec![DEEP / 10.0; n],
            layers: None,
        }
    }

    /// Row-major index of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.size && y < self.size);
        (y as usize) * (self.size as usize) + x as usize
    }

    /// Returns the total number of pixels in this face.
    pub fn pixel_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    pub fn is_water_at(&self, x: u32, y: u32) -> bool {
        self.is_water[self.index(x, y)]
    }

    /// Marks a cell as land at `level`.
    pub fn set_land(&mut self, x: u32, y: u32, level: u8) {
        let i = self.index(x, y);
        self.set_land_at(i, level);
    }

    pub fn set_land_at(&mut self, i: usize, level: u8) {
        debug_assert!((MIN_LAND_LEVEL..=MAX_LAND_LEVEL).contains(&level));
        self.is_water[i] = false;
        self.water_level[i] = 0.0;
        self.land_level[i] = level;
    }

    /// Marks a cell as water at `level`.
    pub fn set_water(&mut self, x: u32, y: u32, level: f32) {
        let i = self.index(x, y);
        self.set_water_at(i, level);
    }

    pub fn set_water_at(&mut self, i: usize, level: f32) {
        self.is_water[i] = true;
        self.water_level[i] = level;
        self.land_level[i] = 0;
    }

    /// The level that applies to cell `i`, water or land.
    pub fn level_at(&self, i: usize) -> f32 {
        if self.is_water[i] {
            self.water_level[i]
        } else {
            self.land_level[i] as f32
        }
    }

    /// Recomputes `height_field` from the level arrays.
    pub fn refresh_height_field(&mut self) {
        for i in 0..self.is_water.len() {
            self.height_field[i] = self.level_at(i) / 10.0;
        }
    }

    pub fn land_count(&self) -> usize {
        self.is_water.iter().filter(|&&w| !w).count()
    }

    /// Returns an iterator over all (x, y) pixel coordinates in row-major order.
    pub fn pixel_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }
}
