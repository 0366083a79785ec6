//! Biome classes and display data derived from final levels.
//!
//! Levels 1..=3 are ocean depths and 4..=10 are land elevations. Lakes carry
//! a land-range level but always display as water.

use crate::terrain::FaceGrid;

/// Biome class for each level. `level()` is stable and matches the grid levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    DeepOcean = 1,
    Ocean = 2,
    ShallowWater = 3,
    Beach = 4,
    Lowlands = 5,
    Hills = 6,
    Highlands = 7,
    Mountains = 8,
    HighMountains = 9,
    SnowPeaks = 10,
}

impl Biome {
    /// All biomes from deepest to highest.
    pub const fn all() -> [Biome; 10] {
        [
            Biome::DeepOcean,
            Biome::Ocean,
            Biome::ShallowWater,
            Biome::Beach,
            Biome::Lowlands,
            Biome::Hills,
            Biome::Highlands,
            Biome::Mountains,
            Biome::HighMountains,
            Biome::SnowPeaks,
        ]
    }

    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Biome for a level, or `None` outside 1..=10.
    pub fn from_level(level: u8) -> Option<Biome> {
        Biome::all().get((level as usize).checked_sub(1)?).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::DeepOcean => "deep ocean",
            Biome::Ocean => "ocean",
            Biome::ShallowWater => "shallow water",
            Biome::Beach => "beach",
            Biome::Lowlands => "lowlands",
            Biome::Hills => "hills",
            Biome::Highlands => "highlands",
            Biome::Mountains => "mountains",
            Biome::HighMountains => "high mountains",
            Biome::SnowPeaks => "snow peaks",
        }
    }

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Biome::DeepOcean => [5, 15, 60],
            Biome::Ocean => [15, 35, 90],
            Biome::ShallowWater => [30, 60, 130],
            Biome::Beach => [220, 200, 160],
            Biome::Lowlands => [120, 180, 80],
            Biome::Hills => [100, 150, 70],
            Biome::Highlands => [140, 120, 80],
            Biome::Mountains => [160, 140, 100],
            Biome::HighMountains => [180, 160, 140],
            Biome::SnowPeaks => [240, 240, 250],
        }
    }

    pub const fn is_water(self) -> bool {
        self.level() <= 3
    }
}

/// Palette color for a level; black outside 1..=10.
pub fn biome_rgb(level: u8) -> [u8; 3] {
    Biome::from_level(level).map_or([0, 0, 0], Biome::rgb)
}

/// Grey value (0..=15) for the relief view.
///
/// Seas and rivers are flat at 0. Lakes sit one step below land of the same
/// level so their basins stay visible.
pub fn relief_value(level: u8, is_water: bool) -> u8 {
    const LAND: [u8; 11] = [0, 0, 0, 0, 1, 2, 3, 5, 8, 11, 15];
    const LAKE: [u8; 11] = [0, 0, 0, 0, 0, 1, 2, 4, 7, 10, 14];
    let table = if is_water { &LAKE } else { &LAND };
    table.get(level as usize).copied().unwrap_or(0)
}

impl FaceGrid {
    /// Display biome of cell `i`. Water shows its depth, capped at shallow.
    pub fn biome_at(&self, i: usize) -> Biome {
        let level = if self.is_water[i] {
            (self.water_level[i].round() as u8).clamp(1, 3)
        } else {
            self.land_level[i]
        };
        Biome::from_level(level).unwrap_or(Biome::DeepOcean)
    }

    /// Palette color of every cell, row-major.
    pub fn biome_colors(&self) -> Vec<[u8; 3]> {
        (0..self.pixel_count()).map(|i| self.biome_at(i).rgb()).collect()
    }

    /// Relief view values of every cell, row-major.
    pub fn relief_values(&self) -> Vec<u8> {
        (0..self.pixel_count())
            .map(|i| {
                if self.is_water[i] {
                    relief_value(self.water_level[i].round() as u8, true)
                } else {
                    relief_value(self.land_level[i], false)
                }
            })
            .collect()
    }
}
