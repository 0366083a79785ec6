//! Connected water bodies across the whole cube, and their reclassification.
//!
//! Tiny bodies are filled in as land, small ones become leveled lakes and
//! anything larger is left as sea.

use std::collections::VecDeque;

use super::config::HydrologyConfig;
use crate::geometry::neighbors::{CARDINAL, MOORE};
use crate::geometry::{step, Face};
use crate::terrain::{Planet, MAX_LAND_LEVEL, MIN_LAND_LEVEL};

/// One cell of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub face: Face,
    pub x: u32,
    pub y: u32,
}

/// A 4-connected set of water cells, possibly spanning several faces.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBody {
    pub cells: Vec<CellRef>,
}

impl WaterBody {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Counts of water bodies by what classification did to them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterBodySummary {
    /// Bodies filled in as land.
    pub removed: usize,
    /// Bodies leveled to their shore.
    pub lakes: usize,
    /// Bodies left untouched.
    pub seas: usize,
}

/// Finds every water body with a 4-connected flood fill across seams.
///
/// Bodies come out in scan order: faces in [`Face::all`] order, then rows.
pub fn find_water_bodies(planet: &Planet) -> Vec<WaterBody> {
    let size = planet.size;
    let per_face = (size as usize) * (size as usize);
    let mut visited = vec![false; per_face * 6];
    let slot = |face: Face, x: u32, y: u32| face.index() * per_face + (y * size + x) as usize;

    let mut bodies = Vec::new();
    let mut queue: VecDeque<CellRef> = VecDeque::new();

    for grid in &planet.faces {
        for (x, y) in grid.pixel_coords() {
            if !grid.is_water_at(x, y) || visited[slot(grid.id, x, y)] {
                continue;
            }

            visited[slot(grid.id, x, y)] = true;
            queue.push_back(CellRef { face: grid.id, x, y });
            let mut cells = Vec::new();

            while let Some(cell) = queue.pop_front() {
                cells.push(cell);
                for (dx, dy) in CARDINAL {
                    let Some((nf, nx, ny)) = step(size, cell.face, cell.x, cell.y, dx, dy) else {
                        continue;
                    };
                    let n = slot(nf, nx, ny);
                    if !visited[n] && planet.face(nf).is_water_at(nx, ny) {
                        visited[n] = true;
                        queue.push_back(CellRef { face: nf, x: nx, y: ny });
                    }
                }
            }

            bodies.push(WaterBody { cells });
        }
    }

    bodies
}

/// Land/water state before any body is rewritten.
struct Snapshot {
    is_water: [Vec<bool>; 6],
    land_level: [Vec<u8>; 6],
}

impl Snapshot {
    fn take(planet: &Planet) -> Self {
        Self {
            is_water: Face::all().map(|f| planet.face(f).is_water.clone()),
            land_level: Face::all().map(|f| planet.face(f).land_level.clone()),
        }
    }

    /// Land level at a cell, or `None` where there was water.
    fn land(&self, planet: &Planet, face: Face, x: u32, y: u32) -> Option<u8> {
        let i = planet.face(face).index(x, y);
        (!self.is_water[face.index()][i]).then(|| self.land_level[face.index()][i])
    }
}

/// Rounded mean of the 8 surrounding land levels, clamped into the land range.
fn puddle_fill_level(planet: &Planet, snapshot: &Snapshot, cell: CellRef) -> u8 {
    let mut sum = 0u32;
    let mut count = 0u32;
    for (dx, dy) in MOORE {
        let Some((nf, nx, ny)) = step(planet.size, cell.face, cell.x, cell.y, dx, dy) else {
            continue;
        };
        if let Some(level) = snapshot.land(planet, nf, nx, ny) {
            sum += level as u32;
            count += 1;
        }
    }

    let mean = if count == 0 {
        0.0
    } else {
        (sum as f64 / count as f64).round()
    };
    mean.clamp(MIN_LAND_LEVEL as f64, MAX_LAND_LEVEL as f64) as u8
}

/// Lowest land level on the 4-connected shore of a body.
fn shore_level(planet: &Planet, snapshot: &Snapshot, body: &WaterBody) -> Option<u8> {
    body.cells
        .iter()
        .flat_map(|cell| {
            CARDINAL
                .into_iter()
                .filter_map(move |(dx, dy)| step(planet.size, cell.face, cell.x, cell.y, dx, dy))
        })
        .filter_map(|(nf, nx, ny)| snapshot.land(planet, nf, nx, ny))
        .min()
}

/// Removes puddles and levels lakes across the whole planet.
///
/// All neighbor lookups read the state from before this call, so the result
/// does not depend on the order bodies are visited. Running it twice gives
/// the same planet as running it once.
pub fn classify_water_bodies(planet: &mut Planet, config: &HydrologyConfig) -> WaterBodySummary {
    let bodies = find_water_bodies(planet);
    let snapshot = Snapshot::take(planet);
    let max_lake = config.max_lake_cells(planet.size);
    let mut summary = WaterBodySummary::default();

    for body in &bodies {
        if body.len() <= config.min_body_cells {
            let levels: Vec<u8> = body
                .cells
                .iter()
                .map(|&cell| puddle_fill_level(planet, &snapshot, cell))
                .collect();
            for (cell, level) in body.cells.iter().zip(levels) {
                planet.face_mut(cell.face).set_land(cell.x, cell.y, level);
            }
            summary.removed += 1;
        } else if body.len() <= max_lake {
            if let Some(shore) = shore_level(planet, &snapshot, body) {
                let level = shore.max(MIN_LAND_LEVEL) as f32;
                for cell in &body.cells {
                    planet.face_mut(cell.face).set_water(cell.x, cell.y, level);
                }
            }
            summary.lakes += 1;
        } else {
            summary.seas += 1;
        }
    }

    planet.refresh_height_fields();
    log::debug!(
        "Water bodies: {} removed, {} lakes, {} seas (lake limit {} cells)",
        summary.removed,
        summary.lakes,
        summary.seas,
        max_lake
    );
    summary
}
