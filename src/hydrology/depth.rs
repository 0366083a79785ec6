//! Ocean depth from distance to the nearest land, measured across seams.
//!
//! Synthesis only sees one face, so its depths stop at face edges. This pass
//! runs a multi-source Dijkstra from every land cell over the stitched
//! six-face graph and rebands every water cell by the result.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::config::HydrologyConfig;
use crate::geometry::neighbors::MOORE;
use crate::geometry::{step, Face};
use crate::terrain::{Planet, DEEP, MEDIUM, SHALLOW};

#[derive(Clone, Copy, Debug)]
struct HeapItem {
    dist: f32,
    idx: u32,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist && self.idx == other.idx
    }
}

impl Eq for HeapItem {}

// Min-heap by distance via reversed ordering.
impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

fn global_index(size: u32, face: Face, x: u32, y: u32) -> u32 {
    face.index() as u32 * size * size + y * size + x
}

fn decode_index(size: u32, idx: u32) -> Option<(Face, u32, u32)> {
    let per_face = size * size;
    let local = idx % per_face;
    let face = Face::from_index((idx / per_face) as usize)?;
    Some((face, local % size, local / size))
}

/// Distance in cells from every cell to the nearest land cell.
///
/// Land is 0. Water outside the search radius stays at infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    size: u32,
    dist: Vec<f32>,
}

impl DistanceMap {
    fn unreached(size: u32) -> Self {
        let total = 6 * (size as usize) * (size as usize);
        Self {
            size,
            dist: vec![f32::INFINITY; total],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn get(&self, face: Face, x: u32, y: u32) -> f32 {
        self.dist[global_index(self.size, face, x, y) as usize]
    }

    /// Distances for one face, row-major.
    pub fn face(&self, face: Face) -> &[f32] {
        let per_face = (self.size as usize) * (self.size as usize);
        let start = face.index() * per_face;
        &self.dist[start..start + per_face]
    }

    /// Number of cells with a finite distance.
    pub fn reached_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_finite()).count()
    }
}

/// Runs the multi-source shortest-path search from all land cells.
///
/// Cardinal steps cost 1 and diagonal steps cost √2. Diagonal steps that
/// would cross a seam are skipped. Cells farther than the search radius are
/// never expanded.
pub fn compute_distance_map(planet: &Planet, config: &HydrologyConfig) -> DistanceMap {
    let size = planet.size;
    let radius = config.search_radius(size);
    let mut map = DistanceMap::unreached(size);
    let mut heap = BinaryHeap::<HeapItem>::new();

    for grid in &planet.faces {
        for (x, y) in grid.pixel_coords() {
            if !grid.is_water_at(x, y) {
                let idx = global_index(size, grid.id, x, y);
                map.dist[idx as usize] = 0.0;
                heap.push(HeapItem { dist: 0.0, idx });
            }
        }
    }

    while let Some(HeapItem { dist, idx }) = heap.pop() {
        if dist > map.dist[idx as usize] {
            continue;
        }
        let Some((face, x, y)) = decode_index(size, idx) else {
            continue;
        };

        for (dx, dy) in MOORE {
            let Some((nf, nx, ny)) = step(size, face, x, y, dx, dy) else {
                continue;
            };
            let cost = if dx != 0 && dy != 0 { std::f32::consts::SQRT_2 } else { 1.0 };
            let n_idx = global_index(size, nf, nx, ny);
            let candidate = dist + cost;

            if candidate < map.dist[n_idx as usize] {
                map.dist[n_idx as usize] = candidate;
                if candidate <= radius {
                    heap.push(HeapItem { dist: candidate, idx: n_idx });
                }
            }
        }
    }

    map
}

/// Maps a distance from land to a depth level.
///
/// Within `shallow_min_distance` water is shallow. Up to
/// `shallow_max_distance` the nearer half of the band is shallow and the far
/// half medium. Everything beyond is deep.
pub fn depth_level_for_distance(distance: f32, config: &HydrologyConfig) -> f32 {
    let near = config.shallow_min_distance;
    let far = config.shallow_max_distance;

    if distance <= near {
        SHALLOW
    } else if distance <= far {
        let ratio = (distance - near) / (far - near);
        if ratio < 0.5 {
            SHALLOW
        } else {
            MEDIUM
        }
    } else {
        DEEP
    }
}

/// Rewrites every water cell's depth from its cross-face distance to land.
///
/// A planet with no land keeps its provisional depths.
pub fn propagate_depth(planet: &mut Planet, config: &HydrologyConfig) {
    let land: usize = planet.faces.iter().map(|f| f.land_count()).sum();
    if land == 0 {
        log::debug!("No land on planet; keeping provisional ocean depths");
        return;
    }

    let map = compute_distance_map(planet, config);
    log::debug!(
        "Depth search reached {} of {} cells (radius {:.1})",
        map.reached_count(),
        planet.pixel_count(),
        config.search_radius(planet.size)
    );

    for grid in planet.faces.iter_mut() {
        let distances = map.face(grid.id);
        for (i, &d) in distances.iter().enumerate() {
            if grid.is_water[i] {
                grid.water_level[i] = depth_level_for_distance(d, config);
            }
        }
        grid.refresh_height_field();
    }
}
