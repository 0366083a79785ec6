//! Seam-aware cube-face neighbor mapping.
//!
//! Used by the cross-face depth propagation and water-body flood fill. The
//! table is derived from the face orientation defined in `face_uv_to_cube`
//! in `cube_sphere.rs`: stepping off a face lands on the neighbor's edge
//! pixel that projects to the same 3-D point.

use super::face::{Edge, Face};

/// Where a face edge leads: the neighboring face, the edge of that face it
/// joins, and whether the coordinate along the edge runs backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeamLink {
    pub face: Face,
    pub edge: Edge,
    pub reversed: bool,
}

const fn link(face: Face, edge: Edge, reversed: bool) -> SeamLink {
    SeamLink { face, edge, reversed }
}

/// Returns the seam link for `edge` of `face`.
///
/// Every entry is reciprocal: if `adjacency(a, e) = (b, e')` then
/// `adjacency(b, e') = (a, e)` with the same reversal flag.
pub const fn adjacency(face: Face, edge: Edge) -> SeamLink {
    use Edge::*;

    match (face, edge) {
        // --- Front (+Z) ---
        (Face::Front, Top) => link(Face::Top, Bottom, false),
        (Face::Front, Right) => link(Face::Right, Left, false),
        (Face::Front, Bottom) => link(Face::Bottom, Top, false),
        (Face::Front, Left) => link(Face::Left, Right, false),

        // --- Back (-Z) ---
        (Face::Back, Top) => link(Face::Top, Top, true),
        (Face::Back, Right) => link(Face::Left, Left, false),
        (Face::Back, Bottom) => link(Face::Bottom, Bottom, true),
        (Face::Back, Left) => link(Face::Right, Right, false),

        // --- Right (+X) ---
        (Face::Right, Top) => link(Face::Top, Right, true),
        (Face::Right, Right) => link(Face::Back, Left, false),
        (Face::Right, Bottom) => link(Face::Bottom, Right, false),
        (Face::Right, Left) => link(Face::Front, Right, false),

        // --- Left (-X) ---
        (Face::Left, Top) => link(Face::Top, Left, false),
        (Face::Left, Right) => link(Face::Front, Left, false),
        (Face::Left, Bottom) => link(Face::Bottom, Left, true),
        (Face::Left, Left) => link(Face::Back, Right, false),

        // --- Top (+Y) ---
        (Face::Top, Top) => link(Face::Back, Top, true),
        (Face::Top, Right) => link(Face::Right, Top, true),
        (Face::Top, Bottom) => link(Face::Front, Top, false),
        (Face::Top, Left) => link(Face::Left, Top, false),

        // --- Bottom (-Y) ---
        (Face::Bottom, Top) => link(Face::Front, Bottom, false),
        (Face::Bottom, Right) => link(Face::Right, Bottom, false),
        (Face::Bottom, Bottom) => link(Face::Back, Bottom, true),
        (Face::Bottom, Left) => link(Face::Left, Bottom, true),
    }
}

/// Converts a pixel on the crossed `edge` of `face` into the matching
/// in-range pixel on the neighboring face.
///
/// Only the coordinate running along the edge matters (x for top/bottom,
/// y for left/right); it is carried over as-is, reversed, or moved onto the
/// other axis depending on how the neighbor edge is oriented.
pub fn remap_seam_coordinate(face: Face, edge: Edge, x: u32, y: u32, size: u32) -> (Face, u32, u32) {
    debug_assert!(x < size && y < size, "remap expects the last in-face pixel");
    let last = size - 1;

    let along = if edge.is_horizontal() { x } else { y };
    let seam = adjacency(face, edge);
    let along = if seam.reversed { last - along } else { along };

    let (nx, ny) = match seam.edge {
        Edge::Top => (along, 0),
        Edge::Right => (last, along),
        Edge::Bottom => (along, last),
        Edge::Left => (0, along),
    };

    (seam.face, nx, ny)
}

/// Takes one step of `(dx, dy)` from pixel `(x, y)`, crossing a seam if needed.
///
/// `dx, dy` must each be in -1..=1. Steps inside the face always resolve.
/// A cardinal step off the face resolves through the seam table. A diagonal
/// step that would leave the face returns `None`: corner crossings are not
/// modeled and callers skip them.
pub fn step(size: u32, face: Face, x: u32, y: u32, dx: i32, dy: i32) -> Option<(Face, u32, u32)> {
    debug_assert!(x < size && y < size);
    debug_assert!(dx.abs() <= 1 && dy.abs() <= 1);

    let nx = x as i64 + dx as i64;
    let ny = y as i64 + dy as i64;
    let n = size as i64;

    let x_inside = (0..n).contains(&nx);
    let y_inside = (0..n).contains(&ny);

    if x_inside && y_inside {
        return Some((face, nx as u32, ny as u32));
    }

    if dx != 0 && dy != 0 {
        return None;
    }

    let edge = if nx < 0 {
        Edge::Left
    } else if nx >= n {
        Edge::Right
    } else if ny < 0 {
        Edge::Top
    } else {
        Edge::Bottom
    };

    Some(remap_seam_coordinate(face, edge, x, y, size))
}

/// Cardinal offsets in the order the flood fill and lake scan visit them.
pub const CARDINAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The eight Moore-neighborhood offsets, row by row.
pub const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FaceCoord;

    #[test]
    fn test_adjacency_is_reciprocal() {
        for face in Face::all() {
            for edge in Edge::all() {
                let there = adjacency(face, edge);
                let back = adjacency(there.face, there.edge);
                assert_eq!(
                    (back.face, back.edge),
                    (face, edge),
                    "{:?}/{:?} -> {:?}/{:?} does not lead back",
                    face,
                    edge,
                    there.face,
                    there.edge
                );
                assert_eq!(back.reversed, there.reversed);
                assert_ne!(there.face, face);
            }
        }
    }

    #[test]
    fn test_every_face_touches_four_distinct_neighbors() {
        for face in Face::all() {
            let mut seen: Vec<Face> = Edge::all().iter().map(|&e| adjacency(face, e).face).collect();
            seen.sort_by_key(|f| f.index());
            seen.dedup();
            assert_eq!(seen.len(), 4, "{:?} neighbors: {:?}", face, seen);
        }
    }

    #[test]
    fn test_seam_pixels_project_to_same_point() {
        for size in [2u32, 5, 16] {
            let last = size - 1;
            for face in Face::all() {
                for edge in Edge::all() {
                    for a in 0..size {
                        let (x, y) = match edge {
                            Edge::Top => (a, 0),
                            Edge::Right => (last, a),
                            Edge::Bottom => (a, last),
                            Edge::Left => (0, a),
                        };
                        let (nf, nx, ny) = remap_seam_coordinate(face, edge, x, y, size);
                        let p0 = FaceCoord::from_pixel(face, size, x, y).to_sphere_point();
                        let p1 = FaceCoord::from_pixel(nf, size, nx, ny).to_sphere_point();
                        assert!(
                            (p0 - p1).length() < 1e-9,
                            "size {} {:?} ({},{}) -> {:?} ({},{}) differ: {:?} vs {:?}",
                            size,
                            face,
                            x,
                            y,
                            nf,
                            nx,
                            ny,
                            p0,
                            p1
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_remap_lands_on_neighbor_edge() {
        let size = 8;
        for face in Face::all() {
            for edge in Edge::all() {
                let (x, y) = match edge {
                    Edge::Top => (3, 0),
                    Edge::Right => (7, 3),
                    Edge::Bottom => (3, 7),
                    Edge::Left => (0, 3),
                };
                let seam = adjacency(face, edge);
                let (nf, nx, ny) = remap_seam_coordinate(face, edge, x, y, size);
                assert_eq!(nf, seam.face);
                let on_edge = match seam.edge {
                    Edge::Top => ny == 0,
                    Edge::Right => nx == 7,
                    Edge::Bottom => ny == 7,
                    Edge::Left => nx == 0,
                };
                assert!(on_edge, "{:?}/{:?} -> ({},{}) not on {:?}", face, edge, nx, ny, seam.edge);
            }
        }
    }

    #[test]
    fn test_cardinal_step_is_bidirectional() {
        let size = 16;
        let r = size - 1;
        let samples = [(0, 0), (0, r), (r, 0), (r, r), (0, r / 2), (r, r / 2), (r / 2, 0), (r / 2, r)];

        for face in Face::all() {
            for &(x, y) in &samples {
                for (dx, dy) in CARDINAL {
                    let (f2, x2, y2) = step(size, face, x, y, dx, dy).unwrap();
                    // A seam crossing lands on the twin pixel of the same 3-D point, so
                    // step back off that face in the direction that leaves it.
                    let back: Vec<_> = CARDINAL
                        .into_iter()
                        .filter_map(|(bx, by)| step(size, f2, x2, y2, bx, by))
                        .collect();
                    assert!(
                        back.contains(&(face, x, y)),
                        "{:?} ({},{}) -> {:?} ({},{}); back={:?}",
                        face,
                        x,
                        y,
                        f2,
                        x2,
                        y2,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_diagonal_off_face_is_skipped() {
        assert_eq!(step(8, Face::Front, 0, 0, -1, -1), None);
        assert_eq!(step(8, Face::Front, 7, 3, 1, 1), None);
        assert_eq!(step(8, Face::Front, 3, 3, 1, 1), Some((Face::Front, 4, 4)));
    }

    #[test]
    fn test_cardinal_off_face_crosses_seam() {
        assert_eq!(step(8, Face::Front, 7, 2, 1, 0), Some((Face::Right, 0, 2)));
        assert_eq!(step(8, Face::Top, 2, 7, 0, 1), Some((Face::Front, 2, 0)));
        assert_eq!(step(8, Face::Right, 2, 0, 0, -1), Some((Face::Top, 7, 5)));
    }
}
