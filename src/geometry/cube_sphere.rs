//! Coordinate conversion between face pixels, cube points and the unit sphere.

use glam::DVec3;

use super::face::Face;

/// A 2D coordinate within a cube face, with UV in [0, 1] range.
#[derive(Debug, Clone, Copy)]
pub struct FaceCoord {
    /// The cube face this coordinate belongs to.
    pub face: Face,
    /// U coordinate in [0, 1] range (grows with pixel x).
    pub u: f64,
    /// V coordinate in [0, 1] range (grows with pixel y).
    pub v: f64,
}

impl FaceCoord {
    /// Creates a new face coordinate.
    pub fn new(face: Face, u: f64, v: f64) -> Self {
        Self { face, u, v }
    }

    /// Creates the coordinate of pixel `(x, y)` on a face of side `size`.
    pub fn from_pixel(face: Face, size: u32, x: u32, y: u32) -> Self {
        let (u, v) = pixel_to_uv(size, x, y);
        Self { face, u, v }
    }

    /// Converts this face coordinate to a point on the unit sphere.
    pub fn to_sphere_point(self) -> DVec3 {
        project_to_sphere(self.face, self.u, self.v)
    }
}

/// Converts a pixel coordinate to UV in [0, 1].
///
/// Edge pixels sit exactly on the cube edge (`u = x / (size - 1)`), so the
/// outermost row of a face and the outermost row of its neighbor sample the
/// same 3-D points. A single-pixel face maps to its center.
pub fn pixel_to_uv(size: u32, x: u32, y: u32) -> (f64, f64) {
    if size <= 1 {
        return (0.5, 0.5);
    }
    let span = (size - 1) as f64;
    (x as f64 / span, y as f64 / span)
}

/// Converts UV coordinates on a face to a point on the surface of the cube.
///
/// UV in [0, 1] maps to [-1, 1] on the face. Image rows grow downward, so the
/// side faces flip `t` to keep "up" pointing toward +Y.
pub fn face_uv_to_cube(face: Face, u: f64, v: f64) -> DVec3 {
    let s = u * 2.0 - 1.0;
    let t = v * 2.0 - 1.0;

    match face {
        Face::Front => DVec3::new(s, -t, 1.0),
        Face::Back => DVec3::new(-s, -t, -1.0),
        Face::Right => DVec3::new(1.0, -t, -s),
        Face::Left => DVec3::new(-1.0, -t, s),
        Face::Top => DVec3::new(s, 1.0, t),
        Face::Bottom => DVec3::new(s, -1.0, -t),
    }
}

/// Maps face-local UV onto the unit sphere.
///
/// Adjacent faces agree on the 3-D position of their shared edge, which is
/// what makes noise sampled per face continuous across seams.
pub fn project_to_sphere(face: Face, u: f64, v: f64) -> DVec3 {
    face_uv_to_cube(face, u, v).normalize()
}

/// Determines which cube face a direction belongs to and returns its UV.
///
/// Inverse of [`project_to_sphere`] up to normalization.
pub fn sphere_to_face_uv(p: DVec3) -> (Face, f64, f64) {
    let a = p.abs();

    let (face, s, t) = if a.x >= a.y && a.x >= a.z {
        if p.x > 0.0 {
            (Face::Right, -p.z / p.x, -p.y / p.x)
        } else {
            (Face::Left, p.z / -p.x, p.y / p.x)
        }
    } else if a.y >= a.x && a.y >= a.z {
        if p.y > 0.0 {
            (Face::Top, p.x / p.y, p.z / p.y)
        } else {
            (Face::Bottom, p.x / -p.y, p.z / p.y)
        }
    } else if p.z > 0.0 {
        (Face::Front, p.x / p.z, -p.y / p.z)
    } else {
        (Face::Back, p.x / p.z, p.y / p.z)
    };

    let u = (s + 1.0) * 0.5;
    let v = (t + 1.0) * 0.5;

    (face, u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_centers_are_axis_aligned() {
        let test_cases = [
            (Face::Right, DVec3::X),
            (Face::Left, DVec3::NEG_X),
            (Face::Top, DVec3::Y),
            (Face::Bottom, DVec3::NEG_Y),
            (Face::Front, DVec3::Z),
            (Face::Back, DVec3::NEG_Z),
        ];

        for (face, expected) in test_cases {
            let p = project_to_sphere(face, 0.5, 0.5);
            assert!(
                (p - expected).length() < 1e-12,
                "Face {:?} center: expected {:?}, got {:?}",
                face,
                expected,
                p
            );
        }
    }

    #[test]
    fn test_projection_is_unit_length() {
        for face in Face::all() {
            for &u in &[0.0, 0.25, 0.5, 1.0] {
                for &v in &[0.0, 0.6, 1.0] {
                    let len = project_to_sphere(face, u, v).length();
                    assert!((len - 1.0).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_face_uv() {
        for face in Face::all() {
            for &u in &[0.1, 0.3, 0.5, 0.7, 0.9] {
                for &v in &[0.1, 0.3, 0.5, 0.7, 0.9] {
                    let p = project_to_sphere(face, u, v);
                    let (f2, u2, v2) = sphere_to_face_uv(p);
                    assert_eq!(face, f2, "Face mismatch for UV ({}, {})", u, v);
                    assert!(
                        (u - u2).abs() < 1e-9 && (v - v2).abs() < 1e-9,
                        "UV mismatch for {:?}: ({}, {}) vs ({}, {})",
                        face,
                        u,
                        v,
                        u2,
                        v2
                    );
                }
            }
        }
    }

    #[test]
    fn test_pixel_to_uv_spans_edges() {
        assert_eq!(pixel_to_uv(20, 0, 0), (0.0, 0.0));
        assert_eq!(pixel_to_uv(20, 19, 19), (1.0, 1.0));
        assert_eq!(pixel_to_uv(1, 0, 0), (0.5, 0.5));
    }

    #[test]
    fn test_top_of_front_meets_bottom_of_top() {
        // Row 0 of the front face and the last row of the top face share the edge y=1, z=1.
        let a = project_to_sphere(Face::Front, 0.25, 0.0);
        let b = project_to_sphere(Face::Top, 0.25, 1.0);
        assert!((a - b).length() < 1e-12);
    }
}
