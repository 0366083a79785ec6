//! Cube topology.
//!
//! Face enumeration, the unit-sphere projection of face-local coordinates,
//! and the seam table that stitches six independently indexed grids into one
//! connected surface.

mod face;
mod cube_sphere;
pub mod neighbors;

pub use face::{Edge, Face};
pub use cube_sphere::{FaceCoord, face_uv_to_cube, pixel_to_uv, project_to_sphere, sphere_to_face_uv};
pub use neighbors::{adjacency, remap_seam_coordinate, step, SeamLink};
