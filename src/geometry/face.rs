//! Cube face and face-edge identification.

use serde::{Deserialize, Serialize};

/// Identifies one of the six faces of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Face {
    /// +Z face
    Front = 0,
    /// -Z face
    Back = 1,
    /// -X face
    Left = 2,
    /// +X face
    Right = 3,
    /// +Y face
    Top = 4,
    /// -Y face
    Bottom = 5,
}

impl Face {
    /// Returns all six cube faces in storage order.
    pub const fn all() -> [Face; 6] {
        [
            Face::Front,
            Face::Back,
            Face::Left,
            Face::Right,
            Face::Top,
            Face::Bottom,
        ]
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<Face> {
        match index {
            0 => Some(Face::Front),
            1 => Some(Face::Back),
            2 => Some(Face::Left),
            3 => Some(Face::Right),
            4 => Some(Face::Top),
            5 => Some(Face::Bottom),
            _ => None,
        }
    }

    /// Returns a short lowercase name for the face (e.g., "front", "bottom").
    pub const fn short_name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }
}

/// One of the four edges of a face grid.
///
/// The top edge is row `y = 0`, the right edge column `x = size - 1`,
/// the bottom edge row `y = size - 1`, and the left edge column `x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Edge {
    /// Returns all four edges in index order.
    pub const fn all() -> [Edge; 4] {
        [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left]
    }

    /// Returns the edge index (0=top, 1=right, 2=bottom, 3=left).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the two edges that run along a row (top and bottom).
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}
