//! Hit testing: point → atom lookup.
//!
//! Walks the atom tree in drawing order and returns the first atom whose
//! hit-circle contains the point. Earlier atoms win when circles overlap.

use dc_core::vector::inside_circle;
use dc_core::{NodeIndex, Point, Structure};

/// An atom under the pointer and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    pub atom: NodeIndex,
    pub position: Point,
}

/// Find the first atom (depth-first pre-order) within `hit_radius` of
/// `point`. Merged ring-closure endpoints are never hit; their subtrees
/// still are.
pub fn locate(structure: &Structure, point: Point, hit_radius: f64) -> Option<Located> {
    structure
        .walk()
        .into_iter()
        .filter(|(idx, _)| !structure.graph[*idx].merged)
        .find(|(_, pos)| inside_circle(*pos, point, hit_radius))
        .map(|(atom, position)| Located { atom, position })
}
