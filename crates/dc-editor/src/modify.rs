//! Mutation resolver: pointer gesture → fragment attachment.
//!
//! The diagram is searched depth-first (pre-order, bonds in insertion
//! order) and the first atom that accepts the gesture is the target; a
//! rejection there ends the search. A release on an atom attaches in the
//! atom's next automatic direction. A press on an atom released outside
//! it attaches in the compass sector of the release.
//!
//! The target books the slots the fragment's attach point holds: its
//! first-level bonds and, for rings, the ring interior. Before grafting,
//! every fragment atom is located against the existing diagram. Those
//! that land on an older atom become merged endpoints and the older atom
//! books their bonds, so rings close without a duplicate atom.
//!
//! Failures never surface: the structure is left untouched and the
//! outcome is logged.

use dc_core::vector::{compare_points, inside_circle, sector_direction};
use dc_core::{Direction, Metrics, NodeIndex, Point, Structure, StructureCluster, Template};
use dc_render::{Located, locate};
use std::fmt;

/// Decimals to which a press must match an atom position. The attach
/// tool snaps presses onto atoms, so this is an exact match in practice.
const PRESS_PRECISION: u32 = 5;

/// How a gesture resolved. Only ever logged.
#[derive(Debug)]
enum Outcome<'c> {
    Automatic(Target<'c>),
    Manual(Target<'c>),
    /// No atom accepted the gesture, or the cluster has no member for
    /// the chosen direction.
    NoMatch,
    /// The target's cursor is exhausted.
    CapacityExhausted(NodeIndex),
    /// The manually chosen direction is already consumed.
    DirectionTaken(NodeIndex, Direction),
}

struct Target<'c> {
    atom: NodeIndex,
    position: Point,
    direction: Direction,
    template: &'c Template,
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} at ({:.2}, {:.2}) towards {}",
            self.atom, self.position.x, self.position.y, self.direction
        )
    }
}

/// Attach a member of `cluster` to the atom selected by a pointer
/// gesture. Returns the (possibly unchanged) structure for chaining.
pub fn modify<'s>(
    structure: &'s mut Structure,
    cluster: &StructureCluster,
    down: Option<Point>,
    up: Point,
    drag_move: bool,
    metrics: &Metrics,
) -> &'s mut Structure {
    let outcome = resolve(structure, cluster, down, up, drag_move, metrics.hit_radius);
    log::debug!("modify `{}`: {:?}", cluster.name(), outcome);

    match outcome {
        Outcome::Automatic(target) | Outcome::Manual(target) => {
            graft(
                structure,
                target.atom,
                target.position,
                &target.template.fragment,
                metrics.hit_radius,
            );
        }
        Outcome::NoMatch | Outcome::CapacityExhausted(_) | Outcome::DirectionTaken(..) => {}
    }
    structure
}

fn resolve<'c>(
    structure: &Structure,
    cluster: &'c StructureCluster,
    down: Option<Point>,
    up: Point,
    drag_move: bool,
    hit_radius: f64,
) -> Outcome<'c> {
    for (atom, position) in structure.walk() {
        let node = &structure.graph[atom];
        if node.merged {
            continue;
        }
        let released_here = inside_circle(position, up, hit_radius);

        if released_here && !drag_move {
            let Some(direction) = node.slots.next().direction() else {
                return Outcome::CapacityExhausted(atom);
            };
            return match pick(cluster, direction) {
                Some(template) => Outcome::Automatic(Target {
                    atom,
                    position,
                    direction,
                    template,
                }),
                None => Outcome::NoMatch,
            };
        }

        if let Some(down) = down
            && !released_here
            && compare_points(position, down, PRESS_PRECISION)
        {
            let direction = sector_direction(down, up);
            if node.slots.is_used(direction) {
                return Outcome::DirectionTaken(atom, direction);
            }
            return match pick(cluster, direction) {
                Some(template) => Outcome::Manual(Target {
                    atom,
                    position,
                    direction,
                    template,
                }),
                None => Outcome::NoMatch,
            };
        }
    }
    Outcome::NoMatch
}

/// A single-member cluster always offers its default.
fn pick(cluster: &StructureCluster, direction: Direction) -> Option<&Template> {
    if cluster.members().len() == 1 {
        Some(cluster.default_member())
    } else {
        cluster.member(direction)
    }
}

/// Graft `fragment` onto `target` (sitting at `at`), consuming the
/// slots of the fragment's attach point and merging fragment atoms that
/// land on existing ones.
pub(crate) fn graft(
    structure: &mut Structure,
    target: NodeIndex,
    at: Point,
    fragment: &Structure,
    hit_radius: f64,
) {
    let landings: Vec<(NodeIndex, Located)> = fragment
        .walk()
        .into_iter()
        .filter(|(idx, _)| *idx != fragment.root)
        .filter_map(|(idx, rel)| {
            locate(structure, at + rel.to_vec2(), hit_radius).map(|hit| (idx, hit))
        })
        .collect();

    book(structure, target, fragment.graph[fragment.root].slots.used());
    let mapping = structure.add_bonds(target, fragment);
    structure.add_decorations_from(fragment, at);

    for (frag_idx, hit) in landings {
        let Some(new_idx) = mapping
            .iter()
            .find(|(src, _)| *src == frag_idx)
            .map(|(_, dst)| *dst)
        else {
            continue;
        };
        if let Some(atom) = structure.atom_mut(new_idx) {
            atom.merged = true;
        }

        // The merged copy's slots face its parent and its own children.
        let bonds = fragment.graph[frag_idx].slots.used();
        book(structure, hit.atom, bonds);
        log::debug!(
            "merge: {:?} onto {:?} at ({:.2}, {:.2}), booking {:?}",
            new_idx,
            hit.atom,
            hit.position.x,
            hit.position.y,
            bonds,
        );
    }
}

/// Consume `directions` on `atom`, skipping those already taken.
fn book(structure: &mut Structure, atom: NodeIndex, directions: &[Direction]) {
    for direction in directions {
        structure.attach_bond(atom, *direction);
    }
    structure.calculate_next(atom);
}
