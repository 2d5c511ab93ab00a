//! Structure graph for one chemical diagram.
//!
//! A diagram is a tree of atoms rooted at an absolute origin. Each bond is
//! an edge from a parent atom to a child atom; atom offsets are always
//! relative to the parent, so absolute positions only exist by walking
//! down from the origin. Ring closures are not cycles: the attach pass
//! flags the duplicate endpoint as `merged` and books the bond on the
//! atom that already sits there.
//!
//! Atoms are never removed, so `NodeIndex` and `EdgeIndex` values grow
//! monotonically and edge order equals bond-insertion order.

use crate::direction::Direction;
use crate::id::Name;
use crate::slots::{Cursor, Slots};
use kurbo::{Point, Vec2};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

// ─── Bonds ───────────────────────────────────────────────────────────────

/// How a bond is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondStyle {
    Single,
    Double,
    Triple,
    /// Filled triangle, narrow end at the parent atom.
    Wedge,
    /// Hashed wedge: ticks widening towards the child atom.
    Dash,
}

impl BondStyle {
    pub fn multiplicity(self) -> u8 {
        match self {
            BondStyle::Double => 2,
            BondStyle::Triple => 3,
            BondStyle::Single | BondStyle::Wedge | BondStyle::Dash => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub style: BondStyle,
}

// ─── Atoms ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element label; empty for an implicit carbon.
    pub label: String,
    /// Offset from the parent atom (from the origin for the root).
    pub offset: Vec2,
    pub slots: Slots,
    /// Set on a ring-closure endpoint that coincides with an older atom.
    /// Merged atoms keep their bond geometry but have no marker or label
    /// and are skipped by hit-testing.
    pub merged: bool,
}

impl Atom {
    pub fn new(offset: Vec2) -> Self {
        Self {
            label: String::new(),
            offset,
            slots: Slots::new(),
            merged: false,
        }
    }

    /// The 180°-rotated direction, used when booking a closing bond on
    /// the atom at the far end.
    pub fn opposite_direction(direction: Direction) -> Direction {
        direction.opposite()
    }
}

// ─── Decorations ─────────────────────────────────────────────────────────

/// A named overlay with coordinates (absolute in a diagram, relative to
/// the attach point in a template fragment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub name: Name,
    pub at: Point,
}

// ─── Structure ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Structure {
    pub graph: StableDiGraph<Atom, Bond>,
    pub root: NodeIndex,
    pub origin: Point,
    pub decorations: Vec<Decoration>,
}

impl Structure {
    /// Create a diagram with a single atom placed at `origin + atom.offset`.
    #[must_use]
    pub fn new(origin: Point, root: Atom) -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(root);
        Self {
            graph,
            root,
            origin,
            decorations: Vec::new(),
        }
    }

    pub fn atom(&self, idx: NodeIndex) -> Option<&Atom> {
        self.graph.node_weight(idx)
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> Option<&mut Atom> {
        self.graph.node_weight_mut(idx)
    }

    /// Outgoing bonds of an atom, in insertion order.
    pub fn bonds(&self, idx: NodeIndex) -> Vec<(Bond, NodeIndex)> {
        let mut edges: Vec<(EdgeIndex, Bond, NodeIndex)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (e.id(), *e.weight(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, b, t)| (b, t)).collect()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    /// Append a bond from `parent` to a new atom. Both ends consume the
    /// slot facing the other.
    pub fn add_bond(&mut self, parent: NodeIndex, style: BondStyle, mut atom: Atom) -> NodeIndex {
        if atom.offset.hypot() > 0.0 {
            atom.slots.attach(Direction::nearest(-atom.offset));
            atom.slots.calculate_next();
            let outgoing = Direction::nearest(atom.offset);
            if self.attach_bond(parent, outgoing) {
                self.calculate_next(parent);
            }
        }
        let idx = self.graph.add_node(atom);
        self.graph.add_edge(parent, idx, Bond { style });
        idx
    }

    /// Graft every bond of `fragment`'s root (with whole subtrees) onto
    /// `parent`, after the bonds it already has.
    ///
    /// Returns `(fragment index, new index)` pairs in depth-first pre-order.
    pub fn add_bonds(&mut self, parent: NodeIndex, fragment: &Structure) -> Vec<(NodeIndex, NodeIndex)> {
        let mut mapping = Vec::new();
        let mut stack: Vec<(Bond, NodeIndex, NodeIndex)> = fragment
            .bonds(fragment.root)
            .into_iter()
            .rev()
            .map(|(bond, child)| (bond, child, parent))
            .collect();

        while let Some((bond, src, dst_parent)) = stack.pop() {
            let idx = self.graph.add_node(fragment.graph[src].clone());
            self.graph.add_edge(dst_parent, idx, bond);
            mapping.push((src, idx));

            for (child_bond, child) in fragment.bonds(src).into_iter().rev() {
                stack.push((child_bond, child, idx));
            }
        }
        mapping
    }

    /// Consume one capacity unit of an atom. False if already consumed
    /// (or the atom does not exist).
    pub fn attach_bond(&mut self, idx: NodeIndex, direction: Direction) -> bool {
        self.atom_mut(idx)
            .is_some_and(|atom| atom.slots.attach(direction))
    }

    /// Advance an atom's direction cursor.
    pub fn calculate_next(&mut self, idx: NodeIndex) -> Cursor {
        self.atom_mut(idx)
            .map_or(Cursor::Max, |atom| atom.slots.calculate_next())
    }

    pub fn set_label(&mut self, idx: NodeIndex, label: impl Into<String>) -> bool {
        match self.atom_mut(idx) {
            Some(atom) => {
                atom.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn add_decoration(&mut self, name: Name, at: Point) {
        self.decorations.push(Decoration { name, at });
    }

    /// Copy a fragment's decorations, translated so the fragment's root
    /// sits at `anchor`.
    pub fn add_decorations_from(&mut self, fragment: &Structure, anchor: Point) {
        for d in &fragment.decorations {
            self.add_decoration(d.name, anchor + d.at.to_vec2());
        }
    }

    /// Positions of every decoration registered under `name`.
    pub fn decorations_named(&self, name: Name) -> impl Iterator<Item = Point> + '_ {
        self.decorations
            .iter()
            .filter(move |d| d.name == name)
            .map(|d| d.at)
    }

    /// Absolute position of an atom, walking up to the origin.
    pub fn absolute_position(&self, idx: NodeIndex) -> Option<Point> {
        let mut pos = self.origin + self.atom(idx)?.offset;
        let mut current = idx;
        while let Some(parent) = self.parent(current) {
            pos += self.graph[parent].offset;
            current = parent;
        }
        Some(pos)
    }

    /// Every atom with its absolute position, depth-first pre-order,
    /// children in bond-insertion order.
    pub fn walk(&self) -> Vec<(NodeIndex, Point)> {
        let mut out = Vec::with_capacity(self.graph.node_count());
        let root_pos = self.origin + self.graph[self.root].offset;
        let mut stack = vec![(self.root, root_pos)];
        while let Some((idx, pos)) = stack.pop() {
            out.push((idx, pos));
            for (_, child) in self.bonds(idx).into_iter().rev() {
                stack.push((child, pos + self.graph[child].offset));
            }
        }
        out
    }

    /// Number of visible atoms (merged endpoints excluded).
    pub fn atom_count(&self) -> usize {
        self.graph.node_weights().filter(|a| !a.merged).count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }
}
