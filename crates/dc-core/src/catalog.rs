//! Template catalog: reusable fragments addressed by compass direction.
//!
//! A `StructureCluster` groups one fragment per direction (a single bond
//! pointing north, a benzene ring whose center lies north of the attach
//! point, ...). Clusters are validated when registered and the catalog is
//! read-only afterwards; share it between diagrams behind an `Arc`.

use crate::config::Metrics;
use crate::direction::{Direction, unit_at};
use crate::id::Name;
use crate::model::{Atom, BondStyle, Structure};
use crate::vector::{closest_vector, compare_vectors, inside_circle};
use kurbo::{Point, Vec2};
use std::collections::HashMap;
use std::f64::consts::PI;
use thiserror::Error;

/// Precision used when matching a pointer vector against member directions.
const DIRECTION_PRECISION: u32 = 5;

// ─── Errors ──────────────────────────────────────────────────────────────

/// A template rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("cluster `{0}` has no candidate fragments")]
    EmptyCluster(String),

    #[error("cluster `{cluster}`: unknown direction label `{label}`")]
    UnknownDirection { cluster: String, label: String },

    #[error("cluster `{cluster}`: fragment for {direction} has no bonds")]
    EmptyFragment { cluster: String, direction: Direction },

    #[error("cluster `{0}` is already registered")]
    DuplicateCluster(String),

    #[error("ring `{name}` needs at least 3 members, got {size}")]
    InvalidRing { name: String, size: usize },
}

// ─── Rings ───────────────────────────────────────────────────────────────

/// Ring template metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclicStructure {
    pub name: Name,
    pub ring_size: usize,
    /// Angle in degrees between consecutive bond vectors (360 / size).
    pub angle: f64,
    /// 1 for saturated rings, 2 for aromatic ones.
    pub multiplicity: u8,
    pub aromatic: bool,
}

impl CyclicStructure {
    /// # Errors
    /// `InvalidRing` when `ring_size < 3`.
    pub fn new(name: &str, ring_size: usize, aromatic: bool) -> Result<Self, CatalogError> {
        if ring_size < 3 {
            return Err(CatalogError::InvalidRing {
                name: name.to_string(),
                size: ring_size,
            });
        }
        Ok(Self {
            name: Name::intern(name),
            ring_size,
            angle: 360.0 / ring_size as f64,
            multiplicity: if aromatic { 2 } else { 1 },
            aromatic,
        })
    }

    /// Distance from any ring atom to the ring center.
    pub fn circumradius(&self, bond_length: f64) -> f64 {
        bond_length / (2.0 * (PI / self.ring_size as f64).sin())
    }

    /// Build the ring whose center lies in `center` direction from the
    /// attach point.
    ///
    /// The fragment is a chain of `ring_size` single bonds; the last atom
    /// lands back on the attach point and is merged when attached. The
    /// attach point also books `center`, so the ring interior is never
    /// handed out for automatic attachment.
    pub fn fragment(&self, center: Direction, bond_length: f64) -> Structure {
        let mut s = Structure::new(Point::ORIGIN, Atom::new(Vec2::ZERO));
        let root = s.root;
        s.attach_bond(root, center);
        s.calculate_next(root);
        let tilt = 90.0 - 180.0 / self.ring_size as f64;
        let mut heading = center.degrees() - tilt;
        let mut parent = s.root;
        for _ in 0..self.ring_size {
            let atom = Atom::new(unit_at(heading) * bond_length);
            parent = s.add_bond(parent, BondStyle::Single, atom);
            heading += self.angle;
        }
        if self.aromatic {
            let at = Point::ORIGIN + center.unit() * self.circumradius(bond_length);
            s.add_decoration(Name::aromatic(), at);
        }
        s
    }
}

// ─── Clusters ────────────────────────────────────────────────────────────

/// One candidate fragment of a cluster.
#[derive(Debug, Clone)]
pub struct Template {
    pub direction: Direction,
    pub fragment: Structure,
}

#[derive(Debug, Clone)]
pub struct StructureCluster {
    name: Name,
    members: Vec<Template>,
    ring: Option<CyclicStructure>,
    multiplicity: Option<u8>,
}

impl StructureCluster {
    /// Validate and build a cluster from `(direction label, fragment)`
    /// pairs. The first pair is the default candidate.
    ///
    /// # Errors
    /// `EmptyCluster`, `UnknownDirection`, or `EmptyFragment`.
    pub fn new(
        name: &str,
        defs: Vec<(&str, Structure)>,
        ring: Option<CyclicStructure>,
        multiplicity: Option<u8>,
    ) -> Result<Self, CatalogError> {
        if defs.is_empty() {
            return Err(CatalogError::EmptyCluster(name.to_string()));
        }
        let mut members = Vec::with_capacity(defs.len());
        for (label, fragment) in defs {
            let direction =
                Direction::from_label(label).ok_or_else(|| CatalogError::UnknownDirection {
                    cluster: name.to_string(),
                    label: label.to_string(),
                })?;
            if fragment.bonds(fragment.root).is_empty() {
                return Err(CatalogError::EmptyFragment {
                    cluster: name.to_string(),
                    direction,
                });
            }
            members.push(Template {
                direction,
                fragment,
            });
        }
        Ok(Self {
            name: Name::intern(name),
            members,
            ring,
            multiplicity,
        })
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn members(&self) -> &[Template] {
        &self.members
    }

    pub fn ring(&self) -> Option<&CyclicStructure> {
        self.ring.as_ref()
    }

    /// Ring size, 0 for acyclic clusters.
    pub fn ring_size(&self) -> usize {
        self.ring.as_ref().map_or(0, |r| r.ring_size)
    }

    /// Inter-bond angle of the ring, `None` for acyclic clusters.
    pub fn angle(&self) -> Option<f64> {
        self.ring.as_ref().map(|r| r.angle)
    }

    pub fn multiplicity(&self) -> Option<u8> {
        self.multiplicity
            .or_else(|| self.ring.as_ref().map(|r| r.multiplicity))
    }

    pub fn is_aromatic(&self) -> bool {
        self.ring.as_ref().is_some_and(|r| r.aromatic)
    }

    /// The candidate used for undirected attachment.
    pub fn default_member(&self) -> &Template {
        // Non-empty by construction.
        &self.members[0]
    }

    pub fn member(&self, direction: Direction) -> Option<&Template> {
        self.members.iter().find(|m| m.direction == direction)
    }

    /// Pick a candidate from a press/release pair.
    ///
    /// A release inside the press's hit-circle is an undirected click and
    /// yields the default. Otherwise the compass vector closest to the drag
    /// is matched against member directions; `None` means no attachment.
    pub fn structure_for(&self, down: Point, up: Point, hit_radius: f64) -> Option<&Template> {
        if inside_circle(down, up, hit_radius) {
            return Some(self.default_member());
        }
        let candidates = Direction::ALL.map(Direction::unit);
        let vector = closest_vector(down, up, &candidates)?;
        self.members
            .iter()
            .find(|m| compare_vectors(m.direction.unit(), vector, DIRECTION_PRECISION))
    }
}

// ─── Fragment builders ───────────────────────────────────────────────────

/// A fragment made of one bond of `style` pointing in `direction`.
pub fn bond_fragment(direction: Direction, style: BondStyle, bond_length: f64) -> Structure {
    let mut s = Structure::new(Point::ORIGIN, Atom::new(Vec2::ZERO));
    s.add_bond(s.root, style, Atom::new(direction.vector(bond_length)));
    s
}

/// A twelve-member cluster of single-bond fragments of `style`.
///
/// # Errors
/// Propagates cluster validation errors.
pub fn bond_cluster(
    name: &str,
    style: BondStyle,
    bond_length: f64,
) -> Result<StructureCluster, CatalogError> {
    let defs = Direction::ALL
        .iter()
        .map(|d| (d.label(), bond_fragment(*d, style, bond_length)))
        .collect();
    StructureCluster::new(name, defs, None, Some(style.multiplicity()))
}

/// A twelve-member cluster of ring fragments.
///
/// # Errors
/// Propagates cluster validation errors.
pub fn ring_cluster(ring: CyclicStructure, bond_length: f64) -> Result<StructureCluster, CatalogError> {
    let defs = Direction::ALL
        .iter()
        .map(|d| (d.label(), ring.fragment(*d, bond_length)))
        .collect();
    let name = ring.name.as_str().to_string();
    StructureCluster::new(&name, defs, Some(ring), None)
}

// ─── Catalog ─────────────────────────────────────────────────────────────

/// Registry of clusters, in registration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    clusters: Vec<StructureCluster>,
    index: HashMap<Name, usize>,
    bond_length: f64,
}

const STANDARD_BONDS: [(&str, BondStyle); 5] = [
    ("single-bond", BondStyle::Single),
    ("double-bond", BondStyle::Double),
    ("triple-bond", BondStyle::Triple),
    ("wedge-bond", BondStyle::Wedge),
    ("dash-bond", BondStyle::Dash),
];

const STANDARD_RINGS: [(&str, usize, bool); 7] = [
    ("cyclopropane", 3, false),
    ("cyclobutane", 4, false),
    ("cyclopentane", 5, false),
    ("cyclohexane", 6, false),
    ("benzene", 6, true),
    ("cycloheptane", 7, false),
    ("cyclooctane", 8, false),
];

impl Catalog {
    /// A catalog with no clusters.
    pub fn empty(metrics: &Metrics) -> Self {
        Self {
            clusters: Vec::new(),
            index: HashMap::new(),
            bond_length: metrics.bond_length,
        }
    }

    /// The standard bond and ring clusters.
    ///
    /// # Errors
    /// Any template that fails validation.
    pub fn new(metrics: &Metrics) -> Result<Self, CatalogError> {
        let mut catalog = Self::empty(metrics);
        for (name, style) in STANDARD_BONDS {
            catalog.register(bond_cluster(name, style, metrics.bond_length)?)?;
        }
        for (name, size, aromatic) in STANDARD_RINGS {
            let ring = CyclicStructure::new(name, size, aromatic)?;
            catalog.register(ring_cluster(ring, metrics.bond_length)?)?;
        }
        Ok(catalog)
    }

    /// # Errors
    /// `DuplicateCluster` if the name is taken.
    pub fn register(&mut self, cluster: StructureCluster) -> Result<(), CatalogError> {
        let name = cluster.name();
        if self.index.contains_key(&name) {
            return Err(CatalogError::DuplicateCluster(name.to_string()));
        }
        log::debug!(
            "catalog: registered `{name}` ({} members, ring size {})",
            cluster.members().len(),
            cluster.ring_size()
        );
        self.index.insert(name, self.clusters.len());
        self.clusters.push(cluster);
        Ok(())
    }

    pub fn cluster(&self, name: &str) -> Option<&StructureCluster> {
        self.index
            .get(&Name::intern(name))
            .map(|i| &self.clusters[*i])
    }

    pub fn clusters(&self) -> &[StructureCluster] {
        &self.clusters
    }

    pub fn bond_length(&self) -> f64 {
        self.bond_length
    }

    /// Bond vector for a compass label (`"NE1"`).
    pub fn bond_direction(&self, label: &str) -> Option<Vec2> {
        Direction::from_label(label).map(|d| d.vector(self.bond_length))
    }

    /// Label of the 180°-rotated direction.
    pub fn opposite_direction(label: &str) -> Option<&'static str> {
        Direction::from_label(label).map(|d| d.opposite().label())
    }
}
