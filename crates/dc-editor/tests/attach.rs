//! Resolver scenarios: rings sharing atoms, fused rings, and capacity
//! bookkeeping across repeated attachments.

use dc_core::{Atom, Catalog, Cursor, Direction, Metrics, Name, Point, Structure, Vec2};
use dc_editor::modify;
use dc_render::{CircleKind, draw, locate};
use pretty_assertions::assert_eq;

const ORIGIN: Point = Point::new(98.0, 98.0);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup() -> (Catalog, Metrics, Structure) {
    init_logger();
    let metrics = Metrics::default();
    let catalog = Catalog::new(&metrics).unwrap();
    (catalog, metrics, Structure::new(ORIGIN, Atom::new(Vec2::ZERO)))
}

fn click(s: &mut Structure, catalog: &Catalog, cluster: &str, at: Point, metrics: &Metrics) {
    let cluster = catalog.cluster(cluster).unwrap();
    modify(s, cluster, Some(at), at, false, metrics);
}

fn drag(s: &mut Structure, catalog: &Catalog, cluster: &str, from: Point, to: Point, metrics: &Metrics) {
    let cluster = catalog.cluster(cluster).unwrap();
    modify(s, cluster, Some(from), to, true, metrics);
}

fn merged_count(s: &Structure) -> usize {
    s.graph.node_weights().filter(|a| a.merged).count()
}

fn visible_positions(s: &Structure) -> Vec<Point> {
    s.walk()
        .into_iter()
        .filter(|(idx, _)| !s.graph[*idx].merged)
        .map(|(_, p)| p)
        .collect()
}

// ─── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn single_bond_scenario() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "single-bond", ORIGIN, &metrics);

    let d = draw(&s, &metrics);
    assert_eq!(d.paths.len(), 1);
    assert_eq!(d.paths[0].to_string(), "M 98.00 98.00 L 98.00 78.00");
    assert_eq!(s.atom_count(), 2);
}

#[test]
fn benzene_scenario() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "benzene", ORIGIN, &metrics);

    assert_eq!(s.atom_count(), 6);
    assert_eq!(merged_count(&s), 1);
    let d = draw(&s, &metrics);
    let atoms = d.circles.iter().filter(|c| c.kind == CircleKind::Atom).count();
    let aromatic: Vec<_> = d
        .circles
        .iter()
        .filter(|c| c.kind == CircleKind::Aromatic)
        .collect();
    assert_eq!(atoms, 6);
    assert_eq!(aromatic.len(), 1);
    assert_eq!((aromatic[0].x, aromatic[0].y), (98.0, 78.0));
}

// ─── Ring closure ────────────────────────────────────────────────────────

#[test]
fn spiro_rings_share_exactly_one_atom() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "cyclohexane", ORIGIN, &metrics);
    drag(&mut s, &catalog, "cyclohexane", ORIGIN, Point::new(98.0, 130.0), &metrics);

    assert_eq!(s.atom_count(), 11);
    assert_eq!(merged_count(&s), 2);

    let positions = visible_positions(&s);
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            assert!((*a - *b).hypot() > 1.0, "duplicate atom at {a:?}");
        }
    }

    // The shared atom holds both interiors, both first bonds and both
    // closing bonds.
    let root = &s.graph[s.root].slots;
    assert_eq!(
        root.used(),
        &[
            Direction::N,
            Direction::NW1,
            Direction::NE2,
            Direction::S,
            Direction::SE1,
            Direction::SW2,
        ]
    );
}

#[test]
fn ring_vertices_grow_outward() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "benzene", ORIGIN, &metrics);
    let center = Point::new(98.0, 78.0);
    let vertices = visible_positions(&s);
    assert_eq!(vertices.len(), 6);

    for vertex in vertices {
        let bonds = s.bond_count();
        click(&mut s, &catalog, "single-bond", vertex, &metrics);
        assert_eq!(s.bond_count(), bonds + 1, "no bond grew from {vertex:?}");

        let Some(new) = s.graph.node_indices().last() else {
            panic!("empty graph");
        };
        assert!(!s.graph[new].merged, "bond from {vertex:?} landed on an existing atom");
        let tip = s.absolute_position(new).unwrap();
        assert!(
            (tip - center).hypot() > (vertex - center).hypot(),
            "bond from {vertex:?} points into the ring, ending at {tip:?}"
        );
    }
    assert_eq!(merged_count(&s), 1);
    assert_eq!(s.atom_count(), 12);
}

#[test]
fn fused_rings_share_an_edge() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "benzene", ORIGIN, &metrics);
    assert_eq!(s.graph[s.root].slots.next(), Cursor::Next(Direction::SE1));
    click(&mut s, &catalog, "benzene", ORIGIN, &metrics);

    // Ten carbons, as in naphthalene.
    assert_eq!(s.atom_count(), 10);
    assert_eq!(merged_count(&s), 3);
    assert_eq!(s.decorations_named(Name::aromatic()).count(), 2);

    let shared = locate(&s, Point::new(115.32, 88.0), metrics.hit_radius).unwrap();
    assert!(s.graph[shared.atom].slots.is_used(Direction::SW2));

    let root = &s.graph[s.root].slots;
    assert!(root.is_used(Direction::SE1));
    assert!(root.is_used(Direction::S));
    assert_eq!(root.next(), Cursor::Next(Direction::SW2));
}

// ─── Capacity ────────────────────────────────────────────────────────────

#[test]
fn exhausted_cursor_refuses_until_direction_is_given() {
    let (catalog, metrics, mut s) = setup();
    for _ in 0..6 {
        click(&mut s, &catalog, "single-bond", ORIGIN, &metrics);
    }
    assert_eq!(s.bond_count(), 6);
    assert_eq!(s.graph[s.root].slots.next(), Cursor::Max);

    click(&mut s, &catalog, "single-bond", ORIGIN, &metrics);
    assert_eq!(s.bond_count(), 6);

    // A consumed direction is refused even when given explicitly.
    drag(&mut s, &catalog, "single-bond", ORIGIN, Point::new(98.0, 60.0), &metrics);
    assert_eq!(s.bond_count(), 6);

    drag(&mut s, &catalog, "single-bond", ORIGIN, Point::new(130.0, 98.0), &metrics);
    assert_eq!(s.bond_count(), 7);
    let (_, east) = s.bonds(s.root)[6];
    assert_eq!(s.absolute_position(east), Some(Point::new(118.0, 98.0)));
    assert_eq!(s.graph[s.root].slots.count(), 7);
}

#[test]
fn missed_gesture_leaves_structure_untouched() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "benzene", ORIGIN, &metrics);
    let before = draw(&s, &metrics);

    click(&mut s, &catalog, "single-bond", Point::new(98.0, 78.0), &metrics);
    drag(&mut s, &catalog, "single-bond", Point::new(10.0, 10.0), Point::new(40.0, 10.0), &metrics);

    assert_eq!(draw(&s, &metrics), before);
}

#[test]
fn first_match_wins_in_drawing_order() {
    let (catalog, metrics, mut s) = setup();
    click(&mut s, &catalog, "single-bond", ORIGIN, &metrics);
    click(&mut s, &catalog, "single-bond", Point::new(98.0, 78.0), &metrics);

    // The second bond grew from the child, not from the root.
    assert_eq!(s.bonds(s.root).len(), 1);
    let (_, child) = s.bonds(s.root)[0];
    assert_eq!(s.bonds(child).len(), 1);
    let (_, grandchild) = s.bonds(child)[0];
    assert_eq!(s.absolute_position(grandchild), Some(Point::new(98.0, 58.0)));
}
