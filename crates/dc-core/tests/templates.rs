//! Catalog templates grafted into diagrams.

use dc_core::{Atom, Catalog, Cursor, Direction, Metrics, Name, Point, Structure, Vec2};
use pretty_assertions::assert_eq;

#[test]
fn metrics_overrides_flow_into_templates() {
    let metrics = Metrics::from_json(r#"{ "bond_length": 30.0 }"#).unwrap();
    assert_eq!(metrics.hit_radius, 3.4);

    let catalog = Catalog::new(&metrics).unwrap();
    assert_eq!(catalog.bond_length(), 30.0);
    let template = catalog.cluster("single-bond").unwrap().member(Direction::S).unwrap();
    let (_, child) = template.fragment.bonds(template.fragment.root)[0];
    assert_eq!(template.fragment.graph[child].offset, Vec2::new(0.0, 30.0));

    assert!(Metrics::from_json(r#"{ "bond_length": "long" }"#).unwrap_err().starts_with("invalid metrics"));
}

#[test]
fn grafted_ring_keeps_fragment_geometry() {
    let catalog = Catalog::new(&Metrics::default()).unwrap();
    let ring = catalog.cluster("cyclopentane").unwrap();
    let template = ring.member(Direction::W).unwrap();

    let mut s = Structure::new(Point::new(200.0, 100.0), Atom::new(Vec2::ZERO));
    let stem = s.add_bond(s.root, dc_core::BondStyle::Single, Atom::new(Direction::W.vector(20.0)));
    let mapping = s.add_bonds(stem, &template.fragment);
    assert_eq!(mapping.len(), 5);

    let stem_pos = s.absolute_position(stem).unwrap();
    for (src, dst) in mapping {
        let rel = template.fragment.absolute_position(src).unwrap();
        let abs = s.absolute_position(dst).unwrap();
        assert!(((abs - stem_pos) - rel.to_vec2()).hypot() < 1e-9);
    }
    // The last ring atom returns to the stem.
    let (_, last) = *s.walk().last().unwrap();
    assert!((last - stem_pos).hypot() < 1e-9);
}

#[test]
fn aromatic_centers_translate_with_the_anchor() {
    let catalog = Catalog::new(&Metrics::default()).unwrap();
    let benzene = catalog.cluster("benzene").unwrap();
    let anchor = Point::new(40.0, 40.0);

    let mut s = Structure::new(anchor, Atom::new(Vec2::ZERO));
    for d in [Direction::E, Direction::W] {
        s.add_decorations_from(&benzene.member(d).unwrap().fragment, anchor);
    }
    let centers: Vec<Point> = s.decorations_named(Name::aromatic()).collect();
    assert_eq!(centers.len(), 2);
    assert!((centers[0] - Point::new(60.0, 40.0)).hypot() < 1e-9);
    assert!((centers[1] - Point::new(20.0, 40.0)).hypot() < 1e-9);
}

#[test]
fn ring_atoms_book_both_neighbours() {
    let catalog = Catalog::new(&Metrics::default()).unwrap();
    let template = catalog.cluster("cyclohexane").unwrap().member(Direction::N).unwrap();
    let (_, first) = template.fragment.bonds(template.fragment.root)[0];
    let atom = &template.fragment.graph[first];
    // Back towards the attach point, on towards the next ring atom.
    assert_eq!(atom.slots.used(), &[Direction::SE1, Direction::N]);
    assert_eq!(atom.slots.next(), Cursor::Next(Direction::SW2));
}
