//! End-to-end editing through pointer events.

use dc_core::{Catalog, Metrics, Point};
use dc_editor::{InputEvent, Session};
use dc_render::CircleKind;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn session() -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    let metrics = Metrics::default();
    let catalog = Arc::new(Catalog::new(&metrics).unwrap());
    Session::new(catalog, metrics)
}

fn click(s: &mut Session, x: f64, y: f64) -> bool {
    s.handle(&InputEvent::from_pointer_down(x, y));
    s.handle(&InputEvent::from_pointer_up(x, y))
}

fn drag(s: &mut Session, from: (f64, f64), to: (f64, f64)) -> bool {
    s.handle(&InputEvent::from_pointer_down(from.0, from.1));
    s.handle(&InputEvent::from_pointer_move(to.0, to.1));
    s.handle(&InputEvent::from_pointer_up(to.0, to.1))
}

#[test]
fn first_click_creates_the_diagram() {
    let mut s = session();
    assert!(s.draw().is_none());
    assert_eq!(s.active_cluster().map(|c| c.name().to_string()), Some("single-bond".into()));

    assert!(click(&mut s, 98.0, 98.0));
    let d = s.draw().unwrap();
    assert_eq!(d.paths[0].to_string(), "M 98.00 98.00 L 98.00 78.00");
}

#[test]
fn first_drag_picks_the_member() {
    let mut s = session();
    assert!(s.select_cluster("double-bond"));
    assert!(drag(&mut s, (50.0, 50.0), (75.0, 52.0)));

    let structure = s.structure().unwrap();
    assert_eq!(structure.origin, Point::new(50.0, 50.0));
    let (bond, child) = structure.bonds(structure.root)[0];
    assert_eq!(bond.style, dc_core::BondStyle::Double);
    assert_eq!(structure.absolute_position(child), Some(Point::new(70.0, 50.0)));
}

#[test]
fn clicks_snap_to_atoms() {
    let mut s = session();
    assert!(s.select_cluster("benzene"));
    click(&mut s, 98.0, 98.0);

    // A slightly-off click on the top vertex grows a bond out of it.
    assert!(s.select_cluster("single-bond"));
    assert!(click(&mut s, 98.5, 58.5));
    let d = s.draw().unwrap();
    let markers: Vec<(f64, f64)> = d
        .circles
        .iter()
        .filter(|c| c.kind == CircleKind::Atom)
        .map(|c| (c.x, c.y))
        .collect();
    assert_eq!(markers.len(), 7);
    assert!(markers.contains(&(98.0, 38.0)));

    // Clicking empty canvas changes nothing.
    assert!(!click(&mut s, 300.0, 300.0));
}

#[test]
fn drag_from_atom_attaches_manually() {
    let mut s = session();
    click(&mut s, 98.0, 98.0);
    assert!(drag(&mut s, (98.0, 98.0), (60.0, 98.0)));

    let structure = s.structure().unwrap();
    let west = structure
        .walk()
        .into_iter()
        .any(|(_, p)| p == Point::new(78.0, 98.0));
    assert!(west);
}

#[test]
fn labels_are_set_on_located_atoms() {
    let mut s = session();
    assert!(!s.set_label_at(Point::new(98.0, 98.0), "O"));

    click(&mut s, 98.0, 98.0);
    assert!(s.set_label_at(Point::new(99.0, 77.0), "OH"));
    assert!(!s.set_label_at(Point::new(0.0, 0.0), "N"));

    let d = s.draw().unwrap();
    assert_eq!(d.labels.len(), 1);
    assert_eq!(d.labels[0].text, "OH");
    assert_eq!((d.labels[0].x, d.labels[0].y), (98.0, 78.0));
}

#[test]
fn unknown_cluster_is_not_selected() {
    let mut s = session();
    assert!(!s.select_cluster("fullerene"));
    assert_eq!(s.active_cluster().map(|c| c.name().to_string()), Some("single-bond".into()));
}
