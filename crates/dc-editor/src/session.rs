//! One editing session: a shared catalog, the diagram being edited, and
//! the attach tool's gesture state.
//!
//! The host feeds pointer events one at a time; each release runs the
//! resolver against the active cluster.

use crate::input::InputEvent;
use crate::modify::{graft, modify};
use crate::tools::{AttachTool, Gesture};
use dc_core::{Atom, Catalog, Metrics, Name, Point, Structure, StructureCluster, Vec2};
use dc_render::{Drawing, draw, locate};
use std::sync::Arc;

pub struct Session {
    catalog: Arc<Catalog>,
    metrics: Metrics,
    active: Option<Name>,
    structure: Option<Structure>,
    tool: AttachTool,
}

impl Session {
    /// A session with no diagram yet. The first registered cluster is
    /// active.
    pub fn new(catalog: Arc<Catalog>, metrics: Metrics) -> Self {
        let active = catalog.clusters().first().map(StructureCluster::name);
        let tool = AttachTool::new(metrics.hit_radius);
        Self {
            catalog,
            metrics,
            active,
            structure: None,
            tool,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    /// Make `name` the cluster attached by subsequent gestures. False if
    /// the catalog has no such cluster.
    pub fn select_cluster(&mut self, name: &str) -> bool {
        match self.catalog.cluster(name) {
            Some(cluster) => {
                self.active = Some(cluster.name());
                true
            }
            None => false,
        }
    }

    pub fn active_cluster(&self) -> Option<&StructureCluster> {
        self.active.and_then(|name| self.catalog.cluster(name.as_str()))
    }

    /// Feed one pointer event. Returns true when the diagram changed.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let hit = self
            .structure
            .as_ref()
            .and_then(|s| locate(s, event.position(), self.metrics.hit_radius));
        match self.tool.handle(event, hit) {
            Some(gesture) => self.apply(gesture),
            None => false,
        }
    }

    fn apply(&mut self, gesture: Gesture) -> bool {
        let catalog = Arc::clone(&self.catalog);
        let Some(cluster) = self.active.and_then(|name| catalog.cluster(name.as_str())) else {
            log::debug!("session: no active cluster");
            return false;
        };

        let Some(structure) = self.structure.as_mut() else {
            return self.start(cluster, gesture);
        };
        let before = (structure.bond_count(), structure.decorations.len());
        modify(
            structure,
            cluster,
            gesture.down,
            gesture.up,
            gesture.drag_move,
            &self.metrics,
        );
        before != (structure.bond_count(), structure.decorations.len())
    }

    /// First gesture on an empty canvas: the press point becomes the
    /// origin and the cluster member picked by the drag is attached.
    fn start(&mut self, cluster: &StructureCluster, gesture: Gesture) -> bool {
        let origin = gesture.down.unwrap_or(gesture.up);
        let Some(template) = cluster.structure_for(origin, gesture.up, self.metrics.hit_radius)
        else {
            log::debug!("session: `{}` has no member for that drag", cluster.name());
            return false;
        };

        let mut structure = Structure::new(origin, Atom::new(Vec2::ZERO));
        let root = structure.root;
        graft(
            &mut structure,
            root,
            origin,
            &template.fragment,
            self.metrics.hit_radius,
        );
        log::debug!(
            "session: new diagram at ({:.2}, {:.2}) with `{}` {}",
            origin.x,
            origin.y,
            cluster.name(),
            template.direction
        );
        self.structure = Some(structure);
        true
    }

    /// Label the atom under `point`. False if nothing is there.
    pub fn set_label_at(&mut self, point: Point, text: &str) -> bool {
        let hit_radius = self.metrics.hit_radius;
        let Some(structure) = self.structure.as_mut() else {
            return false;
        };
        match locate(structure, point, hit_radius) {
            Some(hit) => structure.set_label(hit.atom, text),
            None => false,
        }
    }

    pub fn draw(&self) -> Option<Drawing> {
        self.structure.as_ref().map(|s| draw(s, &self.metrics))
    }
}
