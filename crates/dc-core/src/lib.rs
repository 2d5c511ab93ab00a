pub mod catalog;
pub mod config;
pub mod direction;
pub mod id;
pub mod model;
pub mod slots;
pub mod vector;

pub use catalog::{Catalog, CatalogError, CyclicStructure, StructureCluster, Template};
pub use config::Metrics;
pub use direction::Direction;
pub use id::Name;
pub use model::*;
pub use slots::{Cursor, Slots};

// Re-export petgraph/kurbo types so downstream crates share one version
pub use kurbo::{Point, Vec2};
pub use petgraph::graph::NodeIndex;
