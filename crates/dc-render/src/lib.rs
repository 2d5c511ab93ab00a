pub mod draw;
pub mod hit;

pub use draw::{
    BoundingBox, Circle, CircleKind, Drawing, LabelPlacement, PathCommand, PathTag, Segment, draw,
};
pub use hit::{Located, locate};
