//! Structure → vector drawing instructions.
//!
//! Walks the atom tree depth-first (pre-order, bonds in insertion order)
//! from the origin and emits path commands, atom markers, label boxes,
//! and decoration circles. All emitted coordinates are rounded to two
//! decimals so output can be compared literally.
//!
//! | Bond | Geometry |
//! |------|----------|
//! | single | line to the child; the first bond of an atom extends the current path |
//! | double | two lines offset ±`double_gap` perpendicular to the bond |
//! | triple | as double (with `triple_gap`) plus the centerline |
//! | wedge | filled triangle, apex at the parent, base across the child |
//! | dash | `dash_ticks` perpendicular ticks widening towards the child |
//!
//! Every non-single bond starts a fresh path at the child for its subtree.

use dc_core::vector::{fixed, fixed_point};
use dc_core::{BondStyle, Metrics, Name, NodeIndex, Point, Structure, Vec2};
use serde::Serialize;
use std::fmt;

/// Label box width per glyph, as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.8;
/// Label box height as a fraction of the font size.
const LINE_HEIGHT: f64 = 1.1;
/// Share of the label half-extent folded into the bounding box.
const LABEL_BOUNDS_SHARE: f64 = 0.7;
/// Share of the vertical allowance placed towards negative y (above the
/// baseline); the rest goes below.
const LABEL_ABOVE_SHARE: f64 = 3.0 / 5.0;

// ─── Output types ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Segment {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Close,
}

/// Rendering hint for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathTag {
    /// Fill the outline instead of stroking it.
    Wedge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathCommand {
    pub segments: Vec<Segment>,
    pub tag: Option<PathTag>,
}

impl PathCommand {
    fn starting_at(p: Point) -> Self {
        let p = fixed_point(p);
        Self {
            segments: vec![Segment::Move { x: p.x, y: p.y }],
            tag: None,
        }
    }

    fn move_to(&mut self, p: Point) {
        let p = fixed_point(p);
        self.segments.push(Segment::Move { x: p.x, y: p.y });
    }

    fn line_to(&mut self, p: Point) {
        let p = fixed_point(p);
        self.segments.push(Segment::Line { x: p.x, y: p.y });
    }

    fn segment(&mut self, from: Point, to: Point) {
        self.move_to(from);
        self.line_to(to);
    }

    /// True if the path only moves the pen.
    fn is_empty(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| matches!(s, Segment::Line { .. } | Segment::Close))
    }
}

impl fmt::Display for PathCommand {
    /// SVG path data: `M 98.00 98.00 L 98.00 78.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match seg {
                Segment::Move { x, y } => write!(f, "M {x:.2} {y:.2}")?,
                Segment::Line { x, y } => write!(f, "L {x:.2} {y:.2}")?,
                Segment::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleKind {
    /// Hit-target marker around an atom.
    Atom,
    /// Ring inside an aromatic cycle.
    Aromatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub kind: CircleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounds of atoms and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    fn at(p: Point) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Everything a renderer needs to serialize one structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub paths: Vec<PathCommand>,
    pub circles: Vec<Circle>,
    pub labels: Vec<LabelPlacement>,
    pub bounds: BoundingBox,
}

// ─── Traversal ───────────────────────────────────────────────────────────

/// A pending bond: the child atom, where its parent sits, and which path
/// a single bond drawn first from that parent continues.
struct Frame {
    atom: NodeIndex,
    from: Point,
    style: BondStyle,
    first: bool,
    path: usize,
}

/// Convert a structure into drawing instructions.
///
/// Pure: calling it twice on an unchanged structure yields equal output.
pub fn draw(structure: &Structure, metrics: &Metrics) -> Drawing {
    let root = &structure.graph[structure.root];
    let root_pos = structure.origin + root.offset;
    let mut painter = Painter::new(metrics, root_pos);

    painter.paths.push(PathCommand::starting_at(root_pos));
    painter.label(root_pos, &root.label);
    painter.marker(root_pos);

    let mut stack = Vec::new();
    push_bonds(structure, structure.root, root_pos, 0, &mut stack);

    while let Some(frame) = stack.pop() {
        let atom = &structure.graph[frame.atom];
        let pos = frame.from + atom.offset;
        log::trace!("DRAW {:?} {:?} at ({:.2}, {:.2})", frame.atom, frame.style, pos.x, pos.y);

        painter.bounds.include(pos);
        if !atom.merged {
            painter.label(pos, &atom.label);
            painter.marker(pos);
        }
        let path = painter.bond(frame.from, pos, frame.style, frame.first, frame.path);
        push_bonds(structure, frame.atom, pos, path, &mut stack);
    }

    for center in structure.decorations_named(Name::aromatic()) {
        painter.circles.push(Circle {
            x: fixed(center.x),
            y: fixed(center.y),
            r: metrics.aromatic_radius,
            kind: CircleKind::Aromatic,
        });
    }

    painter.finish()
}

/// Queue an atom's bonds so they pop in insertion order.
fn push_bonds(
    structure: &Structure,
    idx: NodeIndex,
    pos: Point,
    path: usize,
    stack: &mut Vec<Frame>,
) {
    for (i, (bond, child)) in structure.bonds(idx).into_iter().enumerate().rev() {
        stack.push(Frame {
            atom: child,
            from: pos,
            style: bond.style,
            first: i == 0,
            path,
        });
    }
}

struct Painter<'a> {
    metrics: &'a Metrics,
    paths: Vec<PathCommand>,
    circles: Vec<Circle>,
    labels: Vec<LabelPlacement>,
    bounds: BoundingBox,
}

impl<'a> Painter<'a> {
    fn new(metrics: &'a Metrics, start: Point) -> Self {
        Self {
            metrics,
            paths: Vec::new(),
            circles: Vec::new(),
            labels: Vec::new(),
            bounds: BoundingBox::at(start),
        }
    }

    fn marker(&mut self, p: Point) {
        self.circles.push(Circle {
            x: fixed(p.x),
            y: fixed(p.y),
            r: self.metrics.hit_radius,
            kind: CircleKind::Atom,
        });
    }

    fn label(&mut self, p: Point, text: &str) {
        if text.is_empty() {
            return;
        }
        let glyphs = text.chars().count() as f64;
        let width = self.metrics.font_size * glyphs * GLYPH_WIDTH;
        let height = self.metrics.font_size * LINE_HEIGHT;

        let half_w = LABEL_BOUNDS_SHARE * width / 2.0;
        let v = LABEL_BOUNDS_SHARE * height;
        self.bounds
            .include(Point::new(p.x - half_w, p.y - v * LABEL_ABOVE_SHARE));
        self.bounds
            .include(Point::new(p.x + half_w, p.y + v * (1.0 - LABEL_ABOVE_SHARE)));

        self.labels.push(LabelPlacement {
            x: fixed(p.x),
            y: fixed(p.y),
            text: text.to_string(),
            width: fixed(width),
            height: fixed(height),
        });
    }

    /// Emit one bond. Returns the path the child's own first bond continues.
    fn bond(&mut self, start: Point, end: Point, style: BondStyle, first: bool, current: usize) -> usize {
        let gap = self.metrics.double_gap;
        let outline = match style {
            BondStyle::Single => {
                if first && let Some(path) = self.paths.get_mut(current) {
                    path.line_to(end);
                    return current;
                }
                let mut path = PathCommand::starting_at(start);
                path.line_to(end);
                self.paths.push(path);
                return self.paths.len() - 1;
            }
            BondStyle::Double => parallel_lines(start, end, gap, false),
            BondStyle::Triple => parallel_lines(start, end, self.metrics.triple_gap, true),
            BondStyle::Wedge => wedge(start, end, gap),
            BondStyle::Dash => dashes(start, end, gap, self.metrics.dash_ticks),
        };
        self.paths.push(outline);
        self.paths.push(PathCommand::starting_at(end));
        self.paths.len() - 1
    }

    fn finish(mut self) -> Drawing {
        self.paths.retain(|p| !p.is_empty());
        let b = self.bounds;
        Drawing {
            paths: self.paths,
            circles: self.circles,
            labels: self.labels,
            bounds: BoundingBox {
                min_x: fixed(b.min_x),
                min_y: fixed(b.min_y),
                max_x: fixed(b.max_x),
                max_y: fixed(b.max_y),
            },
        }
    }
}

// ─── Bond geometry ───────────────────────────────────────────────────────

/// Unit vector perpendicular to `start → end` (rotated counter-clockwise).
fn perpendicular(start: Point, end: Point) -> Vec2 {
    let v = end - start;
    let len = v.hypot();
    if len == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(-v.y, v.x) / len
}

fn parallel_lines(start: Point, end: Point, gap: f64, centerline: bool) -> PathCommand {
    let n = perpendicular(start, end) * gap;
    let mut path = PathCommand::starting_at(start + n);
    path.line_to(end + n);
    if centerline {
        path.segment(start, end);
    }
    path.segment(start - n, end - n);
    path
}

fn wedge(start: Point, end: Point, gap: f64) -> PathCommand {
    let n = perpendicular(start, end) * gap;
    let mut path = PathCommand::starting_at(start);
    path.line_to(end + n);
    path.line_to(end - n);
    path.segments.push(Segment::Close);
    path.tag = Some(PathTag::Wedge);
    path
}

fn dashes(start: Point, end: Point, gap: f64, ticks: u32) -> PathCommand {
    let count = ticks.max(1);
    let step = (end - start) / count as f64;
    let n = perpendicular(start, end);
    let mut path = PathCommand {
        segments: Vec::with_capacity(count as usize * 2),
        tag: None,
    };
    for i in 1..=count {
        let at = start + step * i as f64;
        let half = gap * (i + 1) as f64 / count as f64;
        path.segment(at + n * half, at - n * half);
    }
    path
}
