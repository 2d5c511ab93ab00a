//! Geometric helpers shared by the renderer and the resolver.
//!
//! Hit-testing uses a square test (`|dx| < r && |dy| < r`) rather than a
//! Euclidean distance. Every caller goes through [`inside_circle`] so the
//! behavior is the same everywhere.

use crate::direction::Direction;
use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Index of the candidate with the smallest angular deviation from `v`.
/// Ties go to the earliest candidate. `None` only when `candidates` is empty.
pub fn closest_index(v: Vec2, candidates: &[Vec2]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        let deviation = v.cross(*c).atan2(v.dot(*c)).abs();
        match best {
            Some((_, d)) if deviation >= d => {}
            _ => best = Some((i, deviation)),
        }
    }
    best.map(|(i, _)| i)
}

/// The candidate bond vector closest in direction to `target - origin`.
pub fn closest_vector(origin: Point, target: Point, candidates: &[Vec2]) -> Option<Vec2> {
    closest_index(target - origin, candidates).map(|i| candidates[i])
}

fn round_to(v: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (v * scale).round()
}

/// Equality of two vectors after rounding to `precision` decimals.
pub fn compare_vectors(a: Vec2, b: Vec2, precision: u32) -> bool {
    round_to(a.x, precision) == round_to(b.x, precision)
        && round_to(a.y, precision) == round_to(b.y, precision)
}

/// Equality of two points after rounding to `precision` decimals.
pub fn compare_points(a: Point, b: Point, precision: u32) -> bool {
    compare_vectors(a.to_vec2(), b.to_vec2(), precision)
}

/// True iff both coordinate deltas are strictly less than `radius`.
pub fn inside_circle(center: Point, point: Point, radius: f64) -> bool {
    (center.x - point.x).abs() < radius && (center.y - point.y).abs() < radius
}

/// Round a coordinate to two decimals (the output precision of drawings).
/// Negative zero is normalized so it prints as `0.00`.
pub fn fixed(v: f64) -> f64 {
    (v * 100.0).round() / 100.0 + 0.0
}

/// Round both coordinates of a point to two decimals.
pub fn fixed_point(p: Point) -> Point {
    Point::new(fixed(p.x), fixed(p.y))
}

/// Sector half-widths for a circle of radius `r`:
/// `(sin 15°·r, cos 45°·r, cos 15°·r, sin 45°·r)`.
fn sector_bounds(r: f64) -> (f64, f64, f64, f64) {
    let alpha = PI / 6.0;
    (
        (alpha / 2.0).sin() * r,
        (3.0 * alpha / 2.0).cos() * r,
        (alpha / 2.0).cos() * r,
        (3.0 * alpha / 2.0).sin() * r,
    )
}

/// Classify `point` into one of twelve 30° sectors around `center`.
///
/// Each sector is tested as the bounding box of its arc, inclusive on
/// all sides, in compass order. A point on a shared boundary therefore
/// resolves to the earlier sector. `center` itself classifies as `N`.
pub fn sector_direction(center: Point, point: Point) -> Direction {
    let d = point - center;
    classify(d.x, d.y, d.hypot())
}

fn classify(dx: f64, dy: f64, r: f64) -> Direction {
    let (x, x1, y, y1) = sector_bounds(r);
    let within = |lo_x: f64, hi_x: f64, lo_y: f64, hi_y: f64| {
        dx >= lo_x && dx <= hi_x && dy >= lo_y && dy <= hi_y
    };

    let sectors = [
        (Direction::N, (-x, x, -r, -y)),
        (Direction::NE1, (x, x1, -y, -y1)),
        (Direction::NE2, (x1, y, -y1, -x)),
        (Direction::E, (y, r, -x, x)),
        (Direction::SE1, (x1, y, x, y1)),
        (Direction::SE2, (x, x1, y1, y)),
        (Direction::S, (-x, x, y, r)),
        (Direction::SW1, (-x1, -x, y1, y)),
        (Direction::SW2, (-y, -x1, x, y1)),
        (Direction::W, (-r, -y, -x, x)),
        (Direction::NW1, (-y, -x1, -y1, -x)),
        (Direction::NW2, (-x1, -x, -y, -y1)),
    ];

    sectors
        .iter()
        .find(|(_, (a, b, c, d))| within(*a, *b, *c, *d))
        .map(|(dir, _)| *dir)
        // Unreachable for finite input: every point on the circle lies in
        // some arc's bounding box.
        .unwrap_or(Direction::N)
}
