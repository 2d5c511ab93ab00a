//! Compass directions for bond vectors.
//!
//! The plane is split into twelve directions 30° apart, clockwise from
//! north (screen coordinates: y grows downward). `NE1` is 30° east of
//! north, `NE2` is 60°, and so on round the compass.

use kurbo::Vec2;
use std::fmt;

/// One of the twelve compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    N,
    NE1,
    NE2,
    E,
    SE1,
    SE2,
    S,
    SW1,
    SW2,
    W,
    NW1,
    NW2,
}

const SIN_30: f64 = 0.5;
const COS_30: f64 = 0.866_025_403_784_438_6;

/// Unit vectors in compass order, y pointing down.
const UNIT: [(f64, f64); 12] = [
    (0.0, -1.0),
    (SIN_30, -COS_30),
    (COS_30, -SIN_30),
    (1.0, 0.0),
    (COS_30, SIN_30),
    (SIN_30, COS_30),
    (0.0, 1.0),
    (-SIN_30, COS_30),
    (-COS_30, SIN_30),
    (-1.0, 0.0),
    (-COS_30, -SIN_30),
    (-SIN_30, -COS_30),
];

impl Direction {
    /// All directions in catalog order. Ties in vector matching resolve
    /// to the earlier entry.
    pub const ALL: [Direction; 12] = [
        Direction::N,
        Direction::NE1,
        Direction::NE2,
        Direction::E,
        Direction::SE1,
        Direction::SE2,
        Direction::S,
        Direction::SW1,
        Direction::SW2,
        Direction::W,
        Direction::NW1,
        Direction::NW2,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE1 => "NE1",
            Direction::NE2 => "NE2",
            Direction::E => "E",
            Direction::SE1 => "SE1",
            Direction::SE2 => "SE2",
            Direction::S => "S",
            Direction::SW1 => "SW1",
            Direction::SW2 => "SW2",
            Direction::W => "W",
            Direction::NW1 => "NW1",
            Direction::NW2 => "NW2",
        }
    }

    /// Parse a compass label (`"NE1"`). Returns `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.label() == label)
    }

    /// Clockwise angle from north, in degrees.
    pub fn degrees(self) -> f64 {
        self.index() as f64 * 30.0
    }

    /// The direction rotated by 180°.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 6) % 12]
    }

    /// Unit vector pointing in this direction.
    pub fn unit(self) -> Vec2 {
        let (x, y) = UNIT[self.index()];
        Vec2::new(x, y)
    }

    /// Bond vector of the given length pointing in this direction.
    pub fn vector(self, length: f64) -> Vec2 {
        self.unit() * length
    }

    /// The compass direction closest to an arbitrary vector.
    pub fn nearest(v: Vec2) -> Self {
        let units = Self::ALL.map(Direction::unit);
        let best = crate::vector::closest_index(v, &units).unwrap_or(0);
        Self::ALL[best]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit vector for a clockwise angle from north, in degrees.
pub fn unit_at(degrees: f64) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}
