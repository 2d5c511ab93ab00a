//! Drawing metrics shared by the catalog, renderer, and resolver.

use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Style constants for one diagram.
///
/// Every field has a default, so hosts may override a subset from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Length of every template bond.
    pub bond_length: f64,
    /// Half-side of the square used for all pointer hit-testing and for
    /// atom markers.
    pub hit_radius: f64,
    /// Perpendicular offset of double-bond lines; also the wedge
    /// half-base and the scale of dash ticks.
    pub double_gap: f64,
    /// Perpendicular offset of the outer triple-bond lines.
    pub triple_gap: f64,
    /// Number of ticks in a dashed bond.
    pub dash_ticks: u32,
    /// Radius of the circle drawn inside aromatic rings.
    pub aromatic_radius: f64,
    /// Label font size; label boxes scale with it.
    pub font_size: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            bond_length: 20.0,
            hit_radius: 3.4,
            double_gap: 1.3,
            triple_gap: 2.0,
            dash_ticks: 7,
            aromatic_radius: 9.0,
            font_size: 18.0,
        }
    }
}

impl Metrics {
    /// Parse metrics overrides from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns the parser message if the input is not a valid metrics object.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid metrics: {e}"))
    }
}
