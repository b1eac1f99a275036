//! Read-only state snapshot for the render pass.

use serde::Serialize;

use super::metrics::Confidence;
use super::pulse::MicroPulse;
use super::regime::Regime;

/// Everything the render layer reads, captured at one instant.
///
/// Cloned out of the controller once per render pass; the render layer never
/// holds a reference into live engine state, so periodic sweeps can never
/// tear a frame out from under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub regime: Regime,
    pub progression: f64,
    /// Composite index as of the last regime/progression transition. Never
    /// stale: recomputed exactly once per transition.
    pub index_value: f64,
    pub confidence: Confidence,
    /// Estimated predictability window.
    pub window: &'static str,
    /// Canned interpretive paragraph for the current regime.
    pub interpretive_text: &'static str,
    /// Live micro-pulses, oldest first.
    pub active_pulses: Vec<MicroPulse>,
}
