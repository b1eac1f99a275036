//! Engine configuration.
//!
//! All pulse cadences and probabilities are presentation tuning values with
//! no deeper derivation; they are surfaced here as plain configuration with
//! the reference defaults, loadable from TOML in the demo binary.

use serde::{Deserialize, Serialize};

use super::regime::Regime;

/// Tuning for the idle-reactive micro-pulse subsystem.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PulseConfig {
    /// Spawn-check cadence (ms).
    #[serde(default = "default_spawn_check_ms")]
    pub spawn_check_ms: u64,

    /// Expiry-sweep cadence (ms).
    #[serde(default = "default_expiry_sweep_ms")]
    pub expiry_sweep_ms: u64,

    /// Pulse time-to-live after creation (ms).
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Minimum pointer idle time before a spawn roll can pass (ms).
    #[serde(default = "default_idle_threshold_ms")]
    pub idle_threshold_ms: u64,

    /// Per-axis uniform scatter around the pointer (px).
    #[serde(default = "default_scatter_px")]
    pub scatter_px: f64,

    /// Pulses retained before an insert; steady-state max is this plus one.
    #[serde(default = "default_retained_on_insert")]
    pub retained_on_insert: usize,

    /// Per-tick spawn probability in the mechanical regime.
    #[serde(default = "default_p_mechanical")]
    pub p_mechanical: f64,

    /// Per-tick spawn probability in the emerging regime.
    #[serde(default = "default_p_emerging")]
    pub p_emerging: f64,

    /// Per-tick spawn probability in the efficient regime. Exactly zero:
    /// a fully efficient market never pulses.
    #[serde(default = "default_p_efficient")]
    pub p_efficient: f64,
}

fn default_spawn_check_ms() -> u64 {
    600
}
fn default_expiry_sweep_ms() -> u64 {
    1000
}
fn default_ttl_ms() -> u64 {
    1500
}
fn default_idle_threshold_ms() -> u64 {
    200
}
fn default_scatter_px() -> f64 {
    75.0
}
fn default_retained_on_insert() -> usize {
    8
}
fn default_p_mechanical() -> f64 {
    0.30
}
fn default_p_emerging() -> f64 {
    0.15
}
fn default_p_efficient() -> f64 {
    0.0
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            spawn_check_ms: default_spawn_check_ms(),
            expiry_sweep_ms: default_expiry_sweep_ms(),
            ttl_ms: default_ttl_ms(),
            idle_threshold_ms: default_idle_threshold_ms(),
            scatter_px: default_scatter_px(),
            retained_on_insert: default_retained_on_insert(),
            p_mechanical: default_p_mechanical(),
            p_emerging: default_p_emerging(),
            p_efficient: default_p_efficient(),
        }
    }
}

impl PulseConfig {
    /// Spawn probability for a regime.
    pub fn spawn_probability(&self, regime: Regime) -> f64 {
        match regime {
            Regime::Efficient => self.p_efficient,
            Regime::Emerging => self.p_emerging,
            Regime::Mechanical => self.p_mechanical,
        }
    }

    /// Override the pulse TTL.
    pub fn with_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Override the retained-on-insert cap.
    pub fn with_retained_on_insert(mut self, retained: usize) -> Self {
        self.retained_on_insert = retained;
        self
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub pulse: PulseConfig,

    /// Viewport dimensions (px) used until the host reports a resize.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
}

fn default_viewport_width() -> f64 {
    1920.0
}
fn default_viewport_height() -> f64 {
    1080.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pulse: PulseConfig::default(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}
