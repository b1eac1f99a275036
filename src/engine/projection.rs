//! Render projection: engine state to declarative visual parameters.
//!
//! A pure, deterministic read of a [`DashboardSnapshot`]. Owns nothing and
//! mutates nothing; in particular it has zero ownership of micro-pulse
//! lifetime. The host UI turns the resulting frame into styled elements.

use serde::Serialize;

use super::regime::Regime;
use super::snapshot::DashboardSnapshot;

/// Number of animated background bands on the surface.
const BAND_COUNT: usize = 5;
/// Band animation stagger (seconds per band).
const BAND_DELAY_S: f64 = 1.2;
/// Standing signal-pulse animation stagger (seconds per pulse).
const SIGNAL_DELAY_S: f64 = 2.5;

impl Regime {
    /// Accent color for headings and the center overlay.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Regime::Efficient => "#555",
            Regime::Emerging => "#3b82f6",
            Regime::Mechanical => "#8b5cf6",
        }
    }

    /// Dashboard background color.
    pub fn background_color(&self) -> &'static str {
        match self {
            Regime::Efficient => "#050505",
            Regime::Emerging => "#05080f",
            Regime::Mechanical => "#0a050f",
        }
    }

    /// Animation-speed multiplier for the surface layers.
    pub fn animation_speed(&self) -> f64 {
        match self {
            Regime::Efficient => 0.5,
            Regime::Emerging => 1.0,
            Regime::Mechanical => 2.0,
        }
    }

    /// Number of standing signal pulses on the surface.
    pub fn signal_pulse_count(&self) -> usize {
        match self {
            Regime::Efficient => 2,
            Regime::Emerging => 3,
            Regime::Mechanical => 5,
        }
    }

    /// System-stability bar fill, percent.
    pub fn stability_pct(&self) -> f64 {
        match self {
            Regime::Efficient => 90.0,
            Regime::Emerging => 60.0,
            Regime::Mechanical => 30.0,
        }
    }

    /// System-stability bar color.
    pub fn stability_color(&self) -> &'static str {
        match self {
            Regime::Efficient => "#4caf50",
            Regime::Emerging => "#ff9800",
            Regime::Mechanical => "#f44336",
        }
    }
}

/// One animated background band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandLayer {
    pub left_pct: f64,
    pub delay_s: f64,
    pub opacity: f64,
}

/// One standing signal pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalPulseLayer {
    pub top_pct: f64,
    pub delay_s: f64,
}

/// One live micro-pulse primitive, positioned at its captured coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MicroPulsePrimitive {
    pub id: u64,
    pub x_pct: f64,
    pub y_pct: f64,
}

/// System-stability readout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityBar {
    pub fill_pct: f64,
    pub color: &'static str,
}

/// Complete visual parameter set for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub state_label: &'static str,
    pub accent_color: &'static str,
    pub background_color: &'static str,
    pub animation_speed: f64,
    /// Center-overlay code, e.g. "AWI-49".
    pub index_code: String,
    pub stability: StabilityBar,
    pub bands: Vec<BandLayer>,
    pub signal_pulses: Vec<SignalPulseLayer>,
    pub micro_pulses: Vec<MicroPulsePrimitive>,
}

/// Project a snapshot into visual parameters. Pure and side-effect free.
pub fn project(snapshot: &DashboardSnapshot) -> RenderFrame {
    let regime = snapshot.regime;

    let bands = (0..BAND_COUNT)
        .map(|i| BandLayer {
            left_pct: i as f64 * 20.0,
            delay_s: i as f64 * BAND_DELAY_S,
            opacity: 0.1 + (i % 2) as f64 * 0.1,
        })
        .collect();

    // Standing pulses reuse the band vertical rhythm, wrapping back into
    // view once the mechanical regime pushes past three.
    let signal_pulses = (0..regime.signal_pulse_count())
        .map(|i| SignalPulseLayer {
            top_pct: (20.0 + i as f64 * 30.0) % 100.0,
            delay_s: i as f64 * SIGNAL_DELAY_S,
        })
        .collect();

    let micro_pulses = snapshot
        .active_pulses
        .iter()
        .map(|p| MicroPulsePrimitive {
            id: p.id,
            x_pct: p.x_pct,
            y_pct: p.y_pct,
        })
        .collect();

    RenderFrame {
        state_label: regime.label(),
        accent_color: regime.accent_color(),
        background_color: regime.background_color(),
        animation_speed: regime.animation_speed(),
        index_code: format!("AWI-{}", snapshot.index_value.floor() as i64),
        stability: StabilityBar {
            fill_pct: regime.stability_pct(),
            color: regime.stability_color(),
        },
        bands,
        signal_pulses,
        micro_pulses,
    }
}
