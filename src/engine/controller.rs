//! Single-owner controller for the dashboard engine state.
//!
//! One `DashboardController` owns the regime state, the derived metrics, the
//! pointer tracker and the pulse field. Every inbound operation and every
//! periodic tick runs to completion against this owner before the next
//! begins, so no sweep ever observes a half-updated pulse set and no render
//! pass ever reads an index value that predates the regime it is shown with.

use tracing::{debug, info};

use super::config::EngineConfig;
use super::metrics::{derive_metrics, DerivedMetrics};
use super::noise::NoiseSource;
use super::pulse::{MicroPulse, PointerTracker, PulseField};
use super::regime::{Regime, RegimeState, SurfaceVariant};
use super::snapshot::DashboardSnapshot;

/// The engine core. Drives all state transitions; knows nothing about
/// clocks or schedulers (timestamps arrive as parameters).
pub struct DashboardController {
    state: RegimeState,
    metrics: DerivedMetrics,
    pointer: PointerTracker,
    pulses: PulseField,
    viewport: (f64, f64),
    noise: Box<dyn NoiseSource>,
}

impl DashboardController {
    pub fn new(
        config: EngineConfig,
        variant: SurfaceVariant,
        mut noise: Box<dyn NoiseSource>,
    ) -> Self {
        let state = RegimeState::new(variant);
        let metrics = derive_metrics(state.regime, state.progression, noise.as_mut());
        info!(
            target: "alpha_weather::engine",
            regime = ?state.regime,
            progression = state.progression,
            index = metrics.index_value,
            "controller initialized"
        );
        Self {
            state,
            metrics,
            pointer: PointerTracker::default(),
            pulses: PulseField::new(config.pulse),
            viewport: (config.viewport_width, config.viewport_height),
            noise,
        }
    }

    /// Host-reported pointer movement, pixel coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: u64) {
        self.pointer.record(x, y, now_ms);
    }

    /// Host-reported viewport resize. Affects only future pulse spawns;
    /// existing pulses keep the percentages captured at their spawn.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        debug!(target: "alpha_weather::engine", width, height, "viewport resized");
    }

    /// Discrete regime selection. Snaps progression to the target's anchor
    /// (including on re-selection of the active regime) and recomputes the
    /// metrics exactly once.
    pub fn select_regime(&mut self, target: Regime) {
        self.state.select(target);
        self.recompute();
    }

    /// Progression slider change. Clamps, applies the hysteresis transition
    /// policy, and recomputes the metrics exactly once.
    pub fn set_progression(&mut self, value: f64) {
        self.state.set_progression(value);
        self.recompute();
    }

    /// One 600 ms-cadence spawn check.
    pub fn spawn_tick(&mut self, now_ms: u64) -> Option<MicroPulse> {
        self.pulses.spawn_check(
            self.state.regime,
            &self.pointer,
            self.viewport,
            now_ms,
            self.noise.as_mut(),
        )
    }

    /// One 1000 ms-cadence expiry sweep.
    pub fn sweep_tick(&mut self, now_ms: u64) -> usize {
        self.pulses.sweep(now_ms)
    }

    /// Snapshot for the render pass.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            regime: self.state.regime,
            progression: self.state.progression,
            index_value: self.metrics.index_value,
            confidence: self.metrics.confidence,
            window: self.metrics.window,
            interpretive_text: self.state.regime.interpretation(),
            active_pulses: self.pulses.active(),
        }
    }

    pub fn regime(&self) -> Regime {
        self.state.regime
    }

    pub fn progression(&self) -> f64 {
        self.state.progression
    }

    fn recompute(&mut self) {
        self.metrics = derive_metrics(
            self.state.regime,
            self.state.progression,
            self.noise.as_mut(),
        );
        debug!(
            target: "alpha_weather::engine",
            regime = ?self.state.regime,
            progression = self.state.progression,
            index = self.metrics.index_value,
            confidence = ?self.metrics.confidence,
            "metrics recomputed"
        );
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("state", &self.state)
            .field("metrics", &self.metrics)
            .field("active_pulses", &self.pulses.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::metrics::Confidence;
    use crate::engine::noise::ScriptedNoise;

    fn controller_with(noise: ScriptedNoise) -> DashboardController {
        DashboardController::new(
            EngineConfig::default(),
            SurfaceVariant::Dashboard,
            Box::new(noise),
        )
    }

    #[test]
    fn initial_snapshot_is_fully_formed() {
        let snap = controller_with(ScriptedNoise::new().with_uniforms([0.0])).snapshot();
        assert_eq!(snap.regime, Regime::Emerging);
        assert_eq!(snap.progression, 45.0);
        assert_eq!(snap.index_value, 49.5);
        assert_eq!(snap.confidence, Confidence::Moderate);
        assert_eq!(snap.window, "15 minutes");
        assert!(snap.interpretive_text.starts_with("Market structure is forming"));
        assert!(snap.active_pulses.is_empty());
    }

    #[test]
    fn slider_to_low_extreme_scenario() {
        // From the defaults, set_progression(15) lands in Efficient with
        // HIGH confidence and a zero-minute window.
        let mut ctl = controller_with(ScriptedNoise::new().with_uniforms([0.0]));
        ctl.set_progression(15.0);

        let snap = ctl.snapshot();
        assert_eq!(snap.regime, Regime::Efficient);
        assert_eq!(snap.progression, 15.0);
        assert_eq!(snap.confidence, Confidence::High);
        assert_eq!(snap.window, "0 minutes");
        assert_eq!(snap.index_value, 13.5); // 12.0 + 1.5 + 0.0
    }

    #[test]
    fn discrete_jump_scenario() {
        // select_regime(Mechanical) from the defaults.
        let mut ctl = controller_with(ScriptedNoise::new().with_uniforms([0.0]));
        ctl.select_regime(Regime::Mechanical);

        let snap = ctl.snapshot();
        assert_eq!(snap.regime, Regime::Mechanical);
        assert_eq!(snap.progression, 90.0);
        assert_eq!(snap.confidence, Confidence::High);
        assert_eq!(snap.index_value, 97.0); // 88.0 + 9.0 + 0.0
    }

    #[test]
    fn metrics_never_stale_across_transition() {
        let mut ctl = controller_with(ScriptedNoise::new().with_uniforms([0.0]));
        let before = ctl.snapshot().index_value;
        ctl.select_regime(Regime::Mechanical);
        let after = ctl.snapshot().index_value;
        assert_ne!(before, after);
        assert_eq!(after, 97.0);
    }

    #[test]
    fn spawn_and_sweep_through_controller() {
        let mut ctl = controller_with(ScriptedNoise::always_spawn());
        ctl.select_regime(Regime::Mechanical);
        ctl.pointer_move(960.0, 540.0, 0);

        assert!(ctl.spawn_tick(600).is_some());
        assert_eq!(ctl.snapshot().active_pulses.len(), 1);

        assert_eq!(ctl.sweep_tick(600 + 1500), 1);
        assert!(ctl.snapshot().active_pulses.is_empty());
    }

    #[test]
    fn resize_affects_future_spawns_only() {
        let mut ctl = controller_with(ScriptedNoise::always_spawn());
        ctl.select_regime(Regime::Mechanical);
        ctl.pointer_move(960.0, 540.0, 0);

        let first = ctl.spawn_tick(600).unwrap();
        assert_eq!(first.x_pct, 50.0);

        ctl.resize(960.0, 540.0);
        let pulses = ctl.snapshot().active_pulses;
        // Captured percentage unchanged by the resize.
        assert_eq!(pulses[0].x_pct, 50.0);

        let second = ctl.spawn_tick(1200).unwrap();
        assert_eq!(second.x_pct, 100.0);
    }
}
