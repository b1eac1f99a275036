//! Idle-reactive micro-pulse subsystem.
//!
//! Micro-pulses are short-lived visual markers spawned near the pointer while
//! it dwells. Lifecycle:
//!
//! - Pointer movement records position and resets the idle clock.
//! - A periodic spawn check rolls against the regime's spawn probability once
//!   the pointer has moved at least once and has been idle past a threshold.
//! - A periodic sweep expires pulses past their TTL.
//! - A hard cap at insert bounds the set even if the sweep stalls.
//!
//! Everything here is timestamp-driven: callers pass `now_ms` explicitly and
//! only the tokio runtime layer touches a clock, so lifecycle behavior is
//! fully deterministic under test.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::config::PulseConfig;
use super::noise::NoiseSource;
use super::regime::Regime;
use crate::helpers::px_to_pct;

/// A transient visual pulse. Position is captured as viewport percentages at
/// creation and never recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicroPulse {
    /// Unique within the engine's lifetime.
    pub id: u64,
    /// Horizontal position, percent of viewport width at spawn.
    pub x_pct: f64,
    /// Vertical position, percent of viewport height at spawn.
    pub y_pct: f64,
    /// Spawn timestamp (ms, engine monotonic).
    pub created_at_ms: u64,
}

/// Last known pointer state, fed by the host UI layer.
///
/// `has_moved` stays false until the first real movement, so a completely
/// static view never spawns pulses regardless of elapsed time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: Option<(f64, f64)>,
    last_move_ms: u64,
    has_moved: bool,
}

impl PointerTracker {
    /// Record a movement event. A repeat of the last exact position is not a
    /// movement and does not reset the idle clock.
    pub fn record(&mut self, x: f64, y: f64, now_ms: u64) {
        if self.position == Some((x, y)) {
            return;
        }
        self.position = Some((x, y));
        self.last_move_ms = now_ms;
        self.has_moved = true;
        trace!(target: "alpha_weather::pulse", x, y, now_ms, "pointer moved");
    }

    /// Milliseconds since the last recorded movement.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_move_ms)
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }
}

/// Owner of the live micro-pulse set.
///
/// Exclusively owned by the engine controller; the render layer only ever
/// sees cloned snapshots, so sweeps and inserts can never tear a frame.
#[derive(Debug)]
pub struct PulseField {
    config: PulseConfig,
    pulses: VecDeque<MicroPulse>,
    next_id: u64,
    total_spawned: u64,
}

impl PulseField {
    pub fn new(config: PulseConfig) -> Self {
        Self {
            config,
            pulses: VecDeque::new(),
            next_id: 0,
            total_spawned: 0,
        }
    }

    /// Run one spawn check. Returns the spawned pulse, if any.
    ///
    /// Spawns iff the pointer has ever moved, has been idle strictly longer
    /// than the idle threshold, and the roll passes the regime's spawn
    /// probability. The new pulse scatters around the pointer by independent
    /// uniform offsets per axis, then captures viewport percentages.
    pub fn spawn_check(
        &mut self,
        regime: Regime,
        pointer: &PointerTracker,
        viewport: (f64, f64),
        now_ms: u64,
        noise: &mut dyn NoiseSource,
    ) -> Option<MicroPulse> {
        if !pointer.has_moved() {
            return None;
        }
        let idle_ms = pointer.idle_ms(now_ms);
        if idle_ms <= self.config.idle_threshold_ms {
            return None;
        }
        // Strict less-than: probability 0.0 can never pass, even on a 0.0 roll.
        let probability = self.config.spawn_probability(regime);
        if noise.roll() >= probability {
            return None;
        }
        let (px, py) = pointer.position()?;

        let scatter = self.config.scatter_px;
        let x = px + noise.uniform(-scatter, scatter);
        let y = py + noise.uniform(-scatter, scatter);

        let pulse = MicroPulse {
            id: self.next_id,
            x_pct: px_to_pct(x, viewport.0),
            y_pct: px_to_pct(y, viewport.1),
            created_at_ms: now_ms,
        };
        self.next_id += 1;
        self.total_spawned += 1;

        // Trim from the oldest end before insert: keep the newest
        // `retained_on_insert`, then push. Bounds the set even if the
        // expiry sweep stalls.
        while self.pulses.len() > self.config.retained_on_insert {
            let dropped = self.pulses.pop_front();
            trace!(
                target: "alpha_weather::pulse",
                dropped_id = dropped.map(|p| p.id),
                "cap trim before insert"
            );
        }
        self.pulses.push_back(pulse);

        debug!(
            target: "alpha_weather::pulse",
            id = pulse.id,
            x_pct = pulse.x_pct,
            y_pct = pulse.y_pct,
            idle_ms,
            ?regime,
            active = self.pulses.len(),
            "micro-pulse spawned"
        );
        Some(pulse)
    }

    /// Run one expiry sweep, removing every pulse whose age has reached the
    /// TTL. Returns the number removed.
    pub fn sweep(&mut self, now_ms: u64) -> usize {
        let ttl = self.config.ttl_ms;
        let before = self.pulses.len();
        self.pulses
            .retain(|p| now_ms.saturating_sub(p.created_at_ms) < ttl);
        let removed = before - self.pulses.len();
        if removed > 0 {
            debug!(
                target: "alpha_weather::pulse",
                removed,
                active = self.pulses.len(),
                "expiry sweep"
            );
        }
        removed
    }

    /// Snapshot of the live set, oldest first.
    pub fn active(&self) -> Vec<MicroPulse> {
        self.pulses.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Pulses spawned over the engine's lifetime (diagnostics).
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::noise::ScriptedNoise;

    const VIEWPORT: (f64, f64) = (1000.0, 500.0);

    fn moved_pointer(now_ms: u64) -> PointerTracker {
        let mut pointer = PointerTracker::default();
        pointer.record(500.0, 250.0, now_ms);
        pointer
    }

    #[test]
    fn no_spawn_before_first_movement() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = PointerTracker::default();
        let mut noise = ScriptedNoise::always_spawn();

        // Hours of idle on a never-moved pointer spawn nothing.
        for t in (0..10_000_000u64).step_by(600_000) {
            assert!(field
                .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, t, &mut noise)
                .is_none());
        }
        assert_eq!(field.len(), 0);
    }

    #[test]
    fn efficient_regime_never_spawns() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(0);
        // Roll of exactly 0.0 still fails a probability of exactly 0.0.
        let mut noise = ScriptedNoise::always_spawn();

        for tick in 1..1000u64 {
            let now = tick * 600;
            assert!(field
                .spawn_check(Regime::Efficient, &pointer, VIEWPORT, now, &mut noise)
                .is_none());
        }
        assert_eq!(field.total_spawned(), 0);
    }

    #[test]
    fn spawn_requires_idle_past_threshold() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(1000);
        let mut noise = ScriptedNoise::always_spawn();

        // Idle exactly at the threshold: no spawn (strict inequality).
        assert!(field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 1200, &mut noise)
            .is_none());
        // One past the threshold: spawns.
        assert!(field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 1201, &mut noise)
            .is_some());
    }

    #[test]
    fn spawn_roll_respects_probability_boundary() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(0);

        // Roll equal to p fails (strict less-than), just below passes.
        let mut noise = ScriptedNoise::new().with_rolls([0.30, 0.2999]).with_uniforms([0.0]);
        assert!(field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 600, &mut noise)
            .is_none());
        assert!(field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 1200, &mut noise)
            .is_some());
    }

    #[test]
    fn spawn_captures_percent_position() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(0);
        // Zero scatter: pulse lands exactly on the pointer.
        let mut noise = ScriptedNoise::always_spawn();

        let pulse = field
            .spawn_check(Regime::Emerging, &pointer, VIEWPORT, 600, &mut noise)
            .unwrap();
        assert_eq!(pulse.x_pct, 50.0);
        assert_eq!(pulse.y_pct, 50.0);
        assert_eq!(pulse.created_at_ms, 600);
    }

    #[test]
    fn scatter_is_clamped_to_viewport() {
        let mut field = PulseField::new(PulseConfig::default());
        let mut pointer = PointerTracker::default();
        pointer.record(990.0, 5.0, 0);
        // Max positive scatter on x pushes past the right edge; max negative
        // on y pushes above the top. Both clamp.
        let mut noise = ScriptedNoise::new()
            .with_rolls([0.0])
            .with_uniforms([75.0, -75.0]);

        let pulse = field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 600, &mut noise)
            .unwrap();
        assert_eq!(pulse.x_pct, 100.0);
        assert_eq!(pulse.y_pct, 0.0);
    }

    #[test]
    fn cap_holds_without_sweeps() {
        let config = PulseConfig::default().with_ttl_ms(u64::MAX);
        let mut field = PulseField::new(config);
        let pointer = moved_pointer(0);
        let mut noise = ScriptedNoise::always_spawn();

        for tick in 1..200u64 {
            field.spawn_check(Regime::Mechanical, &pointer, VIEWPORT, tick * 600, &mut noise);
            assert!(field.len() <= 9, "cap breached at tick {tick}");
        }
        assert_eq!(field.len(), 9);
        assert_eq!(field.total_spawned(), 199);

        // The survivors are the 9 newest.
        let ids: Vec<u64> = field.active().iter().map(|p| p.id).collect();
        assert_eq!(ids, (190..199).collect::<Vec<_>>());
    }

    #[test]
    fn ttl_boundary() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(0);
        let mut noise = ScriptedNoise::always_spawn();

        let pulse = field
            .spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 1000, &mut noise)
            .unwrap();

        // One ms short of the TTL: still live.
        assert_eq!(field.sweep(pulse.created_at_ms + 1499), 0);
        assert_eq!(field.len(), 1);

        // At the TTL: removed.
        assert_eq!(field.sweep(pulse.created_at_ms + 1500), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn sweep_only_removes_expired() {
        let mut field = PulseField::new(PulseConfig::default());
        let pointer = moved_pointer(0);
        let mut noise = ScriptedNoise::always_spawn();

        field.spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 600, &mut noise);
        field.spawn_check(Regime::Mechanical, &pointer, VIEWPORT, 1800, &mut noise);

        // At 2200 the first pulse is 1600ms old, the second 400ms.
        assert_eq!(field.sweep(2200), 1);
        assert_eq!(field.active()[0].created_at_ms, 1800);
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut field = PulseField::new(PulseConfig::default().with_ttl_ms(u64::MAX));
        let pointer = moved_pointer(0);
        let mut noise = ScriptedNoise::always_spawn();

        let a = field
            .spawn_check(Regime::Emerging, &pointer, VIEWPORT, 600, &mut noise)
            .unwrap();
        let b = field
            .spawn_check(Regime::Emerging, &pointer, VIEWPORT, 1200, &mut noise)
            .unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn repeat_position_does_not_reset_idle_clock() {
        let mut pointer = PointerTracker::default();
        pointer.record(10.0, 10.0, 0);
        pointer.record(10.0, 10.0, 5000);
        assert_eq!(pointer.idle_ms(6000), 6000);

        pointer.record(11.0, 10.0, 5000);
        assert_eq!(pointer.idle_ms(6000), 1000);
    }
}
