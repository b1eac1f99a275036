//! Injectable randomness for jitter and spawn rolls.
//!
//! Every random draw in the engine goes through [`NoiseSource`] so tests can
//! script exact sequences and assert bucket boundaries (force a spawn roll
//! to pass or fail, pin the index jitter to an endpoint). Production uses the
//! thread RNG; nothing here needs to be cryptographically strong.

use std::collections::VecDeque;

use rand::Rng;

/// Source of the engine's randomness.
pub trait NoiseSource: Send {
    /// Uniform draw in [0, 1). Used for spawn-probability rolls.
    fn roll(&mut self) -> f64;

    /// Uniform draw in [lo, hi]. Used for index jitter and pulse scatter.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;
}

/// Thread-RNG noise source for production use.
#[derive(Debug, Default)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn roll(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        rand::thread_rng().gen_range(lo..=hi)
    }
}

/// Scripted noise source for tests.
///
/// Pops queued values in order; once a queue runs dry it repeats its final
/// value (or a neutral fallback if never filled), so a short script can drive
/// an arbitrarily long run.
#[derive(Debug, Default)]
pub struct ScriptedNoise {
    rolls: VecDeque<f64>,
    uniforms: VecDeque<f64>,
    last_roll: Option<f64>,
    last_uniform: Option<f64>,
}

impl ScriptedNoise {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue spawn-roll values, consumed in order.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue uniform-draw values, consumed in order. Scripted values are
    /// clamped into the requested range at draw time so a script written for
    /// jitter also works for pixel scatter.
    pub fn with_uniforms(mut self, uniforms: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(uniforms);
        self
    }

    /// A source whose every roll passes any positive spawn probability and
    /// whose uniform draws sit at the midpoint (zero jitter, zero scatter).
    pub fn always_spawn() -> Self {
        Self::new().with_rolls([0.0]).with_uniforms([0.0])
    }

    /// A source whose every roll fails even probability 1.0 - epsilon.
    pub fn never_spawn() -> Self {
        Self::new().with_rolls([1.0]).with_uniforms([0.0])
    }
}

impl NoiseSource for ScriptedNoise {
    fn roll(&mut self) -> f64 {
        if let Some(v) = self.rolls.pop_front() {
            self.last_roll = Some(v);
        }
        self.last_roll.unwrap_or(1.0)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if let Some(v) = self.uniforms.pop_front() {
            self.last_uniform = Some(v);
        }
        self.last_uniform.unwrap_or(0.0).clamp(lo, hi)
    }
}
