//! Display metric derivation.
//!
//! Maps (regime, progression) to the simulated metrics the dashboard shows:
//! the composite Alpha Weather Index, a confidence label, and the estimated
//! predictability window. The index carries bounded uniform jitter resampled
//! on every recomputation. That jitter is intentional "live" feel, not
//! measurement noise; two calls with identical inputs need not agree.

use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use super::regime::Regime;
use crate::helpers::round_to_dp;

/// Confidence that the displayed regime persists. Pure function of
/// progression: HIGH only at the extremes of the narrative timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Moderate,
}

impl Confidence {
    /// HIGH iff progression is past 80 or short of 20; the boundary values
    /// themselves read MODERATE.
    pub fn from_progression(progression: f64) -> Self {
        if progression > 80.0 || progression < 20.0 {
            Confidence::High
        } else {
            Confidence::Moderate
        }
    }
}

/// One recomputation's worth of display metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Composite index, rounded to one decimal.
    pub index_value: f64,
    pub confidence: Confidence,
    /// Estimated predictability window, fixed per regime.
    pub window: &'static str,
}

/// Half-width of the uniform jitter on the index.
const INDEX_JITTER: f64 = 1.0;

/// Derive the display metrics for a regime/progression pair.
///
/// Total over its domain; callers clamp progression to [0, 100] before
/// calling. The jitter term is resampled from `noise` on every call.
pub fn derive_metrics(
    regime: Regime,
    progression: f64,
    noise: &mut dyn NoiseSource,
) -> DerivedMetrics {
    let jitter = noise.uniform(-INDEX_JITTER, INDEX_JITTER);
    let raw = regime.index_base() + progression / 10.0 + jitter;
    DerivedMetrics {
        index_value: round_to_dp(raw, 1),
        confidence: Confidence::from_progression(progression),
        window: regime.window(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::noise::{ScriptedNoise, ThreadRngNoise};

    #[test]
    fn confidence_buckets() {
        assert_eq!(Confidence::from_progression(0.0), Confidence::High);
        assert_eq!(Confidence::from_progression(19.9), Confidence::High);
        assert_eq!(Confidence::from_progression(20.0), Confidence::Moderate);
        assert_eq!(Confidence::from_progression(50.0), Confidence::Moderate);
        assert_eq!(Confidence::from_progression(80.0), Confidence::Moderate);
        assert_eq!(Confidence::from_progression(80.1), Confidence::High);
        assert_eq!(Confidence::from_progression(100.0), Confidence::High);
    }

    #[test]
    fn index_value_with_pinned_jitter() {
        let mut noise = ScriptedNoise::new().with_uniforms([0.0]);
        let m = derive_metrics(Regime::Emerging, 45.0, &mut noise);
        assert_eq!(m.index_value, 49.5); // 45.0 + 4.5 + 0.0
        assert_eq!(m.confidence, Confidence::Moderate);
        assert_eq!(m.window, "15 minutes");
    }

    #[test]
    fn index_value_stays_within_jitter_envelope() {
        let mut noise = ThreadRngNoise;
        for regime in Regime::ALL {
            for progression in [0.0, 15.0, 45.0, 75.0, 100.0] {
                let m = derive_metrics(regime, progression, &mut noise);
                let center = regime.index_base() + progression / 10.0;
                // Rounding to one decimal can push at most 0.05 past the envelope.
                assert!(
                    m.index_value >= center - 1.05 && m.index_value <= center + 1.05,
                    "{regime:?} at {progression}: {}",
                    m.index_value
                );
            }
        }
    }

    #[test]
    fn index_rounds_to_one_decimal() {
        let mut noise = ScriptedNoise::new().with_uniforms([0.333]);
        let m = derive_metrics(Regime::Efficient, 10.0, &mut noise);
        assert_eq!(m.index_value, 13.3); // 12.0 + 1.0 + 0.333 -> 13.333 -> 13.3
    }

    #[test]
    fn windows_are_fixed_per_regime() {
        let mut noise = ScriptedNoise::new();
        assert_eq!(
            derive_metrics(Regime::Efficient, 10.0, &mut noise).window,
            "0 minutes"
        );
        assert_eq!(
            derive_metrics(Regime::Emerging, 50.0, &mut noise).window,
            "15 minutes"
        );
        assert_eq!(
            derive_metrics(Regime::Mechanical, 90.0, &mut noise).window,
            "45 minutes"
        );
    }
}
