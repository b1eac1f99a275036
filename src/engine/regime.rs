//! Market regime state and transition policy.
//!
//! The regime is the discrete "weather" of the simulated market. Three states
//! form a narrative order from fully efficient price discovery to fully
//! mechanical flow dominance:
//!
//! - **Efficient (0)**: news-driven, no structural predictability
//! - **Emerging (1)**: structure forming, flows becoming correlated
//! - **Mechanical (2)**: feedback loops dominate price formation
//!
//! Transitions come from two inputs: a discrete selection (clicking a regime
//! marker) and a continuous progression slider. The slider auto-promotes and
//! auto-demotes the regime at its extremes, with sticky hysteresis bands at
//! [20, 30] and [70, 80] so small drags near a boundary never flap the state.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Discrete market regime. Narrative order: Efficient < Emerging < Mechanical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// News-driven market, instant alpha decay.
    Efficient,
    /// Structure forming, predictability windows opening.
    Emerging,
    /// Flow-driven market, feedback loops dominant.
    Mechanical,
}

impl Regime {
    /// All regimes in narrative order.
    pub const ALL: [Regime; 3] = [Regime::Efficient, Regime::Emerging, Regime::Mechanical];

    /// Progression anchor a discrete selection snaps to.
    pub fn anchor(&self) -> f64 {
        match self {
            Regime::Efficient => 10.0,
            Regime::Emerging => 50.0,
            Regime::Mechanical => 90.0,
        }
    }

    /// Base value for the composite index.
    pub fn index_base(&self) -> f64 {
        match self {
            Regime::Efficient => 12.0,
            Regime::Emerging => 45.0,
            Regime::Mechanical => 88.0,
        }
    }

    /// Estimated predictability window shown next to the metrics.
    pub fn window(&self) -> &'static str {
        match self {
            Regime::Efficient => "0 minutes",
            Regime::Emerging => "15 minutes",
            Regime::Mechanical => "45 minutes",
        }
    }

    /// Display label for the current-market-state heading.
    pub fn label(&self) -> &'static str {
        match self {
            Regime::Efficient => "Efficient / Random",
            Regime::Emerging => "Emerging Structure",
            Regime::Mechanical => "Mechanical Flow",
        }
    }

    /// Canned interpretive paragraph for the left panel.
    pub fn interpretation(&self) -> &'static str {
        match self {
            Regime::Efficient => {
                "Price action is dominated by news arrival. Alpha decay is instant. \
                 No structural predictability detected."
            }
            Regime::Emerging => {
                "Market structure is forming. Flows are becoming correlated. \
                 Predictability windows are opening in the 15-30m horizon."
            }
            Regime::Mechanical => {
                "Feedback loops are dominant. Passive rebalancing and volatility \
                 control flows are overriding fundamental price discovery."
            }
        }
    }
}

/// Which surface hosts the engine. The minimal marketing surface opens in
/// the quiet state; the gated dashboard opens mid-narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceVariant {
    /// Landing-page teaser surface, starts Efficient.
    Minimal,
    /// Full gated dashboard, starts Emerging.
    #[default]
    Dashboard,
}

impl SurfaceVariant {
    fn initial_regime(&self) -> Regime {
        match self {
            SurfaceVariant::Minimal => Regime::Efficient,
            SurfaceVariant::Dashboard => Regime::Emerging,
        }
    }
}

/// Live regime state: the discrete regime plus the continuous progression
/// scalar driving it. `progression` always holds a value in [0, 100].
///
/// Mutated only through [`RegimeState::select`] and [`RegimeState::set_progression`];
/// the index value derived from it lives with the controller so that a single
/// transition triggers exactly one metric recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeState {
    pub regime: Regime,
    pub progression: f64,
}

/// Hysteresis band edges for slider-driven transitions. Between `LOW_SNAP`
/// and `BAND_LO`, and between `BAND_HI` and `HIGH_SNAP`, the regime is sticky.
const LOW_SNAP: f64 = 20.0;
const BAND_LO: f64 = 30.0;
const BAND_HI: f64 = 70.0;
const HIGH_SNAP: f64 = 80.0;

/// Progression default shared by both surface variants.
const DEFAULT_PROGRESSION: f64 = 45.0;

impl Default for RegimeState {
    fn default() -> Self {
        Self::new(SurfaceVariant::default())
    }
}

impl RegimeState {
    /// Create the initial state for a surface variant.
    pub fn new(variant: SurfaceVariant) -> Self {
        Self {
            regime: variant.initial_regime(),
            progression: DEFAULT_PROGRESSION,
        }
    }

    /// Apply a discrete regime selection (marker click).
    ///
    /// Always snaps progression to the target's anchor, including when the
    /// target is already active. Re-selecting therefore resets a dragged
    /// slider back to the anchor; this mirrors the dashboard's "jump to
    /// regime" affordance and is a deliberate choice, not a missing no-op.
    /// Idempotent: a second identical selection changes nothing further.
    pub fn select(&mut self, target: Regime) {
        let prev = self.regime;
        self.regime = target;
        self.progression = target.anchor();
        if prev != target {
            debug!(
                target: "alpha_weather::regime",
                from = ?prev,
                to = ?target,
                anchor = self.progression,
                "discrete regime selection"
            );
        }
    }

    /// Apply a progression slider change. The value is clamped to [0, 100]
    /// and always stored; the regime auto-switches at the extremes and is
    /// pulled to Emerging from either extreme through the mid band, with
    /// sticky hysteresis in [20, 30] and [70, 80].
    pub fn set_progression(&mut self, value: f64) {
        let value = value.clamp(0.0, 100.0);
        let prev = self.regime;

        if value < LOW_SNAP {
            self.regime = Regime::Efficient;
        } else if value > HIGH_SNAP {
            self.regime = Regime::Mechanical;
        } else if value > BAND_LO && value < BAND_HI && self.regime == Regime::Efficient {
            self.regime = Regime::Emerging;
        } else if value > BAND_LO && value < BAND_HI && self.regime == Regime::Mechanical {
            self.regime = Regime::Emerging;
        }
        // [20, 30] and [70, 80] fall through: regime sticks.

        self.progression = value;
        if prev != self.regime {
            debug!(
                target: "alpha_weather::regime",
                from = ?prev,
                to = ?self.regime,
                progression = value,
                "slider-driven regime switch"
            );
        }
    }
}
