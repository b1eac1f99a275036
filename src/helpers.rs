//! Small display-math helpers shared across the engine.

/// Round a value to `dp` decimal places.
///
/// Display-grade rounding for metric readouts; not suitable where exact
/// decimal semantics matter.
pub fn round_to_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Convert a pixel coordinate to a percentage of a viewport dimension,
/// clamped to [0, 100]. A degenerate (zero) dimension maps everything to 0.
pub fn px_to_pct(px: f64, dimension: f64) -> f64 {
    if dimension <= 0.0 {
        return 0.0;
    }
    (px / dimension * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_to_dp(42.84, 1), 42.8);
        assert_eq!(round_to_dp(42.85, 1), 42.9);
        assert_eq!(round_to_dp(-1.25, 1), -1.3);
        assert_eq!(round_to_dp(88.0, 1), 88.0);
    }

    #[test]
    fn pixel_to_percent_clamps() {
        assert_eq!(px_to_pct(960.0, 1920.0), 50.0);
        assert_eq!(px_to_pct(-40.0, 1920.0), 0.0);
        assert_eq!(px_to_pct(2500.0, 1920.0), 100.0);
        assert_eq!(px_to_pct(100.0, 0.0), 0.0);
    }
}
