//! Shared figure math.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::FractionPolicy;

/// Position of `value` between `min` and `max`, unclamped.
///
/// A degenerate range yields 0 instead of an infinite fraction.
pub fn fraction(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }
    (value - min) / span
}

/// The snapshot's fraction after `policy`
pub fn snapshot_fraction(snapshot: &ChannelSnapshot, policy: FractionPolicy) -> f64 {
    policy.apply(fraction(
        snapshot.value,
        snapshot.bounds.min,
        snapshot.bounds.max,
    ))
}

/// Round half up to a whole percent, `--` when not finite
pub fn percent_label(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if !percent.is_finite() {
        return "--%".to_string();
    }
    format!("{}%", (percent + 0.5).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(50.0, 0.0, 100.0), 0.5);
        assert!((fraction(62.0, 35.0, 89.0) - 0.5).abs() < 1e-12);
        assert_eq!(fraction(120.0, 0.0, 100.0), 1.2);
        assert_eq!(fraction(-10.0, 0.0, 100.0), -0.1);
        assert_eq!(fraction(7.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_negative_min() {
        assert_eq!(fraction(-500.0, -500.0, 1500.0), 0.0);
        assert_eq!(fraction(500.0, -500.0, 1500.0), 0.5);
    }

    #[test]
    fn test_policy_applied() {
        assert_eq!(FractionPolicy::Clamp.apply(fraction(120.0, 0.0, 100.0)), 1.0);
        assert_eq!(FractionPolicy::Preserve.apply(fraction(120.0, 0.0, 100.0)), 1.2);
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.0), "0%");
        assert_eq!(percent_label(0.426), "43%");
        assert_eq!(percent_label(0.424), "42%");
        assert_eq!(percent_label(1.2), "120%");
        assert_eq!(percent_label(f64::NAN), "--%");
    }
}
