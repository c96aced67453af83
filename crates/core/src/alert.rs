//! Threshold alerting.
//!
//! [`evaluate`] is pure: it turns a channel's bounds and a new value into an
//! [`Alerts`] value. Reporting is left to an [`AlertSink`], so the registry
//! never logs from inside its update path and the evaluator stays testable
//! without I/O.

use log::{error, warn};
use sensor_panel_types::{ChannelBounds, ChannelSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Which side of a threshold a value fell on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Outside the warning band
    Warning,
    /// Outside the hard `[min, max]` range
    Critical,
}

/// Outcome of one evaluation. The warning and critical checks are
/// independent, so both may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alerts {
    pub warning: Option<Direction>,
    pub critical: Option<Direction>,
}

impl Alerts {
    pub fn is_none(&self) -> bool {
        self.warning.is_none() && self.critical.is_none()
    }

    /// Warning first, then critical
    pub fn events(&self) -> impl Iterator<Item = (Severity, Direction)> {
        let warning = self.warning.map(|d| (Severity::Warning, d));
        let critical = self.critical.map(|d| (Severity::Critical, d));
        warning.into_iter().chain(critical)
    }
}

fn default_suppress_misconfigured() -> bool {
    true
}

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// Skip a check whose bounds are non-finite or collapse to a single point
    #[serde(default = "default_suppress_misconfigured")]
    pub suppress_misconfigured: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            suppress_misconfigured: default_suppress_misconfigured(),
        }
    }
}

fn usable_band(low: f64, high: f64, policy: &AlertPolicy) -> bool {
    if !policy.suppress_misconfigured {
        return true;
    }
    low.is_finite() && high.is_finite() && low != high
}

fn check(value: f64, low: f64, high: f64) -> Option<Direction> {
    if value > high {
        Some(Direction::High)
    } else if value < low {
        Some(Direction::Low)
    } else {
        None
    }
}

/// Decide which alerts a new value raises.
///
/// NaN compares false against every bound and therefore raises nothing.
pub fn evaluate(bounds: &ChannelBounds, value: f64, policy: &AlertPolicy) -> Alerts {
    let warning = if usable_band(bounds.warning_min, bounds.warning_max, policy) {
        check(value, bounds.warning_min, bounds.warning_max)
    } else {
        None
    };

    let critical = if usable_band(bounds.min, bounds.max, policy) {
        check(value, bounds.min, bounds.max)
    } else {
        None
    };

    Alerts { warning, critical }
}

/// One alert raised by a channel write
#[derive(Debug, Clone, Copy)]
pub struct AlertEvent<'a> {
    pub channel: &'a ChannelSpec,
    pub value: f64,
    pub severity: Severity,
    pub direction: Direction,
}

impl fmt::Display for AlertEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match (self.severity, self.direction) {
            (Severity::Warning, Direction::High) => "High",
            (Severity::Warning, Direction::Low) => "Low",
            (Severity::Critical, Direction::High) => "Critically high",
            (Severity::Critical, Direction::Low) => "Critically low",
        };
        write!(
            f,
            "{} {} {} {}",
            prefix,
            self.channel.display_name(),
            self.value,
            self.channel.unit
        )
    }
}

/// Consumer of alert events
pub trait AlertSink: Send + Sync {
    /// Called on the writer's thread; keep it short.
    fn emit(&self, event: &AlertEvent<'_>);
}

/// Reports warnings at `warn` and critical alerts at `error`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn emit(&self, event: &AlertEvent<'_>) {
        match event.severity {
            Severity::Warning => warn!("{}", event),
            Severity::Critical => error!("{}", event),
        }
    }
}

/// Owned copy of an [`AlertEvent`]
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub channel: String,
    pub value: f64,
    pub severity: Severity,
    pub direction: Direction,
}

/// Keeps every event in memory until drained
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    records: Mutex<Vec<AlertRecord>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<AlertRecord> {
        let mut records = self.records.lock().unwrap_or_else(|poisoned| {
            log::warn!("Alert record mutex was poisoned, recovering");
            poisoned.into_inner()
        });
        std::mem::take(&mut *records)
    }
}

impl AlertSink for RecordingAlertSink {
    fn emit(&self, event: &AlertEvent<'_>) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.push(AlertRecord {
            channel: event.channel.name.clone(),
            value: event.value,
            severity: event.severity,
            direction: event.direction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_panel_types::Unit;

    fn bounds() -> ChannelBounds {
        ChannelBounds::new(0.0, 100.0, 0.0, 95.0)
    }

    #[test]
    fn test_in_range_values_raise_nothing() {
        let policy = AlertPolicy::default();
        for v in [0.0, 12.5, 50.0, 94.9, 95.0] {
            assert!(evaluate(&bounds(), v, &policy).is_none(), "value {}", v);
        }
    }

    #[test]
    fn test_warning_only() {
        let alerts = evaluate(&bounds(), 97.0, &AlertPolicy::default());
        assert_eq!(alerts.warning, Some(Direction::High));
        assert_eq!(alerts.critical, None);
    }

    #[test]
    fn test_warning_and_critical_fire_together() {
        let alerts = evaluate(&bounds(), 101.0, &AlertPolicy::default());
        assert_eq!(alerts.warning, Some(Direction::High));
        assert_eq!(alerts.critical, Some(Direction::High));
        let order: Vec<_> = alerts.events().map(|(s, _)| s).collect();
        assert_eq!(order, vec![Severity::Warning, Severity::Critical]);
    }

    #[test]
    fn test_low_side() {
        let b = ChannelBounds::new(35.0, 89.0, 40.0, 80.0);
        let alerts = evaluate(&b, 37.0, &AlertPolicy::default());
        assert_eq!(alerts.warning, Some(Direction::Low));
        assert_eq!(alerts.critical, None);

        let alerts = evaluate(&b, 30.0, &AlertPolicy::default());
        assert_eq!(alerts.warning, Some(Direction::Low));
        assert_eq!(alerts.critical, Some(Direction::Low));
    }

    #[test]
    fn test_warning_band_may_extend_past_hard_bounds() {
        // e.g. the derived secondary power channel
        let b = ChannelBounds::new(0.0, 100.0, -50.0, 150.0);
        let alerts = evaluate(&b, 120.0, &AlertPolicy::default());
        assert_eq!(alerts.warning, None);
        assert_eq!(alerts.critical, Some(Direction::High));
    }

    #[test]
    fn test_nan_fails_open() {
        assert!(evaluate(&bounds(), f64::NAN, &AlertPolicy::default()).is_none());
    }

    #[test]
    fn test_degenerate_range_suppressed() {
        let b = ChannelBounds::new(10.0, 10.0, 10.0, 10.0);
        let policy = AlertPolicy::default();
        assert!(evaluate(&b, 50.0, &policy).is_none());

        let strict = AlertPolicy {
            suppress_misconfigured: false,
        };
        let alerts = evaluate(&b, 50.0, &strict);
        assert_eq!(alerts.warning, Some(Direction::High));
        assert_eq!(alerts.critical, Some(Direction::High));
    }

    #[test]
    fn test_non_finite_bound_suppressed() {
        let b = ChannelBounds::new(0.0, f64::INFINITY, 0.0, 95.0);
        let alerts = evaluate(&b, 1e12, &AlertPolicy::default());
        assert_eq!(alerts.warning, Some(Direction::High));
        assert_eq!(alerts.critical, None);
    }

    #[test]
    fn test_policy_defaults_when_missing() {
        let policy: AlertPolicy = serde_json::from_str("{}").unwrap();
        assert!(policy.suppress_misconfigured);
    }

    #[test]
    fn test_event_message() {
        let spec = ChannelSpec::new("cpu_temperature", Unit::Celsius, 35.0, 89.0, 35.0, 89.0);
        let event = AlertEvent {
            channel: &spec,
            value: 91.0,
            severity: Severity::Critical,
            direction: Direction::High,
        };
        assert_eq!(event.to_string(), "Critically high cpu temperature 91 °C");
    }

    #[test]
    fn test_recording_sink_drains() {
        let spec = ChannelSpec::new("ram_usage", Unit::Percentage, 0.0, 100.0, 0.0, 95.0);
        let sink = RecordingAlertSink::new();
        sink.emit(&AlertEvent {
            channel: &spec,
            value: 97.0,
            severity: Severity::Warning,
            direction: Direction::High,
        });
        let records = sink.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel, "ram_usage");
        assert!(sink.drain().is_empty());
    }
}
