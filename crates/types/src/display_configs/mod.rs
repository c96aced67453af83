//! Figure configuration types.

pub mod bar;
pub mod gauge;
pub mod icon_field;
pub mod thermostat;

use serde::{Deserialize, Serialize};

pub use bar::BarConfig;
pub use gauge::GaugeConfig;
pub use icon_field::IconFieldConfig;
pub use thermostat::ThermostatConfig;

/// What figures do with values outside a channel's `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FractionPolicy {
    /// Let out-of-range values over- or under-draw the geometry
    #[serde(rename = "preserve")]
    #[default]
    Preserve,
    /// Pin the fraction to `[0, 1]` before it reaches the geometry
    #[serde(rename = "clamp")]
    Clamp,
}

impl FractionPolicy {
    pub fn apply(&self, fraction: f64) -> f64 {
        match self {
            FractionPolicy::Preserve => fraction,
            FractionPolicy::Clamp => fraction.clamp(0.0, 1.0),
        }
    }
}

/// Type-safe enum for all figure configurations.
/// Uses serde tag for JSON serialization: {"figure_type": "gauge", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "figure_type")]
pub enum FigureConfig {
    #[serde(rename = "gauge")]
    Gauge(GaugeConfig),

    #[serde(rename = "thermostat")]
    Thermostat(ThermostatConfig),

    #[serde(rename = "bar")]
    Bar(BarConfig),

    #[serde(rename = "icon_field")]
    IconField(IconFieldConfig),
}

impl FigureConfig {
    pub fn figure_type(&self) -> &'static str {
        match self {
            FigureConfig::Gauge(_) => "gauge",
            FigureConfig::Thermostat(_) => "thermostat",
            FigureConfig::Bar(_) => "bar",
            FigureConfig::IconField(_) => "icon_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_config_serialization() {
        let config = FigureConfig::Gauge(GaugeConfig::default());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"figure_type\":\"gauge\""));

        let deserialized: FigureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.figure_type(), "gauge");
    }

    #[test]
    fn test_figure_config_fills_defaults() {
        let config: FigureConfig =
            serde_json::from_str(r#"{"figure_type": "bar", "title": "CPU"}"#).unwrap();
        match config {
            FigureConfig::Bar(bar) => {
                assert_eq!(bar.title, "CPU");
                assert_eq!(bar.roundness, 50.0);
            }
            other => panic!("expected bar, got {:?}", other),
        }
    }

    #[test]
    fn test_fraction_policy() {
        assert_eq!(FractionPolicy::Preserve.apply(1.4), 1.4);
        assert_eq!(FractionPolicy::Preserve.apply(-0.2), -0.2);
        assert_eq!(FractionPolicy::Clamp.apply(1.4), 1.0);
        assert_eq!(FractionPolicy::Clamp.apply(-0.2), 0.0);
        assert_eq!(FractionPolicy::Clamp.apply(0.3), 0.3);
    }
}
