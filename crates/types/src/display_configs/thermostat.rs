//! Thermostat (bulb and column) configuration

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_bulb_ratio() -> f64 {
    0.73
}

fn default_bulb_sweep_deg() -> f64 {
    300.0
}

fn default_wall_ratio() -> f64 {
    0.035
}

fn default_icon_ratio() -> f64 {
    0.3
}

fn default_outline() -> Color {
    Color::THEME
}

fn default_fill() -> Color {
    Color::RED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    /// Bulb diameter as a fraction of the figure width
    #[serde(default = "default_bulb_ratio")]
    pub bulb_ratio: f64,
    /// Degrees of the bulb outline left open for the column (180 to 360)
    #[serde(default = "default_bulb_sweep_deg")]
    pub bulb_sweep_deg: f64,
    /// Wall thickness as a fraction of the figure width
    #[serde(default = "default_wall_ratio")]
    pub wall_ratio: f64,
    #[serde(default = "default_icon_ratio")]
    pub icon_ratio: f64,
    #[serde(default = "default_outline")]
    pub outline: Color,
    #[serde(default = "default_fill")]
    pub fill: Color,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            bulb_ratio: default_bulb_ratio(),
            bulb_sweep_deg: default_bulb_sweep_deg(),
            wall_ratio: default_wall_ratio(),
            icon_ratio: default_icon_ratio(),
            outline: default_outline(),
            fill: default_fill(),
            icon: None,
        }
    }
}
