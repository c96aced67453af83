//! Ring gauge configuration

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_sweep_deg() -> f64 {
    300.0
}

fn default_thickness_ratio() -> f64 {
    0.08
}

fn default_icon_ratio() -> f64 {
    0.28
}

fn default_color() -> Color {
    Color::THEME
}

/// Ring gauge: an open ring filled clockwise from its left end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Degrees of the ring that are drawn (< 360)
    #[serde(default = "default_sweep_deg")]
    pub sweep_deg: f64,
    /// Ring thickness as a fraction of the figure height
    #[serde(default = "default_thickness_ratio")]
    pub thickness_ratio: f64,
    /// Icon edge length as a fraction of the figure height
    #[serde(default = "default_icon_ratio")]
    pub icon_ratio: f64,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            sweep_deg: default_sweep_deg(),
            thickness_ratio: default_thickness_ratio(),
            icon_ratio: default_icon_ratio(),
            color: default_color(),
            icon: None,
        }
    }
}
