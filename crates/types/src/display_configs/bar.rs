//! Vertical rounded bar configuration

use serde::{Deserialize, Serialize};

use crate::color::Color;

fn default_roundness() -> f64 {
    50.0
}

fn default_thickness() -> f64 {
    6.0
}

fn default_separation() -> f64 {
    4.0
}

fn default_fill() -> Color {
    Color::MAGENTA
}

fn default_outline() -> Color {
    Color::THEME
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Caption drawn under the bar; keep it short
    #[serde(default)]
    pub title: String,
    /// Corner diameter in pixels (0 = square corners)
    #[serde(default = "default_roundness")]
    pub roundness: f64,
    /// Outline stroke width in pixels
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Gap between the outline and the figure edge in pixels
    #[serde(default = "default_separation")]
    pub separation: f64,
    #[serde(default = "default_fill")]
    pub fill: Color,
    #[serde(default = "default_outline")]
    pub outline: Color,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            roundness: default_roundness(),
            thickness: default_thickness(),
            separation: default_separation(),
            fill: default_fill(),
            outline: default_outline(),
        }
    }
}
