//! The capability every figure implements.

use sensor_panel_core::ChannelSnapshot;
use sensor_panel_types::{Color, FigureConfig, FractionPolicy};
use serde::{Deserialize, Serialize};

use crate::drawing::{Drawing, Primitive, Rect, Size};
use crate::text::TextMetrics;
use crate::{bar, gauge, icon_field, thermostat};

/// Turns a channel snapshot into a drawing sized to `frame`.
///
/// Implementations keep no state between calls; all geometry is derived
/// from the arguments every time.
pub trait Renderable {
    fn draw(&self, frame: Size, snapshot: &ChannelSnapshot, metrics: &dyn TextMetrics) -> Drawing;
}

fn default_background() -> Color {
    Color::BLACK
}

/// Settings shared by every figure on the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    #[serde(default)]
    pub fraction_policy: FractionPolicy,
    #[serde(default = "default_background")]
    pub background: Color,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            fraction_policy: FractionPolicy::default(),
            background: default_background(),
        }
    }
}

impl FigureStyle {
    pub(crate) fn begin(&self, frame: Size) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.push(Primitive::FillRect {
            rect: Rect::new(0.0, 0.0, frame.width, frame.height),
            color: self.background,
        });
        drawing
    }
}

/// A configured figure ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub config: FigureConfig,
    pub style: FigureStyle,
}

impl Figure {
    pub fn new(config: FigureConfig, style: FigureStyle) -> Self {
        Self { config, style }
    }
}

impl Renderable for Figure {
    fn draw(&self, frame: Size, snapshot: &ChannelSnapshot, metrics: &dyn TextMetrics) -> Drawing {
        match &self.config {
            FigureConfig::Gauge(config) => gauge::draw(config, &self.style, frame, snapshot, metrics),
            FigureConfig::Thermostat(config) => {
                thermostat::draw(config, &self.style, frame, snapshot, metrics)
            }
            FigureConfig::Bar(config) => bar::draw(config, &self.style, frame, snapshot, metrics),
            FigureConfig::IconField(config) => {
                icon_field::draw(config, &self.style, frame, snapshot, metrics)
            }
        }
    }
}

/// Drawn with the default style
impl Renderable for FigureConfig {
    fn draw(&self, frame: Size, snapshot: &ChannelSnapshot, metrics: &dyn TextMetrics) -> Drawing {
        Figure::new(self.clone(), FigureStyle::default()).draw(frame, snapshot, metrics)
    }
}
