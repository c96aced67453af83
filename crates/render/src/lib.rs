//! sensor-panel-render: figure geometry for the sensor panel.
//!
//! Figures turn a [`ChannelSnapshot`](sensor_panel_core::ChannelSnapshot)
//! into a backend-neutral [`Drawing`]. With the `cairo` feature the drawing
//! can be replayed onto a Cairo context.

pub mod bar;
pub mod drawing;
pub mod gauge;
pub mod geometry;
pub mod icon_field;
pub mod renderable;
pub mod text;
pub mod thermostat;

#[cfg(feature = "cairo")]
pub mod cairo_backend;

pub use drawing::{ClipShape, Drawing, Point, Primitive, Rect, Size};
pub use geometry::{fraction, percent_label, snapshot_fraction};
pub use renderable::{Figure, FigureStyle, Renderable};
pub use text::{fit_font_to_box, fit_font_to_width, MonospaceMetrics, TextMetrics};

#[cfg(feature = "cairo")]
pub use cairo_backend::{replay, PangoMetrics, DEFAULT_FONT_FAMILY};
