//! sensor-panel: a telemetry sensor panel for a dedicated 1920x515 display
//!
//! This library ties the workspace crates together:
//! - Configuration loading and the default figure layout
//! - The GTK window that hosts one drawing area per figure
//!
//! Channel state lives in `sensor-panel-core`, the ingestion adapters in
//! `sensor-panel-sources` and the figure geometry in `sensor-panel-render`.

pub mod config;
pub mod ui;

// Re-export commonly used types
pub use config::{AppConfig, FigurePlacement, WindowConfig};
