//! sensor-panel-types: Shared data types for the sensor panel.
//!
//! This crate contains pure data types (units, channel specs, adapter and
//! figure configs) shared across all sensor-panel crates. Nothing here does
//! I/O, which keeps it usable as the foundation layer.

pub mod channel;
pub mod color;
pub mod display_configs;
pub mod source_configs;
pub mod unit;

// Re-export commonly used types at the crate root for convenience
pub use channel::{default_channel_table, ChannelBounds, ChannelSpec, DisplayFormat};
pub use color::Color;
pub use display_configs::{
    BarConfig, FigureConfig, FractionPolicy, GaugeConfig, IconFieldConfig, ThermostatConfig,
};
pub use source_configs::{
    CommandSpec, DatagramConfig, DerivedPowerConfig, HwInfoConfig, IndexEntry, IndexMap,
    RestartPolicy, SmartPlugConfig, INDEX_MAP_VERSION, MAX_FRAME_LEN,
};
pub use unit::{Placement, Unit};
