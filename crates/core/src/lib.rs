//! sensor-panel-core: Channel registry and alerting for the sensor panel.
//!
//! This crate owns the live telemetry state: the [`Registry`] of channels,
//! the pure alert evaluator and its sinks, the repaint hook that links a
//! channel to whatever draws it, and shared unit conversions.

pub mod alert;
mod channel;
pub mod constants;
mod index_map;
mod registry;
pub mod repaint;

pub use alert::{
    evaluate, AlertEvent, AlertPolicy, AlertRecord, AlertSink, Alerts, Direction, LogAlertSink,
    RecordingAlertSink, Severity,
};
pub use channel::ChannelSnapshot;
pub use constants::{celsius_to_fahrenheit, cost_per_hour, fahrenheit_to_celsius};
pub use index_map::{IndexMapError, IndexTarget, ResolvedIndexMap};
pub use registry::{ChannelId, Registry, RegistryError};
pub use repaint::{RepaintFlag, RepaintHook};
