//! Static channel configuration.
//!
//! Bounds are configuration, not computed: they are fixed when the registry
//! is built and never change afterwards. The order of [`default_channel_table`]
//! matches the order HWiNFO exports its sensor values in, which the default
//! index map relies on.

use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// How a channel's current value is turned into display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayFormat {
    /// Rounded half-up to the nearest integer
    #[serde(rename = "integer")]
    #[default]
    Integer,
    /// One decimal place, trailing `.0` dropped
    #[serde(rename = "one_decimal")]
    OneDecimal,
}

impl DisplayFormat {
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "--".to_string();
        }
        match self {
            DisplayFormat::Integer => format!("{}", (value + 0.5).floor() as i64),
            DisplayFormat::OneDecimal => {
                // Rounds the exact binary value, ties to even
                let text = format!("{:.1}", value);
                match text.strip_suffix(".0") {
                    Some("-0") => "0".to_string(),
                    Some(whole) => whole.to_string(),
                    None => text,
                }
            }
        }
    }
}

/// The four thresholds that bound a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelBounds {
    /// Smallest value figures should expect
    pub min: f64,
    /// Largest value figures should expect
    pub max: f64,
    /// Values beneath this raise a low warning
    pub warning_min: f64,
    /// Values above this raise a high warning
    pub warning_max: f64,
}

impl ChannelBounds {
    pub fn new(min: f64, max: f64, warning_min: f64, warning_max: f64) -> Self {
        Self {
            min,
            max,
            warning_min,
            warning_max,
        }
    }
}

/// Configuration of one telemetry channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Stable identifier used by adapters and figures
    pub name: String,
    pub unit: Unit,
    #[serde(flatten)]
    pub bounds: ChannelBounds,
    #[serde(default)]
    pub display: DisplayFormat,
}

impl ChannelSpec {
    pub fn new(name: &str, unit: Unit, min: f64, max: f64, warning_min: f64, warning_max: f64) -> Self {
        Self {
            name: name.to_string(),
            unit,
            bounds: ChannelBounds::new(min, max, warning_min, warning_max),
            display: DisplayFormat::Integer,
        }
    }

    pub fn with_display(mut self, display: DisplayFormat) -> Self {
        self.display = display;
        self
    }

    /// Human-readable name ("cpu_temperature" -> "cpu temperature")
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }
}

pub const RAM_USAGE: &str = "ram_usage";
pub const MAX_SINGLE_CORE_CPU_USAGE: &str = "max_single_core_cpu_usage";
pub const COMBINED_CPU_USAGE: &str = "combined_cpu_usage";
pub const CPU_TEMPERATURE: &str = "cpu_temperature";
pub const CPU_POWER_USAGE: &str = "cpu_power_usage";
pub const GPU_TEMPERATURE: &str = "gpu_temperature";
pub const GPU_POWER_USAGE: &str = "gpu_power_usage";
pub const GPU_USAGE: &str = "gpu_usage";
pub const VRAM_USAGE: &str = "vram_usage";
pub const FPS: &str = "fps";
pub const INTERNET_DOWNLOAD_USAGE: &str = "internet_download_usage";
pub const INTERNET_UPLOAD_USAGE: &str = "internet_upload_usage";
pub const AIR_TEMPERATURE: &str = "air_temperature";
pub const WATER_TEMPERATURE: &str = "water_temperature";
pub const SYSTEM_POWER_USAGE: &str = "system_power_usage";
pub const SECONDARY_POWER_USAGE: &str = "secondary_power_usage";
pub const SYSTEM_COST_PER_HOUR: &str = "system_cost_per_hour";

/// The built-in channel table, in export order.
pub fn default_channel_table() -> Vec<ChannelSpec> {
    vec![
        ChannelSpec::new(RAM_USAGE, Unit::Percentage, 0.0, 100.0, 0.0, 95.0),
        // highest usage of any single core
        ChannelSpec::new(MAX_SINGLE_CORE_CPU_USAGE, Unit::Percentage, 0.0, 100.0, 7.5, 100.0),
        ChannelSpec::new(COMBINED_CPU_USAGE, Unit::Percentage, 0.0, 100.0, 0.0, 100.0),
        ChannelSpec::new(CPU_TEMPERATURE, Unit::Celsius, 35.0, 89.0, 35.0, 89.0),
        ChannelSpec::new(CPU_POWER_USAGE, Unit::Watts, 0.0, 170.0, 20.0, 150.0),
        ChannelSpec::new(GPU_TEMPERATURE, Unit::Celsius, 24.0, 85.0, 24.0, 65.0),
        ChannelSpec::new(GPU_POWER_USAGE, Unit::Watts, 0.0, 450.0, 12.0, 450.0),
        ChannelSpec::new(GPU_USAGE, Unit::Percentage, 0.0, 100.0, 0.0, 100.0),
        ChannelSpec::new(VRAM_USAGE, Unit::Percentage, 0.0, 100.0, 0.0, 95.0),
        ChannelSpec::new(FPS, Unit::FramesPerSecond, 0.0, 10_000.0, 0.0, 10_000.0),
        ChannelSpec::new(INTERNET_DOWNLOAD_USAGE, Unit::RateMbps, 0.0, 600.0, 0.0, 600.0),
        ChannelSpec::new(INTERNET_UPLOAD_USAGE, Unit::RateMbps, 0.0, 35.0, 0.0, 25.0),
        // inside the case
        ChannelSpec::new(AIR_TEMPERATURE, Unit::Fahrenheit, 60.0, 110.0, 60.0, 91.0),
        // coolant loop
        ChannelSpec::new(WATER_TEMPERATURE, Unit::Fahrenheit, 60.0, 110.0, 60.0, 105.0),
        // measured at the outlet
        ChannelSpec::new(SYSTEM_POWER_USAGE, Unit::Watts, 0.0, 1500.0, 100.0, 720.0),
        // everything but the CPU and GPU; may go negative when readings are torn
        ChannelSpec::new(SECONDARY_POWER_USAGE, Unit::Watts, -500.0, 1500.0, -500.0, 720.0),
        // 720W at 65 cents per kWh tops out around 46.8
        ChannelSpec::new(SYSTEM_COST_PER_HOUR, Unit::Currency, 0.0, 100.0, 5.0, 45.5)
            .with_display(DisplayFormat::OneDecimal),
    ]
}
