//! Smart plug (outlet power meter) adapter configuration.

use serde::{Deserialize, Serialize};

use super::command::CommandSpec;
use crate::channel::{SYSTEM_COST_PER_HOUR, SYSTEM_POWER_USAGE};

fn default_enabled() -> bool {
    true
}

fn default_command() -> CommandSpec {
    CommandSpec::new("kasa", &["--host", "192.168.0.50", "emeter"])
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_label() -> String {
    "Power:".to_string()
}

fn default_power_channel() -> String {
    SYSTEM_POWER_USAGE.to_string()
}

fn default_cost_channel() -> String {
    SYSTEM_COST_PER_HOUR.to_string()
}

fn default_price_per_kwh() -> f64 {
    65.0
}

/// Smart plug adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartPlugConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// CLI invocation that prints the plug's meter readings
    #[serde(default = "default_command")]
    pub command: CommandSpec,
    #[serde(default)]
    pub warmup_ms: u64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Line prefix holding the wattage
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_power_channel")]
    pub power_channel: String,
    #[serde(default = "default_cost_channel")]
    pub cost_channel: String,
    /// Electricity price in cents
    #[serde(default = "default_price_per_kwh")]
    pub price_per_kwh: f64,
}

impl Default for SmartPlugConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            warmup_ms: 0,
            interval_ms: default_interval_ms(),
            label: default_label(),
            power_channel: default_power_channel(),
            cost_channel: default_cost_channel(),
            price_per_kwh: default_price_per_kwh(),
        }
    }
}
