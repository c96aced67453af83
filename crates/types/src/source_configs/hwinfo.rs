//! HWiNFO shared-values adapter configuration.
//!
//! HWiNFO publishes each sensor it is told to export as a `ValueRaw<N>`
//! registry value. `N` follows the order sensors were ticked in HWiNFO, so the
//! mapping from `N` to a channel is kept as an explicit, versioned table
//! instead of leaning on channel declaration order.

use serde::{Deserialize, Serialize};

use super::command::CommandSpec;
use crate::channel::{
    COMBINED_CPU_USAGE, CPU_POWER_USAGE, CPU_TEMPERATURE, FPS, GPU_POWER_USAGE, GPU_TEMPERATURE,
    GPU_USAGE, INTERNET_DOWNLOAD_USAGE, INTERNET_UPLOAD_USAGE, MAX_SINGLE_CORE_CPU_USAGE,
    RAM_USAGE, SECONDARY_POWER_USAGE, SYSTEM_POWER_USAGE, VRAM_USAGE,
};

/// Kilobytes per second to megabits per second
pub const KBPS_TO_MBPS: f64 = 0.008;

/// Current version of the built-in index table
pub const INDEX_MAP_VERSION: u32 = 1;

/// One `ValueRaw<index>` to channel assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub index: u32,
    pub channel: String,
    /// Multiplier applied to the raw reading before it is stored
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl IndexEntry {
    pub fn new(index: u32, channel: &str) -> Self {
        Self {
            index,
            channel: channel.to_string(),
            scale: 1.0,
        }
    }

    pub fn scaled(index: u32, channel: &str, scale: f64) -> Self {
        Self {
            index,
            channel: channel.to_string(),
            scale,
        }
    }
}

/// Versioned mapping from exported value index to channel name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMap {
    pub version: u32,
    pub entries: Vec<IndexEntry>,
}

impl Default for IndexMap {
    fn default() -> Self {
        Self {
            version: INDEX_MAP_VERSION,
            entries: vec![
                IndexEntry::new(0, RAM_USAGE),
                IndexEntry::new(1, MAX_SINGLE_CORE_CPU_USAGE),
                IndexEntry::new(2, COMBINED_CPU_USAGE),
                IndexEntry::new(3, CPU_TEMPERATURE),
                IndexEntry::new(4, CPU_POWER_USAGE),
                IndexEntry::new(5, GPU_TEMPERATURE),
                IndexEntry::new(6, GPU_POWER_USAGE),
                IndexEntry::new(7, GPU_USAGE),
                IndexEntry::new(8, VRAM_USAGE),
                IndexEntry::new(9, FPS),
                IndexEntry::scaled(10, INTERNET_DOWNLOAD_USAGE, KBPS_TO_MBPS),
                IndexEntry::scaled(11, INTERNET_UPLOAD_USAGE, KBPS_TO_MBPS),
            ],
        }
    }
}

/// `target = total - cpu - gpu`, computed after every dump pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPowerConfig {
    pub total: String,
    pub cpu: String,
    pub gpu: String,
    pub target: String,
}

impl Default for DerivedPowerConfig {
    fn default() -> Self {
        Self {
            total: SYSTEM_POWER_USAGE.to_string(),
            cpu: CPU_POWER_USAGE.to_string(),
            gpu: GPU_POWER_USAGE.to_string(),
            target: SECONDARY_POWER_USAGE.to_string(),
        }
    }
}

fn default_command() -> CommandSpec {
    CommandSpec::new(
        "reg",
        &["query", r"HKEY_CURRENT_USER\SOFTWARE\HWiNFO64\VSB"],
    )
}

fn default_warmup_ms() -> u64 {
    5000
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_derived() -> Option<DerivedPowerConfig> {
    Some(DerivedPowerConfig::default())
}

fn default_enabled() -> bool {
    true
}

/// HWiNFO adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HwInfoConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_command")]
    pub command: CommandSpec,
    /// Delay before the first poll so HWiNFO can finish starting up
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: u64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub index_map: IndexMap,
    #[serde(default = "default_derived")]
    pub derived: Option<DerivedPowerConfig>,
}

impl Default for HwInfoConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            warmup_ms: default_warmup_ms(),
            interval_ms: default_interval_ms(),
            index_map: IndexMap::default(),
            derived: default_derived(),
        }
    }
}
