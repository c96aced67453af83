//! Coolant/air temperature datagram listener configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::channel::{AIR_TEMPERATURE, WATER_TEMPERATURE};

/// Port the Commander Core bridge sends its readings to
pub const DEFAULT_DATAGRAM_PORT: u16 = 48620;

/// Largest frame the bridge ever sends
pub const MAX_FRAME_LEN: usize = 16;

fn default_true() -> bool {
    true
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

/// Restart behaviour after the socket fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartPolicy {
    /// When false, a socket error stops the listener for good
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_DATAGRAM_PORT
}

fn default_codes() -> BTreeMap<u8, String> {
    let mut codes = BTreeMap::new();
    codes.insert(0, AIR_TEMPERATURE.to_string());
    codes.insert(1, WATER_TEMPERATURE.to_string());
    codes
}

/// Datagram listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatagramConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frame code to channel name
    #[serde(default = "default_codes")]
    pub codes: BTreeMap<u8, String>,
    #[serde(default)]
    pub restart: RestartPolicy,
}

impl DatagramConfig {
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for DatagramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: default_bind_address(),
            port: default_port(),
            codes: default_codes(),
            restart: RestartPolicy::default(),
        }
    }
}
