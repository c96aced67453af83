//! Smart plug adapter: outlet power draw and what it costs per hour.

use log::{debug, error, warn};
use sensor_panel_core::{cost_per_hour, ChannelId, Registry, RegistryError};
use sensor_panel_types::SmartPlugConfig;
use std::time::Duration;

use crate::command::run_command;
use crate::error::ParseError;
use crate::poll::poll_loop;
use crate::shutdown::ShutdownToken;
use crate::tokenize::nth_token;

/// Watts from a line such as `Power: 650.2 W`.
///
/// Returns `None` when the line does not start with `label`.
pub fn parse_power_line(line: &str, label: &str) -> Option<Result<f64, ParseError>> {
    let rest = line.trim_start();
    if !rest.starts_with(label) {
        return None;
    }
    let raw = match nth_token(rest, 1) {
        Some(raw) => raw,
        None => return Some(Err(ParseError::MissingField("watts"))),
    };
    Some(
        raw.parse::<f64>()
            .map_err(|_| ParseError::BadNumber(raw.to_string())),
    )
}

pub struct SmartPlugAdapter {
    config: SmartPlugConfig,
    power: ChannelId,
    cost: ChannelId,
}

impl SmartPlugAdapter {
    pub fn new(config: SmartPlugConfig, registry: &Registry) -> Result<Self, RegistryError> {
        let power = registry.require(&config.power_channel)?;
        let cost = registry.require(&config.cost_channel)?;
        Ok(Self {
            config,
            power,
            cost,
        })
    }

    /// Apply the first matching line of `output`. Returns the watts stored.
    pub fn apply_output(&self, output: &str, registry: &Registry) -> Option<f64> {
        let parsed = output
            .lines()
            .find_map(|line| parse_power_line(line, &self.config.label));

        match parsed {
            Some(Ok(watts)) => {
                registry.set(self.power, watts);
                registry.set(self.cost, cost_per_hour(watts, self.config.price_per_kwh));
                Some(watts)
            }
            Some(Err(e)) => {
                warn!("Unreadable smart plug power line: {}", e);
                None
            }
            None => {
                warn!(
                    "No '{}' line in smart plug output: {}",
                    self.config.label,
                    output.trim()
                );
                None
            }
        }
    }

    pub async fn poll_once(&self, registry: &Registry) -> Option<f64> {
        match run_command(&self.config.command).await {
            Ok(output) => {
                let watts = self.apply_output(&output, registry);
                debug!("Smart plug pass: {:?} W", watts);
                watts
            }
            Err(e) => {
                error!("Smart plug poll failed: {}", e);
                None
            }
        }
    }

    pub async fn run(self, registry: &Registry, shutdown: ShutdownToken) {
        let warmup = Duration::from_millis(self.config.warmup_ms);
        let interval = Duration::from_millis(self.config.interval_ms);
        let adapter = &self;
        poll_loop("smart_plug", warmup, interval, shutdown, || async move {
            adapter.poll_once(registry).await;
        })
        .await;
    }
}
