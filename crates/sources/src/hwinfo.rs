//! HWiNFO shared-values adapter.
//!
//! HWiNFO exports sensor readings as `ValueRaw<N>` registry values. Each
//! pass dumps the key with an external command and feeds every reading
//! through the resolved index map into the registry.

use log::{debug, error, warn};
use sensor_panel_core::{ChannelId, Registry, ResolvedIndexMap};
use sensor_panel_types::{DerivedPowerConfig, HwInfoConfig};
use std::time::Duration;

use crate::command::run_command;
use crate::error::ParseError;
use crate::poll::poll_loop;
use crate::shutdown::ShutdownToken;
use crate::tokenize::nth_token;

const VALUE_PREFIX: &str = "ValueRaw";

/// One `ValueRaw<index>` line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub index: u32,
    pub value: f64,
}

/// Counts from one dump pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub applied: usize,
    pub skipped: usize,
    pub unknown: usize,
}

/// Parse one line of the dump.
///
/// Lines that are not readings (headers, blank lines, other values) yield
/// `None`.
pub fn parse_dump_line(line: &str) -> Option<Result<RawReading, ParseError>> {
    let name = nth_token(line, 0)?;
    let index = name.strip_prefix(VALUE_PREFIX)?;
    Some(parse_reading(line, index))
}

fn parse_reading(line: &str, index: &str) -> Result<RawReading, ParseError> {
    let index = index
        .parse::<u32>()
        .map_err(|_| ParseError::BadIndex(index.to_string()))?;
    let raw = nth_token(line, 2).ok_or(ParseError::MissingField("value"))?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| ParseError::BadNumber(raw.to_string()))?;
    Ok(RawReading { index, value })
}

/// Resolved `target = total - cpu - gpu`
#[derive(Debug, Clone, Copy)]
pub struct DerivedPower {
    total: ChannelId,
    cpu: ChannelId,
    gpu: ChannelId,
    target: ChannelId,
}

impl DerivedPower {
    pub fn resolve(
        config: &DerivedPowerConfig,
        registry: &Registry,
    ) -> Result<Self, sensor_panel_core::RegistryError> {
        Ok(Self {
            total: registry.require(&config.total)?,
            cpu: registry.require(&config.cpu)?,
            gpu: registry.require(&config.gpu)?,
            target: registry.require(&config.target)?,
        })
    }

    pub fn apply(&self, registry: &Registry) {
        // The three inputs are written by different adapters, so this may
        // combine readings from different instants.
        let value =
            registry.value(self.total) - registry.value(self.cpu) - registry.value(self.gpu);
        registry.set(self.target, value);
    }
}

/// Feed one dump into the registry
pub fn apply_dump(
    dump: &str,
    map: &ResolvedIndexMap,
    derived: Option<&DerivedPower>,
    registry: &Registry,
) -> PassSummary {
    let mut summary = PassSummary::default();

    for line in dump.lines() {
        match parse_dump_line(line) {
            None => {}
            Some(Err(e)) => {
                warn!("Skipping malformed HWiNFO line '{}': {}", line.trim(), e);
                summary.skipped += 1;
            }
            Some(Ok(reading)) => match map.get(reading.index) {
                Some(target) => {
                    registry.set(target.channel, reading.value * target.scale);
                    summary.applied += 1;
                }
                None => {
                    warn!("No channel mapped to HWiNFO index {}", reading.index);
                    summary.unknown += 1;
                }
            },
        }
    }

    if let Some(derived) = derived {
        derived.apply(registry);
    }

    summary
}

/// HWiNFO adapter state, resolved against a registry
pub struct HwInfoAdapter {
    config: HwInfoConfig,
    map: ResolvedIndexMap,
    derived: Option<DerivedPower>,
}

impl HwInfoAdapter {
    pub fn new(config: HwInfoConfig, registry: &Registry) -> anyhow::Result<Self> {
        let map = ResolvedIndexMap::resolve(&config.index_map, registry)?;
        let derived = config
            .derived
            .as_ref()
            .map(|d| DerivedPower::resolve(d, registry))
            .transpose()?;
        debug!(
            "HWiNFO index map v{} resolved with {} entries",
            map.version(),
            map.len()
        );
        Ok(Self {
            config,
            map,
            derived,
        })
    }

    /// One dump-and-apply pass; command failures are logged, not returned
    pub async fn poll_once(&self, registry: &Registry) -> Option<PassSummary> {
        match run_command(&self.config.command).await {
            Ok(dump) => {
                let summary = apply_dump(&dump, &self.map, self.derived.as_ref(), registry);
                debug!("HWiNFO pass: {:?}", summary);
                Some(summary)
            }
            Err(e) => {
                error!("HWiNFO poll failed: {}", e);
                None
            }
        }
    }

    pub async fn run(self, registry: &Registry, shutdown: ShutdownToken) {
        let warmup = Duration::from_millis(self.config.warmup_ms);
        let interval = Duration::from_millis(self.config.interval_ms);
        let adapter = &self;
        poll_loop("hwinfo", warmup, interval, shutdown, || async move {
            adapter.poll_once(registry).await;
        })
        .await;
    }
}
