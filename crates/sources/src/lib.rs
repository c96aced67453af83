//! sensor-panel-sources: Ingestion adapters for the sensor panel.
//!
//! Each adapter turns one external source into registry writes: the HWiNFO
//! shared-values dump, the temperature datagram bridge and the smart plug
//! meter. Adapters run on their own threads and stop when their
//! [`ShutdownToken`] fires.

mod command;
mod datagram;
mod error;
mod hwinfo;
mod poll;
mod shutdown;
mod smart_plug;
mod tokenize;

pub use command::run_command;
pub use datagram::{parse_frame, Backoff, DatagramAdapter, Frame};
pub use error::{ParseError, SourceError};
pub use hwinfo::{apply_dump, parse_dump_line, DerivedPower, HwInfoAdapter, PassSummary, RawReading};
pub use poll::poll_loop;
pub use shutdown::{Shutdown, ShutdownToken};
pub use smart_plug::{parse_power_line, SmartPlugAdapter};

use anyhow::{Context, Result};
use log::{error, info, warn};
use sensor_panel_core::Registry;
use sensor_panel_types::{DatagramConfig, HwInfoConfig, SmartPlugConfig};
use std::future::Future;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Settings for every adapter, as read from the app config
#[derive(Debug, Clone, Default)]
pub struct AdapterConfigs {
    pub hwinfo: HwInfoConfig,
    pub datagram: DatagramConfig,
    pub smart_plug: SmartPlugConfig,
}

/// Running adapter threads plus the switch that stops them
pub struct AdapterHandles {
    shutdown: Shutdown,
    threads: Vec<(String, JoinHandle<()>)>,
}

impl AdapterHandles {
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn token(&self) -> ShutdownToken {
        self.shutdown.token()
    }

    /// Signal every adapter and wait for its thread to exit
    pub fn stop(self) {
        self.shutdown.trigger();
        for (name, handle) in self.threads {
            if handle.join().is_err() {
                error!("Adapter thread '{}' panicked", name);
            }
        }
        info!("All adapters stopped");
    }
}

fn spawn_adapter<F, Fut>(
    name: &str,
    registry: Arc<Registry>,
    token: ShutdownToken,
    run: F,
) -> Result<JoinHandle<()>>
where
    F: FnOnce(Arc<Registry>, ShutdownToken) -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    let thread_name = format!("adapter-{}", name);
    let label = name.to_string();
    std::thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime for {}: {}", label, e);
                    return;
                }
            };
            info!("Starting {} adapter", label);
            rt.block_on(run(registry, token));
        })
        .with_context(|| format!("Failed to spawn thread {}", thread_name))
}

/// Resolve every enabled adapter against `registry` and start it.
///
/// Resolution errors (a channel name the registry does not know) are
/// returned before any thread starts.
pub fn spawn_adapters(registry: Arc<Registry>, configs: AdapterConfigs) -> Result<AdapterHandles> {
    let hwinfo = configs
        .hwinfo
        .enabled
        .then(|| HwInfoAdapter::new(configs.hwinfo.clone(), &registry))
        .transpose()
        .context("Invalid HWiNFO adapter config")?;
    let datagram = configs
        .datagram
        .enabled
        .then(|| DatagramAdapter::new(configs.datagram.clone(), &registry))
        .transpose()
        .context("Invalid datagram adapter config")?;
    let smart_plug = configs
        .smart_plug
        .enabled
        .then(|| SmartPlugAdapter::new(configs.smart_plug.clone(), &registry))
        .transpose()
        .context("Invalid smart plug adapter config")?;

    let (shutdown, token) = Shutdown::new();
    let mut threads = Vec::new();

    if let Some(adapter) = hwinfo {
        let handle = spawn_adapter("hwinfo", registry.clone(), token.clone(), |registry, token| async move {
            adapter.run(&registry, token).await
        })?;
        threads.push(("hwinfo".to_string(), handle));
    }

    if let Some(adapter) = datagram {
        let handle = spawn_adapter("datagram", registry.clone(), token.clone(), |registry, token| async move {
            adapter.run(&registry, token).await
        })?;
        threads.push(("datagram".to_string(), handle));
    }

    if let Some(adapter) = smart_plug {
        let handle = spawn_adapter("smart_plug", registry.clone(), token, |registry, token| async move {
            adapter.run(&registry, token).await
        })?;
        threads.push(("smart_plug".to_string(), handle));
    }

    if threads.is_empty() {
        warn!("No adapters enabled; channels will stay at their initial values");
    }

    Ok(AdapterHandles { shutdown, threads })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_panel_types::channel::SYSTEM_POWER_USAGE;
    use sensor_panel_types::{CommandSpec, RestartPolicy};
    use std::time::{Duration, Instant};

    fn disabled() -> AdapterConfigs {
        let mut configs = AdapterConfigs::default();
        configs.hwinfo.enabled = false;
        configs.datagram.enabled = false;
        configs.smart_plug.enabled = false;
        configs
    }

    #[test]
    fn test_nothing_enabled() {
        let registry = Arc::new(Registry::with_defaults().unwrap());
        let handles = spawn_adapters(registry, disabled()).unwrap();
        assert!(handles.is_empty());
        handles.stop();
    }

    #[test]
    fn test_bad_channel_name_fails_before_spawning() {
        let registry = Arc::new(Registry::with_defaults().unwrap());
        let mut configs = disabled();
        configs.smart_plug.enabled = true;
        configs.smart_plug.power_channel = "outlet_power".to_string();
        assert!(spawn_adapters(registry, configs).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_adapters_run_and_stop() {
        let registry = Arc::new(Registry::with_defaults().unwrap());
        let mut configs = disabled();
        configs.smart_plug.enabled = true;
        configs.smart_plug.command = CommandSpec::new("sh", &["-c", "echo 'Power: 300 W'"]);
        configs.smart_plug.interval_ms = 50;
        configs.datagram.enabled = true;
        configs.datagram.port = 0;
        configs.datagram.restart = RestartPolicy {
            enabled: false,
            ..RestartPolicy::default()
        };

        let handles = spawn_adapters(registry.clone(), configs).unwrap();
        assert_eq!(handles.len(), 2);

        let power = registry.lookup(SYSTEM_POWER_USAGE).unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        while registry.value(power) == 0.0 {
            assert!(Instant::now() < deadline, "smart plug adapter never wrote");
            std::thread::sleep(Duration::from_millis(20));
        }
        assert_eq!(registry.value(power), 300.0);

        handles.stop();
    }
}
