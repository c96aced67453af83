use anyhow::{Context, Result};
use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::Application;
use log::{error, info, warn};
use sensor_panel::config::AppConfig;
use sensor_panel::ui::build_panel_window;
use sensor_panel_core::{LogAlertSink, Registry};
use sensor_panel_sources::{spawn_adapters, AdapterHandles};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

const APP_ID: &str = "org.sensor_panel.SensorPanel";

/// sensor-panel - telemetry gauges for a dedicated sensor display
#[derive(Parser, Debug, Clone)]
#[command(name = "sensor-panel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Config file to use instead of the one in the user config directory
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Run the adapters and log alerts without opening a window
    #[arg(long = "no-display")]
    no_display: bool,

    /// Write the default configuration and exit
    #[arg(long = "write-default-config")]
    write_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only, which still shows every alert
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting sensor-panel v{}", env!("CARGO_PKG_VERSION"));

    if cli.write_default_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => AppConfig::config_path()?,
        };
        AppConfig::default().save_to_path(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(&cli);
    let registry = Arc::new(config.build_registry(Arc::new(LogAlertSink))?);
    config.validate(&registry)?;

    let handles = spawn_adapters(registry.clone(), config.adapter_configs())?;
    info!("{} adapters running", handles.len());

    if cli.no_display {
        run_headless(handles)
    } else {
        run_display(config, registry, handles);
        Ok(())
    }
}

/// Config from `-c` if given, otherwise the user config, otherwise defaults
fn load_config(cli: &Cli) -> AppConfig {
    if let Some(path) = &cli.config {
        match AppConfig::load_from_path(path) {
            Ok(config) => {
                info!("Loaded config from: {}", path.display());
                return config;
            }
            Err(e) => warn!("Failed to load config file '{}': {:#}", path.display(), e),
        }
    }

    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }
    }
}

/// Block until Ctrl+C, then stop the adapters
fn run_headless(handles: AdapterHandles) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    info!("Running headless; press Ctrl+C to stop");
    let signal = rt.block_on(tokio::signal::ctrl_c());
    handles.stop();
    signal.context("Failed to listen for Ctrl+C")
}

fn run_display(config: AppConfig, registry: Arc<Registry>, handles: AdapterHandles) {
    let app = Application::builder().application_id(APP_ID).build();

    let handles = Rc::new(RefCell::new(Some(handles)));
    let handles_for_activate = handles.clone();

    app.connect_activate(move |app| {
        let window = match build_panel_window(app, &config, registry.clone()) {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to build panel window: {:#}", e);
                app.quit();
                return;
            }
        };

        let handles = handles_for_activate.clone();
        window.connect_close_request(move |_| {
            if let Some(handles) = handles.borrow_mut().take() {
                handles.stop();
            }
            glib::Propagation::Proceed
        });

        window.present();
    });

    // Pass only the program name; the CLI was already parsed by clap
    app.run_with_args(&["sensor-panel"]);

    if let Some(handles) = handles.borrow_mut().take() {
        handles.stop();
    };
}
