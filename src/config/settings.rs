//! Application configuration

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use log::{debug, info};
use once_cell::sync::Lazy;
use sensor_panel_core::{AlertPolicy, AlertSink, Registry};
use sensor_panel_render::FigureStyle;
use sensor_panel_sources::AdapterConfigs;
use sensor_panel_types::{
    default_channel_table, ChannelSpec, Color, DatagramConfig, HwInfoConfig, SmartPlugConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::layout::{default_layout, FigurePlacement};

/// Version of the config format
pub const CONFIG_VERSION: u32 = 1;

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("org", "sensor-panel", "sensor-panel"));

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Channel table, in HWiNFO export order
    #[serde(default = "default_channel_table")]
    pub channels: Vec<ChannelSpec>,
    #[serde(default)]
    pub alerts: AlertPolicy,
    #[serde(default)]
    pub hwinfo: HwInfoConfig,
    #[serde(default)]
    pub datagram: DatagramConfig,
    #[serde(default)]
    pub smart_plug: SmartPlugConfig,
    /// Settings shared by every figure
    #[serde(default)]
    pub render: FigureStyle,
    #[serde(default)]
    pub window: WindowConfig,
    /// Figures and where they sit on the window
    #[serde(default = "default_layout")]
    pub figures: Vec<FigurePlacement>,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = PROJECT_DIRS
            .as_ref()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded config version {} from {}", config.version, path.display());
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Build the channel registry, delivering alerts to `sink`
    pub fn build_registry(&self, sink: Arc<dyn AlertSink>) -> Result<Registry> {
        Registry::new(self.channels.clone(), self.alerts.clone(), sink)
            .context("Invalid channel table")
    }

    pub fn adapter_configs(&self) -> AdapterConfigs {
        AdapterConfigs {
            hwinfo: self.hwinfo.clone(),
            datagram: self.datagram.clone(),
            smart_plug: self.smart_plug.clone(),
        }
    }

    /// Check that the window and every figure can be laid out against `registry`
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        if self.window.width <= 0 || self.window.height <= 0 {
            bail!(
                "Window size {}x{} must be positive",
                self.window.width,
                self.window.height
            );
        }

        for (i, placement) in self.figures.iter().enumerate() {
            registry.require(&placement.channel).with_context(|| {
                format!("Figure {} ({})", i, placement.figure.figure_type())
            })?;
            if placement.width <= 0 || placement.height <= 0 {
                bail!(
                    "Figure {} ({}) has empty size {}x{}",
                    i,
                    placement.channel,
                    placement.width,
                    placement.height
                );
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            channels: default_channel_table(),
            alerts: AlertPolicy::default(),
            hwinfo: HwInfoConfig::default(),
            datagram: DatagramConfig::default(),
            smart_plug: SmartPlugConfig::default(),
            render: FigureStyle::default(),
            window: WindowConfig::default(),
            figures: default_layout(),
        }
    }
}

fn default_width() -> i32 {
    1920
}

fn default_height() -> i32 {
    515
}

fn default_title() -> String {
    "Sensor Panel".to_string()
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_repaint_poll_ms() -> u64 {
    50
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_title")]
    pub title: String,
    /// Color behind the figures
    #[serde(default = "default_background")]
    pub background: Color,
    /// How often dirty figures are checked for repaint
    #[serde(default = "default_repaint_poll_ms")]
    pub repaint_poll_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            background: default_background(),
            repaint_poll_ms: default_repaint_poll_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_panel_core::LogAlertSink;
    use sensor_panel_types::FractionPolicy;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 515);
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.render.fraction_policy = FractionPolicy::Clamp;
        config.smart_plug.price_per_kwh = 12.5;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.render.fraction_policy, FractionPolicy::Clamp);
        assert_eq!(loaded.smart_plug.price_per_kwh, 12.5);
        assert_eq!(loaded.window, config.window);
        assert_eq!(loaded.hwinfo.index_map.entries.len(), 12);
        assert_eq!(loaded.figures.len(), config.figures.len());
        let names: Vec<_> = loaded.channels.iter().map(|c| c.name.as_str()).collect();
        let expected: Vec<_> = config.channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"datagram": {"enabled": false}, "render": {"fraction_policy": "clamp"}}"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert!(!config.datagram.enabled);
        assert_eq!(config.datagram.port, DatagramConfig::default().port);
        assert_eq!(config.render.fraction_policy, FractionPolicy::Clamp);
        assert_eq!(config.figures, default_layout());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load_from_path(&path).is_err());
        assert!(AppConfig::load_from_path(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        let registry = config.build_registry(Arc::new(LogAlertSink)).unwrap();
        assert_eq!(registry.len(), config.channels.len());
        config.validate(&registry).unwrap();
    }

    #[test]
    fn test_unknown_figure_channel_rejected() {
        let mut config = AppConfig::default();
        config.figures[0].channel = "pump_speed".to_string();
        let registry = config.build_registry(Arc::new(LogAlertSink)).unwrap();
        let err = config.validate(&registry).unwrap_err();
        assert!(format!("{:#}", err).contains("pump_speed"));
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let mut config = AppConfig::default();
        let first = config.channels[0].clone();
        config.channels.push(first);
        assert!(config.build_registry(Arc::new(LogAlertSink)).is_err());
    }

    #[test]
    fn test_adapter_configs_copied() {
        let mut config = AppConfig::default();
        config.hwinfo.enabled = false;
        let adapters = config.adapter_configs();
        assert!(!adapters.hwinfo.enabled);
        assert_eq!(adapters.smart_plug, config.smart_plug);
    }
}
