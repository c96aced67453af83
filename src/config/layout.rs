//! Figure placement on the panel window

use sensor_panel_types::channel::{
    AIR_TEMPERATURE, COMBINED_CPU_USAGE, CPU_POWER_USAGE, CPU_TEMPERATURE, FPS, GPU_POWER_USAGE,
    GPU_TEMPERATURE, GPU_USAGE, INTERNET_DOWNLOAD_USAGE, INTERNET_UPLOAD_USAGE,
    MAX_SINGLE_CORE_CPU_USAGE, RAM_USAGE, SECONDARY_POWER_USAGE, SYSTEM_COST_PER_HOUR,
    SYSTEM_POWER_USAGE, VRAM_USAGE, WATER_TEMPERATURE,
};
use sensor_panel_types::{BarConfig, FigureConfig, GaugeConfig, IconFieldConfig, ThermostatConfig};
use serde::{Deserialize, Serialize};

/// One figure, the channel it draws and its rectangle on the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigurePlacement {
    pub figure: FigureConfig,
    pub channel: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FigurePlacement {
    pub fn new(figure: FigureConfig, channel: &str, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            figure,
            channel: channel.to_string(),
            x,
            y,
            width,
            height,
        }
    }
}

const GAUGE: i32 = 250;
const COLUMN: i32 = 260;

fn gauge(channel: &str, column: i32, row: i32) -> FigurePlacement {
    FigurePlacement::new(
        FigureConfig::Gauge(GaugeConfig::default()),
        channel,
        10 + column * COLUMN,
        5 + row * (GAUGE + 5),
        GAUGE,
        GAUGE,
    )
}

fn bar(channel: &str, title: &str, x: i32) -> FigurePlacement {
    FigurePlacement::new(
        FigureConfig::Bar(BarConfig {
            title: title.to_string(),
            ..BarConfig::default()
        }),
        channel,
        x,
        260,
        120,
        GAUGE,
    )
}

fn thermostat(channel: &str, x: i32) -> FigurePlacement {
    FigurePlacement::new(
        FigureConfig::Thermostat(ThermostatConfig::default()),
        channel,
        x,
        5,
        160,
        GAUGE,
    )
}

fn icon_field(channel: &str, row: i32) -> FigurePlacement {
    FigurePlacement::new(
        FigureConfig::IconField(IconFieldConfig::default()),
        channel,
        1570,
        265 + row * 60,
        330,
        55,
    )
}

/// Layout for a 1920x515 panel showing every built-in channel
pub fn default_layout() -> Vec<FigurePlacement> {
    vec![
        gauge(COMBINED_CPU_USAGE, 0, 0),
        gauge(CPU_TEMPERATURE, 1, 0),
        gauge(GPU_USAGE, 2, 0),
        gauge(GPU_TEMPERATURE, 3, 0),
        gauge(RAM_USAGE, 4, 0),
        gauge(VRAM_USAGE, 5, 0),
        gauge(CPU_POWER_USAGE, 0, 1),
        gauge(GPU_POWER_USAGE, 1, 1),
        gauge(SYSTEM_POWER_USAGE, 2, 1),
        bar(MAX_SINGLE_CORE_CPU_USAGE, "CORE", 790),
        bar(SECONDARY_POWER_USAGE, "AUX", 920),
        thermostat(AIR_TEMPERATURE, 1570),
        thermostat(WATER_TEMPERATURE, 1740),
        icon_field(INTERNET_DOWNLOAD_USAGE, 0),
        icon_field(INTERNET_UPLOAD_USAGE, 1),
        icon_field(FPS, 2),
        icon_field(SYSTEM_COST_PER_HOUR, 3),
    ]
}
