//! Configuration management

mod layout;
mod settings;

pub use layout::{default_layout, FigurePlacement};
pub use settings::{AppConfig, WindowConfig, CONFIG_VERSION};
