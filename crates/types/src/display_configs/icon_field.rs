//! Icon plus value text configuration

use serde::{Deserialize, Serialize};

fn default_large_sample() -> String {
    "00 Mb/s".to_string()
}

fn default_small_sample() -> String {
    "000 Mb/s".to_string()
}

fn default_large_max_chars() -> usize {
    7
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconFieldConfig {
    #[serde(default)]
    pub icon: Option<String>,
    /// Text the large font preset is sized to fit
    #[serde(default = "default_large_sample")]
    pub large_sample: String,
    /// Text the small font preset is sized to fit
    #[serde(default = "default_small_sample")]
    pub small_sample: String,
    /// Longest text (in chars) still drawn with the large preset
    #[serde(default = "default_large_max_chars")]
    pub large_max_chars: usize,
}

impl Default for IconFieldConfig {
    fn default() -> Self {
        Self {
            icon: None,
            large_sample: default_large_sample(),
            small_sample: default_small_sample(),
            large_max_chars: default_large_max_chars(),
        }
    }
}
