//! Measurement units and their display conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a unit label sits relative to the number it decorates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prefix,
    Suffix,
}

/// Closed set of measurement kinds a channel can report in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "watts")]
    Watts,
    /// Cents
    #[serde(rename = "currency")]
    Currency,
    #[serde(rename = "celsius")]
    Celsius,
    #[serde(rename = "fahrenheit")]
    Fahrenheit,
    #[serde(rename = "fps")]
    FramesPerSecond,
    #[serde(rename = "mbps")]
    RateMbps,
}

impl Unit {
    /// Short label drawn next to values
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Percentage => "%",
            Unit::Watts => "W",
            Unit::Currency => "¢",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::FramesPerSecond => "fps",
            Unit::RateMbps => "Mb/s",
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            Unit::Currency => Placement::Prefix,
            _ => Placement::Suffix,
        }
    }

    /// Attach the unit label to already-formatted text.
    ///
    /// `spaced` puts a single space between the number and a suffix label.
    /// Prefix labels are always attached directly.
    pub fn decorate(&self, text: &str, spaced: bool) -> String {
        match self.placement() {
            Placement::Prefix => format!("{}{}", self.label(), text),
            Placement::Suffix if spaced => format!("{} {}", text, self.label()),
            Placement::Suffix => format!("{}{}", text, self.label()),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
