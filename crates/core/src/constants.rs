//! Shared constants and unit conversions

/// Fahrenheit degrees per Celsius degree
pub const FAHRENHEIT_PER_CELSIUS: f64 = 1.8;

/// Fahrenheit reading at 0°C
pub const FAHRENHEIT_OFFSET: f64 = 32.0;

/// Watts per kilowatt, used when pricing power draw per kWh
pub const WATTS_PER_KILOWATT: f64 = 1000.0;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * FAHRENHEIT_PER_CELSIUS + FAHRENHEIT_OFFSET
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - FAHRENHEIT_OFFSET) / FAHRENHEIT_PER_CELSIUS
}

/// Cost of running a `watts` load for one hour, in the price's currency
pub fn cost_per_hour(watts: f64, price_per_kwh: f64) -> f64 {
    watts / WATTS_PER_KILOWATT * price_per_kwh
}
