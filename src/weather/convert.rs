//! Unit conversions and compass lookup for forecast values.

use serde::Serialize;

/// A compass point: short abbreviation and the word used in wind text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cardinal {
    pub abbreviation: &'static str,
    pub name: &'static str,
}

const fn cardinal(abbreviation: &'static str, name: &'static str) -> Cardinal {
    Cardinal { abbreviation, name }
}

/// Clockwise from north in 45° steps.
pub const CARDINALS: [Cardinal; 8] = [
    cardinal("N", "north"),
    cardinal("NE", "northeast"),
    cardinal("E", "east"),
    cardinal("SE", "southeast"),
    cardinal("S", "south"),
    cardinal("SW", "southwest"),
    cardinal("W", "west"),
    cardinal("NW", "northwest"),
];

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    round2((f - 32.0) * 5.0 / 9.0)
}

pub fn mph_to_kmph(mph: f64) -> f64 {
    round2(mph * 1.60934)
}

/// Nearest compass point to `bearing` degrees, going around the circle.
/// A bearing exactly between two points resolves clockwise.
pub fn wind_direction(bearing: f64) -> Cardinal {
    let index = ((bearing.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % CARDINALS.len();
    CARDINALS[index]
}
