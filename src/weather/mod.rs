//! Weather forecast from DarkSky, reshaped for display.
//!
//! Only the fields the dashboard shows are kept. Temperatures are converted
//! to °C and wind speeds to km/h, and a few ready-to-print sentences are
//! derived in [`WeatherText`].

pub mod convert;
mod darksky;

pub use convert::Cardinal;
pub use darksky::DarkSky;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use convert::{fahrenheit_to_celsius, mph_to_kmph, wind_direction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCurrently {
    summary: String,
    icon: String,
    precip_probability: Option<f64>,
    temperature: f64,
    apparent_temperature: f64,
    humidity: Option<f64>,
    wind_speed: f64,
    wind_gust: Option<f64>,
    wind_bearing: Option<f64>,
    cloud_cover: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    currently: RawCurrently,
    minutely: Option<RawBlock>,
    hourly: RawBlock,
}

/// Current conditions in metric units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currently {
    pub summary: String,
    pub icon: String,
    pub precip_probability: Option<f64>,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: f64,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
    /// Absent when the provider sends no bearing (calm conditions).
    pub wind_direction: Option<Cardinal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherText {
    pub wind: String,
    pub temperature: String,
    pub summary: String,
    pub minutely: Option<String>,
    pub hourly: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub currently: Currently,
    /// DarkSky only has minute-by-minute data for some locations.
    pub minutely: Option<Summary>,
    pub hourly: Summary,
    pub text: WeatherText,
}

/// Parses a DarkSky forecast (imperial units) into a [`Weather`].
pub fn parse_forecast(bytes: &[u8]) -> Result<Weather> {
    let raw: RawForecast = serde_json::from_slice(bytes)?;
    Ok(Weather::from_raw(raw))
}

impl Weather {
    fn from_raw(raw: RawForecast) -> Self {
        let c = raw.currently;
        let currently = Currently {
            summary: c.summary,
            icon: c.icon,
            precip_probability: c.precip_probability,
            temperature: fahrenheit_to_celsius(c.temperature),
            apparent_temperature: fahrenheit_to_celsius(c.apparent_temperature),
            humidity: c.humidity,
            wind_speed: mph_to_kmph(c.wind_speed),
            wind_gust: c.wind_gust.map(mph_to_kmph),
            wind_bearing: c.wind_bearing,
            cloud_cover: c.cloud_cover,
            uv_index: c.uv_index,
            wind_direction: c.wind_bearing.map(wind_direction),
        };
        let minutely = raw.minutely.map(|b| Summary { summary: b.summary });
        let hourly = Summary {
            summary: raw.hourly.summary,
        };
        let text = WeatherText::describe(&currently, minutely.as_ref(), &hourly);

        Self {
            currently,
            minutely,
            hourly,
            text,
        }
    }
}

impl WeatherText {
    pub fn describe(currently: &Currently, minutely: Option<&Summary>, hourly: &Summary) -> Self {
        Self {
            wind: wind_text(currently),
            temperature: format!(
                "{:?}°C (feels like {:?}°C).",
                currently.temperature, currently.apparent_temperature
            ),
            summary: expand_abbreviations(&currently.summary),
            minutely: minutely.map(|m| expand_abbreviations(&m.summary)),
            hourly: expand_abbreviations(&hourly.summary),
        }
    }
}

/// Measurements are printed with `{:?}` so whole values keep their
/// decimal (`8.0`, not `8`).
fn wind_text(currently: &Currently) -> String {
    let speed = currently.wind_speed;
    let lead = match currently.wind_direction {
        Some(direction) => format!("{}erly, {speed:?}km/h", direction.name),
        None => format!("calm, {speed:?}km/h"),
    };
    match currently.wind_gust {
        Some(gust) => format!("{lead} (gusts of up to {gust:?}km/h)."),
        None => format!("{lead}."),
    }
}

/// DarkSky abbreviates minutes in its summaries.
fn expand_abbreviations(summary: &str) -> String {
    summary.replace("min.", "minutes")
}
