//! Settings for a fetch run.
//!
//! Stored as a JSON object on disk (default `~/.config/dublin_data.json`):
//! ```json
//! {
//!   "result_count": 5,
//!   "bus_stops":  [{ "name": "MainSt", "id": "1234" }],
//!   "luas_stops": [{ "name": "Harcourt", "id": "LUAS24" }],
//!   "bike_stops": [{ "name": "Portobello", "id": "34" }],
//!   "api_keys": { "dublinbikes": "...", "darksky": "..." },
//!   "darksky": { "latitude": 53.33, "longitude": -6.26 }
//! }
//! ```
//! Stop lists are arrays because their order is the deduplication priority.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "DUBLIN_DATA_CONFIG";
pub const DUBLINBIKES_KEY_ENV: &str = "DUBLINBIKES_API_KEY";
pub const DARKSKY_KEY_ENV: &str = "DARKSKY_API_KEY";

/// A configured stop: display name plus the provider's identifier for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopConfig {
    pub name: String,
    pub id: String,
}

impl StopConfig {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub dublinbikes: String,
    #[serde(default)]
    pub darksky: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Provider base URLs. Overridable so a run can be pointed at a mirror.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub rtpi: String,
    pub dublinbikes: String,
    pub darksky: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            rtpi: "https://data.smartdublin.ie/cgi-bin/rtpi/realtimebusinformation".to_string(),
            dublinbikes: "https://api.jcdecaux.com/vls/v1/stations".to_string(),
            darksky: "https://api.darksky.net/forecast".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maximum arrivals kept per direction.
    pub result_count: usize,
    #[serde(default = "default_deduplicate")]
    pub deduplicate: bool,
    #[serde(default)]
    pub bus_stops: Vec<StopConfig>,
    #[serde(default)]
    pub luas_stops: Vec<StopConfig>,
    #[serde(default)]
    pub bike_stops: Vec<StopConfig>,
    #[serde(default)]
    pub api_keys: ApiKeys,
    pub darksky: Location,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_deduplicate() -> bool {
    true
}

impl Config {
    /// Loads the config from a JSON file at `path`, then applies API-key
    /// overrides from the environment.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{path}'"))?;
        let mut config = Self::from_json(&content)
            .with_context(|| format!("invalid config file '{path}'"))?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.result_count == 0 {
            bail!("result_count must be at least 1");
        }
        // Names key the output, so two stops sharing one would collide.
        for (list, stops) in [
            ("bus_stops", &self.bus_stops),
            ("luas_stops", &self.luas_stops),
            ("bike_stops", &self.bike_stops),
        ] {
            let mut seen = HashSet::new();
            for stop in stops {
                if !seen.insert(stop.name.as_str()) {
                    bail!("duplicate stop name '{}' in {list}", stop.name);
                }
            }
        }
        Ok(())
    }

    /// Replaces API keys with values from `lookup` where one is set.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(DUBLINBIKES_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_keys.dublinbikes = key;
        }
        if let Some(key) = lookup(DARKSKY_KEY_ENV).filter(|k| !k.is_empty()) {
            self.api_keys.darksky = key;
        }
    }
}

/// Resolves the config path: explicit argument, then `$DUBLIN_DATA_CONFIG`,
/// then `~/.config/dublin_data.json`.
pub fn resolve_path(explicit: Option<String>) -> String {
    if let Some(path) = explicit {
        return path;
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return path;
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("dublin_data.json")
        .display()
        .to_string()
}
