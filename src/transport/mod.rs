//! Real-time public transport arrivals.
//!
//! Each [`Category`] (bus, luas) has its own prioritised stop list. The
//! [`aggregate`] module merges those stops into ranked per-direction lists,
//! [`rtpi`] fetches individual stops from the provider, and [`Transport`]
//! ties both to a loaded configuration.

pub mod aggregate;
pub mod error;
pub mod rtpi;
pub mod types;

pub use aggregate::{AggregateOptions, ArrivalSource, aggregate_arrivals};
pub use error::{FetchError, TransitError};
pub use types::{ArrivalRecord, DirectionBuckets, RawArrival, StopResponse};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::{Config, StopConfig};

/// A transit service type fetched from the same provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Bus,
    Luas,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Bus, Category::Luas];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bus => "BUS",
            Category::Luas => "LUAS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TransitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUS" => Ok(Category::Bus),
            "LUAS" => Ok(Category::Luas),
            _ => Err(TransitError::UnknownCategory(s.to_string())),
        }
    }
}

/// Arrivals for several categories, keyed by category.
pub type TransitData = BTreeMap<Category, DirectionBuckets>;

/// Runs the arrival aggregation for configured stop lists.
pub struct Transport<S> {
    source: S,
    bus_stops: Vec<StopConfig>,
    luas_stops: Vec<StopConfig>,
    options: AggregateOptions,
}

impl<S: ArrivalSource> Transport<S> {
    pub fn new(
        source: S,
        bus_stops: Vec<StopConfig>,
        luas_stops: Vec<StopConfig>,
        options: AggregateOptions,
    ) -> Self {
        Self {
            source,
            bus_stops,
            luas_stops,
            options,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(
            source,
            config.bus_stops.clone(),
            config.luas_stops.clone(),
            AggregateOptions {
                result_limit: config.result_count,
                deduplicate: config.deduplicate,
            },
        )
    }

    pub fn stops(&self, category: Category) -> &[StopConfig] {
        match category {
            Category::Bus => &self.bus_stops,
            Category::Luas => &self.luas_stops,
        }
    }

    /// Aggregates the category named `name` (`"BUS"` or `"LUAS"`).
    ///
    /// Unknown names are rejected before anything is fetched.
    pub async fn category(&self, name: &str) -> Result<DirectionBuckets, TransitError> {
        let category: Category = name.parse()?;
        self.fetch_category(category).await
    }

    pub async fn fetch_category(&self, category: Category) -> Result<DirectionBuckets, TransitError> {
        aggregate_arrivals(category, &self.source, self.stops(category), &self.options).await
    }

    /// Aggregates every category in turn. The first failing category fails
    /// the whole call.
    pub async fn all(&self) -> Result<TransitData, TransitError> {
        let mut data = TransitData::new();
        for category in Category::ALL {
            data.insert(category, self.fetch_category(category).await?);
        }
        Ok(data)
    }
}
