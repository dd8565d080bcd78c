//! The combined, timestamped view of every data source.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::bikes::{BikeStations, DublinBikes};
use crate::config::Config;
use crate::fetch::{BasicClient, HttpClient};
use crate::transport::rtpi::RtpiClient;
use crate::transport::{ArrivalSource, TransitData, Transport};
use crate::weather::{DarkSky, Weather};

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S on %A %d %B %Y";

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// `BUS` and `LUAS` arrivals by direction.
    #[serde(flatten)]
    pub transit: TransitData,
    #[serde(rename = "BIKE")]
    pub bikes: BikeStations,
    pub weather: Weather,
    pub timestamp: DateTime<Local>,
    pub timestamp_str: String,
}

impl Snapshot {
    pub fn new(
        transit: TransitData,
        bikes: BikeStations,
        weather: Weather,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            transit,
            bikes,
            weather,
            timestamp: at,
            timestamp_str: format_timestamp(&at),
        }
    }
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Every provider client needed for one run.
pub struct Sources<S, C> {
    pub transport: Transport<S>,
    pub bikes: DublinBikes<C>,
    pub weather: DarkSky<C>,
}

impl Sources<RtpiClient<BasicClient>, BasicClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let rtpi = RtpiClient::new(BasicClient::new()?, config.endpoints.rtpi.clone());
        Ok(Self {
            transport: Transport::from_config(rtpi, config),
            bikes: DublinBikes::new(
                BasicClient::new()?,
                &config.api_keys.dublinbikes,
                config.endpoints.dublinbikes.clone(),
                config.bike_stops.clone(),
            ),
            weather: DarkSky::new(
                BasicClient::new()?,
                config.endpoints.darksky.clone(),
                config.api_keys.darksky.clone(),
                config.darksky,
            ),
        })
    }
}

impl<S: ArrivalSource, C: HttpClient> Sources<S, C> {
    /// Fetches transport, bikes and weather in that order and stamps the
    /// result with the local time.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let transit = self.transport.all().await.context("transport data unavailable")?;
        let bikes = self.bikes.stations().await.context("bike data unavailable")?;
        let weather = self.weather.forecast().await.context("weather data unavailable")?;

        let snapshot = Snapshot::new(transit, bikes, weather, Local::now());
        info!(at = %snapshot.timestamp_str, "Snapshot assembled");
        Ok(snapshot)
    }
}
