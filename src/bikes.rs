//! Dublin Bikes station availability from the JCDecaux API.

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::config::StopConfig;
use crate::fetch::auth::UrlParam;
use crate::fetch::{HttpClient, fetch_bytes};

pub const CONTRACT: &str = "Dublin";

/// Availability at one station.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BikeStation {
    pub status: String,
    pub available_bikes: u32,
    pub bike_stands: u32,
}

/// Station availability keyed by display name, in configured order.
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BikeStations(Vec<(String, BikeStation)>);

impl BikeStations {
    pub fn get(&self, name: &str) -> Option<&BikeStation> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, BikeStation)> for BikeStations {
    fn from_iter<I: IntoIterator<Item = (String, BikeStation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for BikeStations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, station) in &self.0 {
            map.serialize_entry(name, station)?;
        }
        map.end()
    }
}

/// Parses a JCDecaux station document, keeping only availability.
pub fn parse_station(bytes: &[u8]) -> Result<BikeStation> {
    Ok(serde_json::from_slice(bytes)?)
}

pub struct DublinBikes<C> {
    client: UrlParam<C>,
    base_url: String,
    stations: Vec<StopConfig>,
}

impl<C: HttpClient> DublinBikes<C> {
    /// `api_key` is sent as the `apiKey` query parameter on every request.
    pub fn new(
        client: C,
        api_key: &str,
        base_url: impl Into<String>,
        stations: Vec<StopConfig>,
    ) -> Self {
        Self {
            client: UrlParam::new(client, "apiKey", api_key),
            base_url: base_url.into(),
            stations,
        }
    }

    pub fn station_url(&self, station_id: &str) -> Result<reqwest::Url> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), station_id);
        reqwest::Url::parse_with_params(&url, &[("contract", CONTRACT)])
            .with_context(|| format!("invalid bike station url '{url}'"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_station(&self, station_id: &str) -> Result<BikeStation> {
        let url = self.station_url(station_id)?;
        let bytes = fetch_bytes(&self.client, url.as_str()).await?;
        parse_station(&bytes).with_context(|| format!("malformed response for bike station {station_id}"))
    }

    /// Fetches every configured station, keyed by its display name.
    pub async fn stations(&self) -> Result<BikeStations> {
        let mut data = Vec::with_capacity(self.stations.len());
        for station in &self.stations {
            let status = self.fetch_station(&station.id).await?;
            debug!(
                station = %station.name,
                available = status.available_bikes,
                stands = status.bike_stands,
                "Bike station fetched"
            );
            data.push((station.name.clone(), status));
        }
        Ok(BikeStations(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_parse_station_ignores_extra_fields() {
        let body = br#"{
            "number": 34,
            "contract_name": "Dublin",
            "name": "PORTOBELLO HARBOUR",
            "address": "Portobello Harbour",
            "position": { "lat": 53.330362, "lng": -6.265163 },
            "banking": false,
            "bonus": false,
            "bike_stands": 30,
            "available_bike_stands": 21,
            "available_bikes": 9,
            "status": "OPEN",
            "last_update": 1792400000000
        }"#;

        let station = parse_station(body).unwrap();

        assert_eq!(
            station,
            BikeStation {
                status: "OPEN".to_string(),
                available_bikes: 9,
                bike_stands: 30,
            }
        );
    }

    #[test]
    fn test_parse_station_missing_field() {
        assert!(parse_station(br#"{"status": "CLOSED"}"#).is_err());
    }

    #[test]
    fn test_stations_serialize_in_configured_order() {
        let station = |bikes| BikeStation {
            status: "OPEN".to_string(),
            available_bikes: bikes,
            bike_stands: 20,
        };
        let stations: BikeStations = [
            ("Portobello".to_string(), station(3)),
            ("Christchurch".to_string(), station(7)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&stations).unwrap();

        assert!(json.find("Portobello").unwrap() < json.find("Christchurch").unwrap());
        assert_eq!(stations.get("Christchurch").unwrap().available_bikes, 7);
    }

    #[tokio::test]
    async fn test_failed_station_does_not_reveal_key() {
        let bikes = DublinBikes::new(
            BasicClient::new().unwrap(),
            "SECRETKEY123",
            "http://127.0.0.1:1/vls/v1/stations",
            vec![StopConfig::new("Portobello", "34")],
        );

        let err = bikes.stations().await.unwrap_err();

        assert!(!format!("{err:#}").contains("SECRETKEY123"));
    }

    #[test]
    fn test_station_url() {
        let bikes = DublinBikes::new(
            BasicClient::new().unwrap(),
            "key",
            "https://api.jcdecaux.com/vls/v1/stations/",
            vec![],
        );
        assert_eq!(
            bikes.station_url("34").unwrap().as_str(),
            "https://api.jcdecaux.com/vls/v1/stations/34?contract=Dublin"
        );
    }
}
