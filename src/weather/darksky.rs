use anyhow::{Context, Result};
use tracing::debug;

use super::{Weather, parse_forecast};
use crate::config::Location;
use crate::fetch::{HttpClient, fetch_bytes};

/// DarkSky forecast client. The API key travels in the URL path.
pub struct DarkSky<C> {
    client: C,
    base_url: String,
    api_key: String,
    location: Location,
}

impl<C: HttpClient> DarkSky<C> {
    pub fn new(client: C, base_url: impl Into<String>, api_key: impl Into<String>, location: Location) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            location,
        }
    }

    pub fn forecast_url(&self) -> String {
        format!(
            "{}/{}/{},{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            self.location.latitude,
            self.location.longitude
        )
    }

    #[tracing::instrument(skip(self), fields(latitude = self.location.latitude, longitude = self.location.longitude))]
    pub async fn forecast(&self) -> Result<Weather> {
        let bytes = fetch_bytes(&self.client, &self.forecast_url())
            .await
            .context("DarkSky request failed")?;
        let weather = parse_forecast(&bytes).context("malformed DarkSky forecast")?;
        debug!(summary = %weather.currently.summary, "Forecast fetched");
        Ok(weather)
    }
}
