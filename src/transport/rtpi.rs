//! Client for the Dublin real-time passenger information (RTPI) service.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::aggregate::ArrivalSource;
use super::error::FetchError;
use super::types::{RawArrival, StopResponse};
use crate::fetch::{HttpClient, fetch_bytes};

pub const SUCCESS_CODE: &str = "0";
pub const NO_DATA_CODE: &str = "1";

#[derive(Deserialize)]
struct RtpiResponse {
    errorcode: String,
    // Either may be sent as null alongside a non-zero code.
    #[serde(default)]
    errormessage: Option<String>,
    #[serde(default)]
    results: Option<Vec<RawArrival>>,
}

/// Classifies an RTPI response body.
///
/// Error code `"0"` carries results and `"1"` means nothing is due at the
/// stop. Every other code is a provider fault.
pub fn parse_response(bytes: &[u8]) -> Result<StopResponse, FetchError> {
    let response: RtpiResponse =
        serde_json::from_slice(bytes).context("malformed RTPI response")?;

    match response.errorcode.as_str() {
        SUCCESS_CODE => Ok(StopResponse::Arrivals(response.results.unwrap_or_default())),
        NO_DATA_CODE => Ok(StopResponse::NoData),
        _ => Err(FetchError::ProviderFault {
            code: response.errorcode,
            message: response.errormessage.unwrap_or_default(),
        }),
    }
}

pub struct RtpiClient<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> RtpiClient<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn stop_url(&self, stop_id: &str) -> anyhow::Result<reqwest::Url> {
        reqwest::Url::parse_with_params(&self.base_url, &[("stopid", stop_id)])
            .with_context(|| format!("invalid RTPI base url '{}'", self.base_url))
    }
}

#[async_trait]
impl<C: HttpClient> ArrivalSource for RtpiClient<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, stop_id: &str) -> Result<StopResponse, FetchError> {
        let url = self.stop_url(stop_id)?;
        let bytes = fetch_bytes(&self.client, url.as_str()).await?;
        parse_response(&bytes)
    }
}
