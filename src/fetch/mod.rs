//! HTTP plumbing shared by every provider client.
//!
//! Providers talk to the network through the [`HttpClient`] trait so that
//! authentication can be layered on as wrappers (see [`auth`]).
//!
//! Request URLs may carry API keys (in the path for DarkSky, in the query
//! once [`auth::UrlParam`] has run), so only the host is ever logged and
//! transport errors are stripped of their URL.

mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Issues a GET for `url` and returns the raw response body.
///
/// Non-success HTTP statuses are reported as errors.
#[tracing::instrument(skip(client, url), fields(host = tracing::field::Empty))]
pub async fn fetch_bytes<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>> {
    let url: reqwest::Url = url.parse().context("invalid request url")?;
    let host = url.host_str().unwrap_or_default().to_string();
    tracing::Span::current().record("host", host.as_str());

    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("request to {host} failed"))?;
    let bytes = resp
        .bytes()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("reading response from {host} failed"))?
        .to_vec();
    debug!(bytes = bytes.len(), "Response body received");
    Ok(bytes)
}
