//! ERDDAP HTTP client

use super::error::{ErddapError, ErddapResult};
use super::ingest::{fill_to_present, parse_csv, resample_hourly, Observations};
use super::params::StationParams;
use super::writer::build_document;
use crate::dashboard::TrackedVariable;
use crate::document::StationDocument;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

/// Downloads station feeds from an ERDDAP tabledap server
pub struct ErddapClient {
    client: Client,
    base_url: String,
}

impl ErddapClient {
    /// Create a client for a tabledap base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ErddapResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the raw `.csvp` body for a station
    pub async fn fetch_csv(&self, params: &StationParams) -> ErddapResult<String> {
        let url = params.build_url(&self.base_url);
        tracing::info!(station = %params.erddap_id, url = %url, "Requesting ERDDAP data");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ErddapError::Timeout
            } else if e.is_connect() {
                ErddapError::Unavailable(self.base_url.clone())
            } else {
                ErddapError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ErddapError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Download and resample a station feed to hourly means
    pub async fn fetch_hourly(&self, params: &StationParams) -> ErddapResult<Observations> {
        let text = self.fetch_csv(params).await?;
        let raw = parse_csv(&text, &params.short_names())?;
        let hourly = resample_hourly(&raw);

        tracing::info!(
            station = %params.erddap_id,
            rows = raw.len(),
            hours = hourly.len(),
            "Resampled station data"
        );
        Ok(hourly)
    }

    /// Download a station and assemble its dashboard document
    pub async fn build_document(
        &self,
        params: &StationParams,
        tracked: &[TrackedVariable],
        now: DateTime<Utc>,
        fill_days: i64,
    ) -> ErddapResult<StationDocument> {
        let hourly = self.fetch_hourly(params).await?;
        let filled = fill_to_present(&hourly, now, fill_days);
        build_document(params, &hourly, &filled, tracked)
    }
}
