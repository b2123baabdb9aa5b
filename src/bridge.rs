//! HTTP client for the influx bridge service
//!
//! The bridge sits between CI machines and InfluxDB: it accepts a JSON
//! body of `{"database": ..., "measurements": [...]}` on its `/influx`
//! endpoint and writes the points on the caller's behalf, so CI jobs never
//! hold database credentials.

use crate::measurement::Measurement;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct BridgePayload<'a> {
    database: &'a str,
    measurements: &'a [Measurement],
}

/// Client for one bridge endpoint and target database
#[derive(Debug)]
pub struct BridgeClient {
    url: String,
    database: String,
    client: reqwest::blocking::Client,
}

impl BridgeClient {
    /// Create a client for the given bridge URL (e.g. `http://bridge:8000/influx`)
    pub fn new(url: &str, database: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            url: url.to_string(),
            database: database.to_string(),
            client,
        })
    }

    /// POST a batch of measurements to the bridge
    ///
    /// An empty batch is a no-op. Connection failures and non-2xx
    /// responses are reported with the bridge's status and response text.
    pub fn push(&self, measurements: &[Measurement]) -> Result<()> {
        if measurements.is_empty() {
            debug!("no measurements to push");
            return Ok(());
        }
        let payload = BridgePayload {
            database: &self.database,
            measurements,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .with_context(|| format!("failed to reach influx bridge at {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("influx bridge rejected the push: {} - {}", status, body);
        }
        debug!(count = measurements.len(), "pushed measurements to bridge");
        Ok(())
    }
}
