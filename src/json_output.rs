//! JSON output format for extracted measurements

use crate::measurement::Measurement;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Format tag embedded in every report
pub const FORMAT: &str = "submetrics-json-v1";

/// Top-level JSON document for a batch of measurements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Report format identifier
    pub format: String,
    /// Number of measurements in the batch
    pub count: usize,
    pub measurements: Vec<Measurement>,
}

impl JsonReport {
    pub fn new(measurements: Vec<Measurement>) -> Self {
        Self {
            format: FORMAT.to_string(),
            count: measurements.len(),
            measurements,
        }
    }

    /// Render the report as pretty-printed JSON
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
