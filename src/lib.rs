//! Submetrics - timing measurement extraction for Checkbox submissions
//!
//! This library parses Checkbox submission files, extracts timing
//! measurements for tracked jobs (including systemd-analyze boot timings
//! recovered from job output logs), and shapes them as tagged, timestamped
//! points for InfluxDB ingestion.

pub mod boot_timing;
pub mod bridge;
pub mod cli;
pub mod extractor;
pub mod json_output;
pub mod measurement;
pub mod sql_output;
pub mod submission;
