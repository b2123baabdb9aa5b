//! Timing measurement records destined for InfluxDB
//!
//! The shapes here mirror what the influx bridge accepts: a measurement
//! name, a tag set for indexing, a field set with the actual value, and an
//! explicit timestamp in nanoseconds. The timestamp is always supplied by
//! the caller (never "now") so that re-extracting the same submission
//! produces identical points.

use serde::{Deserialize, Serialize};

/// Measurement name shared by every point this tool emits
pub const SNAP_TIMING: &str = "snap_timing";

/// Tags attached to every timing point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementTags {
    /// Project title from the submission, "unknown" when absent
    pub project_name: String,
    /// Tracked job name, or the boot-analysis job identifier
    pub job_name: String,
    /// Hardware identifier supplied by the caller
    pub hw_id: String,
    /// OS description from the submission, "unknown" when absent
    pub os_kind: String,
    /// Revision of the "core" snap, "0" when not listed
    pub core_revision: String,
}

/// Field values of a timing point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementFields {
    /// Elapsed time in seconds
    pub elapsed: f64,
}

/// One tagged, timestamped timing data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub measurement: String,
    pub tags: MeasurementTags,
    pub fields: MeasurementFields,
    /// Nanoseconds since the Unix epoch
    pub time: i64,
}
