//! Checkbox submission data model
//!
//! A submission file is the JSON record Checkbox produces for one test run.
//! Only the fields this tool reads are modeled; everything else in the file
//! is ignored. All fields are optional in the wild, so every accessor
//! degrades to a default instead of failing.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to load a submission file
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("failed to read submission file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse submission file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// One test run's worth of results, as parsed from a submission file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Submission {
    /// Project title, used as the measurement's project tag
    pub title: Option<String>,

    pub distribution: Option<Distribution>,

    /// Primary job results
    #[serde(default)]
    pub results: Vec<SubmissionResult>,

    /// Resource job results, appended after the primary list
    #[serde(rename = "resource-results", default)]
    pub resource_results: Vec<SubmissionResult>,

    /// Snap packages installed on the device under test
    #[serde(rename = "snap-packages", default)]
    pub snap_packages: Vec<SnapPackage>,
}

/// OS information as reported by the device under test
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Distribution {
    pub description: Option<String>,
}

/// Outcome of a single job
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SubmissionResult {
    /// Job identifier, e.g. "com.canonical::snap-install"
    pub id: String,

    /// Elapsed time in seconds as measured by Checkbox
    pub duration: Option<f64>,

    /// Captured stdout/stderr of the job
    pub io_log: Option<String>,
}

/// One entry of the snap-packages resource
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapPackage {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub revision: String,
}

impl Submission {
    /// Load a submission from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SubmissionError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SubmissionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SubmissionError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Revision of the "core" snap, or "0" when it is not listed
    pub fn core_revision(&self) -> &str {
        self.snap_packages
            .iter()
            .find(|snap| snap.name == "core")
            .map(|snap| snap.revision.as_str())
            .filter(|revision| !revision.is_empty())
            .unwrap_or("0")
    }
}
