//! Measurement extraction from parsed submissions
//!
//! For jobs in [`MEASURED_JOBS`] the `duration` reported by Checkbox is
//! taken as-is. For [`BOOTUP_JOB_ID`] the job's output log is run through
//! the boot-timing parser and the reported total becomes the measurement.
//! Everything that cannot be measured is skipped, never an error: a CI
//! pipeline must not abort over one bad boot-log line.

use crate::boot_timing;
use crate::measurement::{Measurement, MeasurementFields, MeasurementTags, SNAP_TIMING};
use crate::submission::{Submission, SubmissionResult};
use tracing::warn;

/// Jobs whose Checkbox-reported duration is tracked
pub const MEASURED_JOBS: &[&str] = &[
    "snap-install",
    "snap-remove",
    "connect-tillamook-plugs",
    "connect-caracalla-plugs",
];

/// Job whose output log carries the systemd-analyze startup summary
pub const BOOTUP_JOB_ID: &str = "info/systemd-analyze";

const NANOS_PER_SEC: f64 = 1e9;

/// Extracts timing measurements from one submission
///
/// Shared tag values and the timestamp are derived once at construction,
/// so every measurement from one submission carries the same tags and the
/// same time. Extraction itself is pure; calling [`measurements`] twice
/// yields identical sequences.
///
/// [`measurements`]: MeasurementExtractor::measurements
#[derive(Debug)]
pub struct MeasurementExtractor<'a> {
    submission: &'a Submission,
    tracked_jobs: &'a [&'a str],
    project_name: String,
    hw_id: String,
    os_kind: String,
    core_revision: String,
    time_ns: i64,
}

impl<'a> MeasurementExtractor<'a> {
    /// Create an extractor with the default tracked-job list
    pub fn new(hw_id: &str, submission: &'a Submission, timestamp_secs: f64) -> Self {
        Self::with_tracked_jobs(hw_id, submission, timestamp_secs, MEASURED_JOBS)
    }

    /// Create an extractor with an explicit tracked-job list
    pub fn with_tracked_jobs(
        hw_id: &str,
        submission: &'a Submission,
        timestamp_secs: f64,
        tracked_jobs: &'a [&'a str],
    ) -> Self {
        let project_name = submission
            .title
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let os_kind = submission
            .distribution
            .as_ref()
            .and_then(|distribution| distribution.description.clone())
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            submission,
            tracked_jobs,
            project_name,
            hw_id: hw_id.to_string(),
            os_kind,
            core_revision: submission.core_revision().to_string(),
            time_ns: (timestamp_secs * NANOS_PER_SEC) as i64,
        }
    }

    /// Iterate over all measurements in the submission
    ///
    /// Results are visited in order, primary list first, then resource
    /// results. The iterator is finite and owns nothing; re-invoking it
    /// restarts the extraction.
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.submission
            .results
            .iter()
            .chain(self.submission.resource_results.iter())
            .flat_map(move |result| self.result_measurements(result))
    }

    fn result_measurements(&self, result: &SubmissionResult) -> Vec<Measurement> {
        let mut measurements = Vec::new();

        for job in self.tracked_jobs {
            if !result.id.ends_with(job) {
                continue;
            }
            // a missing or zero duration means there is nothing to measure
            match result.duration {
                Some(elapsed) if elapsed != 0.0 => {
                    measurements.push(self.measurement(job, elapsed));
                }
                _ => {}
            }
        }

        if result.id.ends_with(BOOTUP_JOB_ID) {
            match result.io_log.as_deref().and_then(boot_timing::parse) {
                Some(timings) => {
                    measurements.push(self.measurement(BOOTUP_JOB_ID, timings.total()));
                }
                None => {
                    warn!(
                        job = %result.id,
                        log = ?result.io_log,
                        "job output is not a parseable startup summary, skipping"
                    );
                }
            }
        }

        measurements
    }

    fn measurement(&self, job_name: &str, elapsed: f64) -> Measurement {
        Measurement {
            measurement: SNAP_TIMING.to_string(),
            tags: MeasurementTags {
                project_name: self.project_name.clone(),
                job_name: job_name.to_string(),
                hw_id: self.hw_id.clone(),
                os_kind: self.os_kind.clone(),
                core_revision: self.core_revision.clone(),
            },
            fields: MeasurementFields { elapsed },
            time: self.time_ns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission_from_json(json: &str) -> Submission {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tracked_job_yields_one_measurement() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "foo/snap-install", "duration": 1.5}]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        let measurements: Vec<_> = extractor.measurements().collect();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].measurement, "snap_timing");
        assert_eq!(measurements[0].fields.elapsed, 1.5);
        assert_eq!(measurements[0].time, 1_000_000_000);
        assert_eq!(measurements[0].tags.job_name, "snap-install");
        assert_eq!(measurements[0].tags.hw_id, "x");
        assert_eq!(measurements[0].tags.project_name, "unknown");
        assert_eq!(measurements[0].tags.os_kind, "unknown");
        assert_eq!(measurements[0].tags.core_revision, "0");
    }

    #[test]
    fn test_empty_results_yield_nothing() {
        let submission = submission_from_json(r#"{"results": []}"#);
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_missing_results_list_yields_nothing() {
        let submission = submission_from_json("{}");
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_untracked_job_yields_nothing() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "foo/uptime", "duration": 1.5}]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_missing_or_zero_duration_skipped() {
        let submission = submission_from_json(
            r#"{"results": [
                {"id": "snap-install"},
                {"id": "snap-remove", "duration": 0.0}
            ]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_resource_results_follow_primary_results() {
        let submission = submission_from_json(
            r#"{
                "results": [{"id": "snap-remove", "duration": 2.5}],
                "resource-results": [{"id": "snap-install", "duration": 1.5}]
            }"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        let jobs: Vec<_> = extractor
            .measurements()
            .map(|measurement| measurement.tags.job_name)
            .collect();
        assert_eq!(jobs, vec!["snap-remove", "snap-install"]);
    }

    #[test]
    fn test_bootup_job_uses_parsed_total() {
        let submission = submission_from_json(
            r#"{"results": [{
                "id": "com.canonical::info/systemd-analyze",
                "io_log": "Startup finished in 5.459s (kernel)+ 18.985s (userspace) = 24.444s"
            }]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        let measurements: Vec<_> = extractor.measurements().collect();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].fields.elapsed, 24.444);
        assert_eq!(measurements[0].tags.job_name, BOOTUP_JOB_ID);
    }

    #[test]
    fn test_unparseable_bootup_log_is_skipped() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "info/systemd-analyze", "io_log": "Weird output"}]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_bootup_job_without_log_is_skipped() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "info/systemd-analyze"}]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        assert_eq!(extractor.measurements().count(), 0);
    }

    #[test]
    fn test_shared_tags_from_submission_metadata() {
        let submission = submission_from_json(
            r#"{
                "title": "checkbox-project",
                "distribution": {"description": "Ubuntu 18.04"},
                "snap-packages": [{"name": "core", "revision": "4571"}],
                "results": [{"id": "snap-install", "duration": 1.5}]
            }"#,
        );
        let extractor = MeasurementExtractor::new("cert-rpi3", &submission, 2.0);
        let measurements: Vec<_> = extractor.measurements().collect();
        assert_eq!(measurements[0].tags.project_name, "checkbox-project");
        assert_eq!(measurements[0].tags.os_kind, "Ubuntu 18.04");
        assert_eq!(measurements[0].tags.core_revision, "4571");
        assert_eq!(measurements[0].tags.hw_id, "cert-rpi3");
        assert_eq!(measurements[0].time, 2_000_000_000);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let submission = submission_from_json(
            r#"{
                "title": "checkbox-project",
                "results": [
                    {"id": "snap-install", "duration": 1.5},
                    {"id": "info/systemd-analyze",
                     "io_log": "Startup finished in 5s (kernel)+ 4s (userspace) = 9s"}
                ]
            }"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.0);
        let first: Vec<_> = extractor.measurements().collect();
        let second: Vec<_> = extractor.measurements().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_custom_tracked_jobs() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "foo/kernel-build", "duration": 10.0}]}"#,
        );
        let extractor =
            MeasurementExtractor::with_tracked_jobs("x", &submission, 1.0, &["kernel-build"]);
        let measurements: Vec<_> = extractor.measurements().collect();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].tags.job_name, "kernel-build");
    }

    #[test]
    fn test_fractional_timestamp_converts_to_nanoseconds() {
        let submission = submission_from_json(
            r#"{"results": [{"id": "snap-install", "duration": 1.5}]}"#,
        );
        let extractor = MeasurementExtractor::new("x", &submission, 1.25);
        let measurements: Vec<_> = extractor.measurements().collect();
        assert_eq!(measurements[0].time, 1_250_000_000);
    }
}
