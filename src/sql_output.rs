//! SQL-style INSERT rendering of measurements
//!
//! Historically these lines were pasted straight into the `influx` shell,
//! so the format is kept exactly as the shell expects it: string tag values
//! double-quoted, the numeric core revision bare, timestamp last.

use crate::measurement::Measurement;

// surround s with double quotes
fn dquote(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Render one measurement as an INSERT statement
pub fn insert_statement(measurement: &Measurement) -> String {
    format!(
        "INSERT {name},project_name={proj},job_name={job},hw_id={hw},os_kind={os},\
         core_revision={core_rev} elapsed={elapsed} {tstamp}",
        name = measurement.measurement,
        proj = dquote(&measurement.tags.project_name),
        job = dquote(&measurement.tags.job_name),
        hw = dquote(&measurement.tags.hw_id),
        os = dquote(&measurement.tags.os_kind),
        core_rev = measurement.tags.core_revision,
        elapsed = measurement.fields.elapsed,
        tstamp = measurement.time,
    )
}

/// Render a batch of measurements, one INSERT per line
pub fn insert_statements(measurements: &[Measurement]) -> String {
    measurements
        .iter()
        .map(insert_statement)
        .collect::<Vec<_>>()
        .join("\n")
}
