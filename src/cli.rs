//! CLI argument parsing for submetrics

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "submetrics")]
#[command(version)]
#[command(about = "Extract timing measurements from a Checkbox submission", long_about = None)]
pub struct Cli {
    /// Path to the submission.json file to read
    #[arg(value_name = "SUBMISSION_FILE")]
    pub submission_file: PathBuf,

    /// Hardware identifier to tag measurements with
    #[arg(long = "hw-id", value_name = "ID", default_value = "unknown")]
    pub hw_id: String,

    /// Timestamp for the measurements, in seconds since the epoch (default: now)
    #[arg(long = "timestamp", value_name = "SECONDS")]
    pub timestamp: Option<f64>,

    /// Print influx INSERT statements instead of JSON
    #[arg(long = "sql")]
    pub sql: bool,

    /// Push measurements to the influx bridge at this URL instead of printing
    #[arg(long = "bridge-url", value_name = "URL")]
    pub bridge_url: Option<String>,

    /// Database name to pass to the influx bridge
    #[arg(long = "database", value_name = "NAME", default_value = "snap_timings")]
    pub database: String,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_submission_file() {
        let cli = Cli::parse_from(["submetrics", "submission.json"]);
        assert_eq!(cli.submission_file, PathBuf::from("submission.json"));
        assert_eq!(cli.hw_id, "unknown");
        assert!(cli.timestamp.is_none());
        assert!(!cli.sql);
        assert!(cli.bridge_url.is_none());
    }

    #[test]
    fn test_cli_requires_submission_file() {
        let result = Cli::try_parse_from(["submetrics"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_hw_id_and_timestamp() {
        let cli = Cli::parse_from([
            "submetrics",
            "--hw-id",
            "cert-rpi3",
            "--timestamp",
            "1528997724.25",
            "submission.json",
        ]);
        assert_eq!(cli.hw_id, "cert-rpi3");
        assert_eq!(cli.timestamp, Some(1528997724.25));
    }

    #[test]
    fn test_cli_sql_flag() {
        let cli = Cli::parse_from(["submetrics", "--sql", "submission.json"]);
        assert!(cli.sql);
    }

    #[test]
    fn test_cli_bridge_options() {
        let cli = Cli::parse_from([
            "submetrics",
            "--bridge-url",
            "http://bridge:8000/influx",
            "--database",
            "timings",
            "submission.json",
        ]);
        assert_eq!(cli.bridge_url.as_deref(), Some("http://bridge:8000/influx"));
        assert_eq!(cli.database, "timings");
    }

    #[test]
    fn test_cli_database_default() {
        let cli = Cli::parse_from(["submetrics", "submission.json"]);
        assert_eq!(cli.database, "snap_timings");
    }
}
