use anyhow::Result;
use clap::Parser;
use std::time::{SystemTime, UNIX_EPOCH};
use submetrics::{bridge, cli::Cli, extractor, json_output, sql_output, submission};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Seconds since the epoch, used when no --timestamp is given
fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let submission = submission::Submission::from_file(&args.submission_file)?;
    let timestamp = args.timestamp.unwrap_or_else(now_secs);
    let extractor = extractor::MeasurementExtractor::new(&args.hw_id, &submission, timestamp);
    let measurements: Vec<_> = extractor.measurements().collect();

    if let Some(url) = &args.bridge_url {
        let client = bridge::BridgeClient::new(url, &args.database)?;
        client.push(&measurements)?;
    } else if args.sql {
        let rendered = sql_output::insert_statements(&measurements);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    } else {
        println!("{}", json_output::JsonReport::new(measurements).render()?);
    }
    Ok(())
}
