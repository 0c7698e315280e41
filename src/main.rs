// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod client;
mod error;
mod output;
mod sensors;
mod status;

use client::GudeClient;
use output::{listing_lines, nagios_report, plain_lines, ThresholdConfig};
use sensors::SensorTable;

/// Exit code for collection failures, matching the Nagios CRITICAL range.
const EXIT_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "gude-doctor")]
#[command(about = "Nagios-style sensor check for Gude PDU status endpoints")]
struct Args {
    /// IP address or hostname of the target device
    #[arg(short = 'H', long)]
    host: String,

    /// Use an HTTPS connection (certificate validation is disabled)
    #[arg(short, long)]
    ssl: bool,

    /// Username for HTTP basic auth credentials
    #[arg(long)]
    username: Option<String>,

    /// Password for HTTP basic auth credentials
    #[arg(long)]
    password: Option<String>,

    /// Glob pattern selecting sensor locators (e.g. "14.0.*")
    #[arg(long)]
    sensor: Option<String>,

    /// Print bare values only
    #[arg(long)]
    numeric: bool,

    /// Emit Nagios check output with threshold evaluation
    #[arg(long)]
    nagios: bool,

    /// Nagios: threshold to exit at warning level
    #[arg(short, long, default_value_t = 0.0)]
    warning: f64,

    /// Nagios: threshold to exit at critical level
    #[arg(short, long, default_value_t = 0.0)]
    critical: f64,

    /// Nagios: check warn/crit levels by one of >, <, >=, <=
    #[arg(long, default_value = ">")]
    operator: String,

    /// Nagios: sensor label
    #[arg(long, default_value = "sensor")]
    label: String,

    /// Nagios: unit appended to values in check output
    #[arg(long, default_value = "")]
    unit: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut builder = GudeClient::builder().host(&args.host).ssl(args.ssl);
    if let Some(username) = &args.username {
        builder = builder.credentials(username, args.password.as_deref().unwrap_or(""));
    }
    let client = builder.build();

    // All collection failures collapse to one generic message and exit 2;
    // the distinguished kind goes to the log for diagnosability.
    let table: SensorTable = match client.collect().await {
        Ok(table) => table,
        Err(err) => {
            error!(error = %err, "status collection failed");
            println!("ERROR getting sensor json");
            std::process::exit(EXIT_ERROR);
        }
    };

    let Some(pattern) = &args.sensor else {
        // No filter: dump the whole table, headers and all.
        for line in listing_lines(&table) {
            println!("{line}");
        }
        return;
    };

    let selected = match table.matching(pattern) {
        Ok(selected) => selected,
        Err(err) => {
            error!(error = %err, pattern = %pattern, "invalid sensor pattern");
            println!("ERROR invalid sensor pattern");
            std::process::exit(EXIT_ERROR);
        }
    };

    if args.nagios {
        let config = ThresholdConfig {
            label: args.label,
            unit: args.unit,
            warning: args.warning,
            critical: args.critical,
            operator: args.operator,
        };
        let report = nagios_report(&args.host, &selected, &config);
        for line in &report.lines {
            println!("{line}");
        }
        std::process::exit(report.severity.exit_code());
    }

    for line in plain_lines(&selected, args.numeric) {
        println!("{line}");
    }
}
