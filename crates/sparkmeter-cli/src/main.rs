//! SparkMeter CLI - account and balance lookups against the provider API.
//!
//! Reads `SPARKMETER_API_URL` and `SPARKMETER_API_TOKEN` from the environment,
//! after loading a `.env` file if one is present.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sparkmeter_client::{ProviderClient, ProviderConfig, Resolution};

/// Default look-back when `--start` is omitted.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Query the SparkMeter metering and billing API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Environment file to load. Defaults to the nearest `.env`, if any.
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up the sales account attached to a meter.
    Account {
        /// Meter serial number.
        meter_serial_number: String,
    },

    /// Fetch a customer's balance history, most recent first.
    History {
        /// Provider customer ID.
        customer_id: u64,

        #[command(flatten)]
        window: Window,

        /// Sampling granularity: hourly, daily, weekly or monthly.
        #[arg(short, long, default_value_t = Resolution::Daily)]
        resolution: Resolution,
    },

    /// Show a customer's most recent daily balance.
    Latest {
        /// Provider customer ID.
        customer_id: u64,

        #[command(flatten)]
        window: Window,
    },
}

#[derive(Args, Debug)]
struct Window {
    /// Window start (RFC 3339). Defaults to 30 days before the end.
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Window end (RFC 3339). Defaults to now.
    #[arg(long)]
    end: Option<DateTime<Utc>>,
}

impl Window {
    fn resolve(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = self.end.unwrap_or(now);
        let start = self
            .start
            .unwrap_or_else(|| end - Duration::days(DEFAULT_WINDOW_DAYS));
        (start, end)
    }
}

/// Load variables from `explicit`, or from the nearest `.env` upward of the
/// working directory. Variables already set in the process win.
fn load_env_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => match dotenvy::from_path(path) {
            Ok(()) => Some(path.to_path_buf()),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Could not load environment file");
                None
            }
        },
        None => dotenvy::dotenv().ok(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sparkmeter_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Some(path) = load_env_file(cli.env_file.as_deref()) {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let config = ProviderConfig::from_env();
    tracing::debug!(
        api_url = %config.api_url,
        token_configured = !config.api_token.is_empty(),
        timeout_seconds = ?config.timeout_seconds,
        "Provider configuration loaded"
    );

    let client = ProviderClient::from_config(&config)?;

    match cli.command {
        Command::Account {
            meter_serial_number,
        } => match client.fetch_account_by_meter(&meter_serial_number).await {
            Some(account) => println!("{}", serde_json::to_string_pretty(&account)?),
            None => println!("No customer found for the given meter serial number."),
        },
        Command::History {
            customer_id,
            window,
            resolution,
        } => {
            let (start, end) = window.resolve(Utc::now());
            match client
                .fetch_balance_history(customer_id, start, end, resolution)
                .await
            {
                Some(history) => println!("{}", serde_json::to_string_pretty(&history)?),
                None => println!("No balance history found for customer {customer_id}."),
            }
        }
        Command::Latest {
            customer_id,
            window,
        } => {
            let (start, end) = window.resolve(Utc::now());
            match client.get_latest_balance(customer_id, start, end).await {
                Some(latest) => println!("{}", serde_json::to_string_pretty(&latest)?),
                None => println!("No balance history found for customer {customer_id}."),
            }
        }
    }

    Ok(())
}
