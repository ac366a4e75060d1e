mod output;
mod run;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use whi_core::{AppConfig, DEFAULT_RADIUS_MILES, REFERENCE_DATE_FORMAT};

#[derive(Debug, Parser)]
#[command(name = "whi")]
#[command(about = "Waffle House Index: share of stores closed today, as a severity band")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Nationwide index (the default).
    Index {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Index over stores near a point or ZIP code.
    Region {
        #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "zip")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long, required_unless_present = "lat")]
        zip: Option<String>,
        /// Radius in miles.
        #[arg(long, default_value_t = DEFAULT_RADIUS_MILES)]
        radius: f64,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the raw `__NEXT_DATA__` payload of a page.
    Extract {
        /// Read the page from a local file instead of fetching it.
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Classify a closed fraction with the configured thresholds.
    Classify {
        #[arg(allow_negative_numbers = true)]
        fraction: f64,
    },
}

#[derive(Debug, Default, Args)]
struct SourceArgs {
    /// Locator page URL; defaults to `WHI_LOCATOR_URL`.
    #[arg(long)]
    url: Option<String>,
    /// Reference date (YYYY-MM-DD); defaults to today in local time.
    #[arg(long, value_parser = parse_reference_date)]
    date: Option<NaiveDate>,
    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

impl SourceArgs {
    fn reference_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn parse_reference_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, REFERENCE_DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Read the full configuration and start logging at its level.
///
/// `RUST_LOG`, when set, takes precedence over `WHI_LOG_LEVEL`.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = whi_core::load_app_config_from_env().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        None => run::run_index(&load_config()?, &SourceArgs::default()).await,
        Some(Commands::Index { source }) => run::run_index(&load_config()?, &source).await,
        Some(Commands::Region {
            lat,
            lon,
            zip,
            radius,
            source,
        }) => {
            let center = match (lat, lon, zip) {
                (Some(lat), Some(lon), _) => run::Center::Point { lat, lon },
                (_, _, Some(zip)) => run::Center::Zip(zip),
                _ => anyhow::bail!("either --lat/--lon or --zip is required"),
            };
            run::run_region(&load_config()?, &source, center, radius).await
        }
        Some(Commands::Extract { file, url }) => {
            run::run_extract(&load_config()?, file.as_deref(), url.as_deref()).await
        }
        Some(Commands::Classify { fraction }) => {
            let thresholds =
                whi_core::load_thresholds_from_env().context("failed to load severity thresholds")?;
            run::run_classify(&thresholds, fraction)
        }
    }
}

#[cfg(test)]
mod tests;
