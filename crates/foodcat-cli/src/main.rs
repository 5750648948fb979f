mod list;
mod render;
mod show;
mod theme;
mod views;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use foodcat_client::OffClient;
use foodcat_core::{AppConfig, SortKey};
use tracing_subscriber::EnvFilter;

use crate::list::ListOptions;
use crate::theme::ThemeCommands;

#[derive(Debug, Parser)]
#[command(name = "foodcat")]
#[command(about = "Browse the Open Food Facts catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and print it filtered and sorted (the default)
    List {
        /// Keep products whose name contains this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Keep products in this category; repeat to match any of several
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Keep products with strictly less sugar per 100g than this
        #[arg(long, value_name = "GRAMS", value_parser = parse_sugar_ceiling)]
        max_sugar: Option<f64>,

        /// Sort order: none, name_asc, name_desc, nutrition_asc,
        /// nutrition_desc, calories_low_high, calories_high_low
        #[arg(long, default_value = "none", value_parser = parse_sort_key)]
        sort: SortKey,

        /// Stop fetching once at least this many products are collected
        #[arg(long, value_name = "N")]
        target: Option<usize>,

        /// Products requested per page
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,

        /// Print the listing as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fetch one product by code and print its details
    Show {
        /// Product barcode, e.g. 3017620422003
        code: String,

        /// Print the product as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show or toggle the light/dark theme preference
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse()
}

fn parse_sugar_ceiling(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("expected a number of grams, got '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("sugar ceiling must be finite, got '{raw}'"));
    }
    Ok(value)
}

/// Build the Open Food Facts client from app config.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot
/// be constructed.
pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<OffClient> {
    Ok(OffClient::with_base_url(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub(crate) async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = foodcat_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::List {
            search,
            categories,
            max_sugar,
            sort,
            target,
            page_size,
            json,
        }) => {
            let options = ListOptions {
                search,
                categories,
                max_sugar,
                sort,
                target,
                page_size,
                json,
            };
            list::run_list(&config, options).await
        }
        Some(Commands::Show { code, json }) => show::run_show(&config, &code, json).await,
        Some(Commands::Theme { command }) => {
            theme::run_theme(&config, command)?;
            Ok(ExitCode::SUCCESS)
        }
        None => list::run_list(&config, ListOptions::default()).await,
    }
}
