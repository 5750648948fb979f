//! `foodcat show <CODE>`: fetch and print one product.

use std::process::ExitCode;

use foodcat_core::{AppConfig, FilePreferenceStore, ThemePreference};

use crate::render::{DetailPage, Style};
use crate::views::{DetailStatus, DetailView};

/// Fetch a single product by code and print its detail page.
///
/// Exits with a failing status when the product is missing or the fetch
/// fails; the message goes to stdout as part of the page (stderr with
/// `--json`).
///
/// # Errors
///
/// Returns an error if the client cannot be built or the product fails to
/// serialize.
pub(crate) async fn run_show(
    config: &AppConfig,
    code: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let client = crate::build_client(config)?;
    let theme = ThemePreference::load(FilePreferenceStore::new(&config.prefs_path)).current();

    let mut view = DetailView::new();
    if let Some(ticket) = view.load(code) {
        tokio::select! {
            result = client.fetch_product(code) => {
                view.finish(ticket, result);
            }
            () = crate::interrupted() => {
                view.cancel(ticket);
                eprintln!("interrupted; product fetch cancelled");
                return Ok(ExitCode::from(130));
            }
        }
    }

    if json {
        match view.product() {
            Some(product) => println!("{}", serde_json::to_string_pretty(product)?),
            None => eprintln!("{}", view.message().unwrap_or_default()),
        }
    } else {
        print!(
            "{}",
            DetailPage {
                view: &view,
                style: Style::for_stdout(theme),
            }
        );
    }

    match view.status() {
        DetailStatus::Ready(_) => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}
