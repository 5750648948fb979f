//! `foodcat list`: fetch the catalog, apply filters, print the listing.

use std::process::ExitCode;

use foodcat_core::{AppConfig, FilePreferenceStore, SortKey, ThemePreference};

use crate::render::{CatalogPage, Style};
use crate::views::{CatalogStatus, CatalogView};

/// Inputs collected from the `list` command line.
#[derive(Debug, Default)]
pub(crate) struct ListOptions {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub max_sugar: Option<f64>,
    pub sort: SortKey,
    /// Overrides `FOODCAT_CATALOG_TARGET_COUNT`.
    pub target: Option<usize>,
    /// Overrides `FOODCAT_CATALOG_PAGE_SIZE`.
    pub page_size: Option<u32>,
    pub json: bool,
}

/// Fetch the catalog and print the derived view.
///
/// Filters are applied to the view before the fetch starts, so the listing
/// is derived once the catalog lands. Ctrl-C during the fetch cancels the
/// view's ticket and exits with status 130.
///
/// # Errors
///
/// Returns an error if the client cannot be built or output fails to
/// serialize. A failed fetch is not an error here: it is reported through
/// the view and a failing exit code.
pub(crate) async fn run_list(
    config: &AppConfig,
    options: ListOptions,
) -> anyhow::Result<ExitCode> {
    let client = crate::build_client(config)?;
    let theme = ThemePreference::load(FilePreferenceStore::new(&config.prefs_path)).current();

    let mut view = CatalogView::new();
    view.set_search(options.search.unwrap_or_default());
    for category in &options.categories {
        if !view.criteria().categories.contains(category.as_str()) {
            view.toggle_category(category);
        }
    }
    view.set_sugar_ceiling(options.max_sugar);
    view.set_sort(options.sort);

    let target = options.target.unwrap_or(config.catalog_target_count);
    let page_size = options.page_size.unwrap_or(config.catalog_page_size);

    let ticket = view.begin_load();
    tokio::select! {
        result = client.fetch_catalog(target, page_size, config.inter_request_delay_ms) => {
            view.finish_load(ticket, result);
        }
        () = crate::interrupted() => {
            view.cancel(ticket);
            eprintln!("interrupted; catalog fetch cancelled");
            return Ok(ExitCode::from(130));
        }
    }

    if options.json {
        if let Some(message) = view.error_message() {
            eprintln!("{message}");
        } else {
            println!("{}", serde_json::to_string_pretty(&view.visible())?);
        }
    } else {
        print!(
            "{}",
            CatalogPage {
                view: &view,
                style: Style::for_stdout(theme),
            }
        );
    }

    if matches!(view.status(), CatalogStatus::Error(_)) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
