//! Catalog listing: owns the fetched catalog, the filter inputs, and the
//! derived view.

use foodcat_client::CatalogFetchError;
use foodcat_core::{derive_indices, FilterCriteria, Product, SortKey};

use super::{Generation, LoadTicket};

pub const CATALOG_FETCH_FAILED: &str = "Failed to fetch products. Please try again.";
pub const NO_PRODUCTS_FOUND: &str = "No products found.";
pub const LOADING_PRODUCTS: &str = "Loading...";

/// Network-facing state of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    Ready,
    /// The last fetch failed. The message is user-facing.
    Error(String),
}

/// What the grid area shows.
#[derive(Debug, PartialEq)]
pub enum Listing<'a> {
    Loading,
    /// Products to render. Empty when the fetched catalog itself is empty.
    Products(Vec<&'a Product>),
    /// The catalog has products but none pass the current filters.
    NoMatches,
}

#[derive(Debug)]
pub struct CatalogView {
    catalog: Vec<Product>,
    criteria: FilterCriteria,
    sort: SortKey,
    /// Positions in `catalog`, recomputed on every input change.
    visible: Vec<usize>,
    status: CatalogStatus,
    /// Status to return to if an in-flight load is cancelled.
    settled: CatalogStatus,
    generation: Generation,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortKey::None,
            visible: Vec::new(),
            status: CatalogStatus::Idle,
            settled: CatalogStatus::Idle,
            generation: Generation::default(),
        }
    }

    /// Enters `Loading` and returns the ticket the fetch result must carry.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        if self.status != CatalogStatus::Loading {
            self.settled = self.status.clone();
        }
        self.status = CatalogStatus::Loading;
        self.generation.next()
    }

    /// Applies a fetch result. Returns `false` and changes nothing if
    /// `ticket` is stale.
    ///
    /// On success the catalog is replaced wholesale. On failure the partial
    /// list carried by the error is discarded, the previous catalog stays,
    /// and the view shows [`CATALOG_FETCH_FAILED`].
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Product>, CatalogFetchError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "ignoring stale catalog result");
            return false;
        }
        self.generation.invalidate();

        match result {
            Ok(products) => {
                self.catalog = products;
                self.status = CatalogStatus::Ready;
                self.recompute();
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    discarded = error.partial.len(),
                    kept = self.catalog.len(),
                    "catalog fetch failed"
                );
                self.status = CatalogStatus::Error(CATALOG_FETCH_FAILED.to_owned());
            }
        }
        self.settled = self.status.clone();
        true
    }

    /// Abandons the in-flight load for `ticket`, if it is still current.
    ///
    /// A result that arrives later for that ticket is ignored.
    pub fn cancel(&mut self, ticket: LoadTicket) {
        if self.generation.is_current(ticket) {
            self.generation.invalidate();
            self.status = self.settled.clone();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.recompute();
    }

    /// Selects `category` if unselected, unselects it otherwise.
    ///
    /// Returns `true` if the category is selected afterwards.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        let selected = self.criteria.toggle_category(category);
        self.recompute();
        selected
    }

    pub fn set_sugar_ceiling(&mut self, ceiling: Option<f64>) {
        self.criteria.sugar_ceiling = ceiling;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute();
    }

    #[must_use]
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The derived view: filtered and sorted products, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.visible.iter().map(|&idx| &self.catalog[idx]).collect()
    }

    /// User-facing error text, if the last load failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// What the grid area should show right now.
    #[must_use]
    pub fn listing(&self) -> Listing<'_> {
        if self.status == CatalogStatus::Loading {
            return Listing::Loading;
        }
        if self.visible.is_empty() && !self.catalog.is_empty() {
            return Listing::NoMatches;
        }
        Listing::Products(self.visible())
    }

    /// The line shown in place of the grid: loading, or nothing to show.
    /// `None` when there are cards to render or nothing was requested yet.
    ///
    /// Independent of [`Self::error_message`], which is shown above the grid.
    #[must_use]
    pub fn status_line(&self) -> Option<&str> {
        match self.status {
            CatalogStatus::Idle => None,
            CatalogStatus::Loading => Some(LOADING_PRODUCTS),
            CatalogStatus::Ready | CatalogStatus::Error(_) => {
                self.visible.is_empty().then_some(NO_PRODUCTS_FOUND)
            }
        }
    }

    fn recompute(&mut self) {
        self.visible = derive_indices(&self.catalog, &self.criteria, self.sort);
    }
}
