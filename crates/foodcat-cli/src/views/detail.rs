//! Single-product detail page keyed by product code.

use foodcat_client::ClientError;
use foodcat_core::Product;

use super::{Generation, LoadTicket};

pub const PRODUCT_NOT_FOUND: &str = "Product not found.";
pub const DETAIL_FETCH_FAILED: &str = "Failed to load product details.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Ready(Box<Product>),
    /// The API answered but has no product for the code.
    NotFound,
    /// Transport, status, or decode failure. The message is user-facing.
    Error(String),
}

#[derive(Debug)]
pub struct DetailView {
    code: Option<String>,
    status: DetailStatus,
    generation: Generation,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            code: None,
            status: DetailStatus::Idle,
            generation: Generation::default(),
        }
    }

    /// Points the view at `code` and starts a load.
    ///
    /// Returns `None` when the view already shows (or is loading) the same
    /// code. The same code after a failed fetch starts a retry. A different
    /// code discards the shown product and supersedes any in-flight load for
    /// the old one.
    pub fn load(&mut self, code: &str) -> Option<LoadTicket> {
        let settled = !matches!(self.status, DetailStatus::Idle | DetailStatus::Error(_));
        if self.code.as_deref() == Some(code) && settled {
            return None;
        }
        self.code = Some(code.to_owned());
        self.status = DetailStatus::Loading;
        Some(self.generation.next())
    }

    /// Applies a fetch result. Returns `false` and changes nothing if
    /// `ticket` is stale.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Product, ClientError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "ignoring stale product result");
            return false;
        }
        self.generation.invalidate();

        self.status = match result {
            Ok(product) => DetailStatus::Ready(Box::new(product)),
            Err(error) if error.is_not_found() => DetailStatus::NotFound,
            Err(error) => {
                tracing::warn!(%error, code = self.code.as_deref(), "product fetch failed");
                DetailStatus::Error(DETAIL_FETCH_FAILED.to_owned())
            }
        };
        true
    }

    /// Abandons the in-flight load for `ticket`, if it is still current.
    ///
    /// The view returns to `Idle`, so loading the same code again starts a
    /// new fetch. A result that arrives later for `ticket` is ignored.
    pub fn cancel(&mut self, ticket: LoadTicket) {
        if self.generation.is_current(ticket) {
            self.generation.invalidate();
            self.status = DetailStatus::Idle;
        }
    }

    #[must_use]
    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match &self.status {
            DetailStatus::Ready(product) => Some(product),
            _ => None,
        }
    }

    /// User-facing message for the not-found and error states.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            DetailStatus::NotFound => Some(PRODUCT_NOT_FOUND),
            DetailStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
