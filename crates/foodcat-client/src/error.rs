use foodcat_core::Product;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by upstream (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("product not found: {code}")]
    NotFound { code: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("normalization error for product {context}: {reason}")]
    Normalization { context: String, reason: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: u32 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// `true` when the upstream reported that no such product exists.
    ///
    /// Every other variant is a transport, protocol, or data failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A paginated catalog fetch that failed part-way through.
///
/// `partial` holds every product accumulated from pages before `page`.
#[derive(Debug, Error)]
#[error("catalog fetch failed on page {page} after {} products: {source}", .partial.len())]
pub struct CatalogFetchError {
    pub page: u32,
    pub partial: Vec<Product>,
    #[source]
    pub source: ClientError,
}
