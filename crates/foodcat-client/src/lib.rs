pub mod client;
pub mod error;
pub mod normalize;
mod rate_limit;
pub mod types;

pub use client::{OffClient, DEFAULT_BASE_URL, SEARCH_FIELDS};
pub use error::{CatalogFetchError, ClientError};
pub use normalize::{normalize_nutriments, normalize_product};
pub use types::{OffProduct, OffProductResponse, OffSearchResponse};
