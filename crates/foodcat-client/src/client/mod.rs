//! HTTP client for the Open Food Facts v2 search and product endpoints.

mod fetch_all;

use std::time::Duration;

use foodcat_core::Product;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::normalize::normalize_product;
use crate::rate_limit::retry_with_backoff;
use crate::types::{OffProductResponse, OffSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org/";

/// Field selection sent with every search request.
pub const SEARCH_FIELDS: &str =
    "product_name,brands,image_url,categories,ingredients_text,nutrition_grades,nutriments,code";

/// HTTP client for the Open Food Facts public API.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Every request carries the configured timeout.
///
/// Transient errors are retried with exponential backoff up to `max_retries`
/// additional attempts; with the default of `0` a failure is returned as-is.
pub struct OffClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    pub(super) max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub(super) backoff_base_ms: u64,
}

impl OffClient {
    /// Creates a client pointed at the production Open Food Facts API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL (a mirror, or wiremock in tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches one page of search results, with automatic retry on
    /// transient errors.
    ///
    /// Returns the raw response; an empty or absent `products` array means
    /// the upstream has no more records.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ClientError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ClientError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ClientError::Deserialize`]: response body is not the expected JSON.
    pub async fn fetch_search_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<OffSearchResponse, ClientError> {
        let url = self.search_url(page, page_size);
        let context = format!("search page {page}");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.get_json::<OffSearchResponse>(url.clone(), context.clone(), None)
        })
        .await
    }

    /// Fetches a single product by code.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`]: the response has no `product`, or the
    ///   upstream answered 404.
    /// - [`ClientError::Normalization`]: the record has no code.
    /// - Any transport error listed on [`Self::fetch_search_page`].
    pub async fn fetch_product(&self, code: &str) -> Result<Product, ClientError> {
        let url = self.product_url(code);
        let context = format!("product {code}");
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.get_json::<OffProductResponse>(url.clone(), context.clone(), Some(code))
        })
        .await?;

        let Some(raw) = response.product else {
            tracing::debug!(
                code,
                status = response.status_verbose.as_deref().unwrap_or(""),
                "upstream reported no product"
            );
            return Err(ClientError::NotFound {
                code: code.to_owned(),
            });
        };

        normalize_product(raw, &context)
    }

    /// Issues one GET and decodes the body as `T`.
    ///
    /// `not_found_code` turns a 404 into [`ClientError::NotFound`]; without
    /// it a 404 is an [`ClientError::UnexpectedStatus`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: String,
        not_found_code: Option<&str>,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited { retry_after_secs });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(code) = not_found_code {
                return Err(ClientError::NotFound {
                    code: code.to_owned(),
                });
            }
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
            context,
            source: e,
        })
    }

    /// Builds `{base}/api/v2/search?page=N&page_size=P&fields=...`.
    fn search_url(&self, page: u32, page_size: u32) -> Url {
        let mut url = self.endpoint(&["api", "v2", "search"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &page_size.to_string())
            .append_pair("fields", SEARCH_FIELDS);
        url
    }

    /// Builds `{base}/api/v2/product/{code}.json`, with `code` encoded as a
    /// single path segment.
    fn product_url(&self, code: &str) -> Url {
        self.endpoint(&["api", "v2", "product", &format!("{code}.json")])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_base_url` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
