//! Multi-page catalog fetch loop for `OffClient`.

use std::time::Duration;

use foodcat_core::Product;

use crate::error::{CatalogFetchError, ClientError};
use crate::normalize::normalize_product;

use super::OffClient;

/// Page budget as a multiple of the pages a full-page upstream would need.
const PAGE_BUDGET_FACTOR: usize = 2;

/// Most pages `fetch_catalog` requests before giving up with
/// [`ClientError::PaginationLimit`].
///
/// An upstream serving full pages needs `ceil(target_count / page_size)`
/// pages. The budget allows twice that, so pages shorter than requested
/// still complete while an upstream that keeps answering with a few records
/// per page is cut off.
fn page_budget(target_count: usize, page_size: u32) -> u32 {
    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX).max(1);
    let needed = target_count.div_ceil(page_size);
    u32::try_from(needed.saturating_mul(PAGE_BUDGET_FACTOR)).unwrap_or(u32::MAX)
}

impl OffClient {
    /// Fetches search pages 1, 2, 3, … until at least `target_count`
    /// products are collected or a page comes back empty.
    ///
    /// Pages are requested strictly one after another. Each page's records
    /// are appended in response order with no deduplication, so the result
    /// may exceed `target_count` by up to one page. `target_count == 0`
    /// returns immediately without a request.
    ///
    /// Every record returned counts toward `target_count`, including records
    /// without a code, which are skipped with a warning.
    ///
    /// `inter_request_delay_ms` is the delay between page requests (applied
    /// before every page except the first).
    ///
    /// # Errors
    ///
    /// On any page failure the loop stops and returns a
    /// [`CatalogFetchError`] carrying the failed page number, the products
    /// collected from earlier pages, and the cause. Returns
    /// [`ClientError::PaginationLimit`] (wrapped the same way) if the target
    /// is still not reached after twice the pages full pages would need.
    pub async fn fetch_catalog(
        &self,
        target_count: usize,
        page_size: u32,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<Product>, CatalogFetchError> {
        let max_pages = page_budget(target_count, page_size);
        let mut all_products: Vec<Product> = Vec::new();
        let mut fetched = 0usize;
        let mut page = 1u32;

        while fetched < target_count {
            if page > max_pages {
                return Err(CatalogFetchError {
                    page,
                    partial: all_products,
                    source: ClientError::PaginationLimit { max_pages },
                });
            }

            if page > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let response = match self.fetch_search_page(page, page_size).await {
                Ok(response) => response,
                Err(source) => {
                    return Err(CatalogFetchError {
                        page,
                        partial: all_products,
                        source,
                    });
                }
            };

            let upstream_count = response.count;
            let records = response.into_products();
            if records.is_empty() {
                tracing::debug!(page, "empty page, end of catalog");
                break;
            }

            tracing::debug!(
                page,
                records = records.len(),
                upstream_count,
                "fetched catalog page"
            );

            fetched += records.len();
            let context = format!("search page {page}");
            for raw in records {
                match normalize_product(raw, &context) {
                    Ok(product) => all_products.push(product),
                    Err(error) => tracing::warn!(%error, "skipping catalog record"),
                }
            }

            page += 1;
        }

        tracing::info!(
            products = all_products.len(),
            records = fetched,
            pages = page - 1,
            target_count,
            "catalog fetch complete"
        );
        Ok(all_products)
    }
}
