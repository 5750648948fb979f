//! Open Food Facts API response types for the v2 search and product endpoints.
//!
//! ## Observed shape
//!
//! ### Missing vs empty
//! Almost every field may be absent, `null`, or an empty string depending on
//! how complete the crowd-sourced record is. All text fields are modeled as
//! `Option<String>`; empty strings are mapped to `None` during normalization.
//!
//! ### `products` on the search endpoint
//! An empty array marks the end of the result set. Past the last page some
//! deployments omit the field entirely, so it is `Option` and both cases are
//! treated as end-of-data.
//!
//! ### `product` on the single-item endpoint
//! Absent (with `status: 0` and `status_verbose: "product not found"`) when
//! the code is unknown. The live API also answers 404 in that case.
//!
//! ### `nutriments`
//! A flat object of nutrient name to value. Keys use hyphens for some
//! nutrients (`energy-kcal`, `energy-kcal_100g`) and underscores for others
//! (`sugars_100g`). Values are usually numbers but strings (`"12.5"`) and
//! unit strings (`"kcal"`) also appear, so the raw JSON value is kept and
//! numeric coercion happens in `normalize.rs`.
//!
//! ### `nutrition_grades`
//! Lower-case letter `a`..`e`, or a sentinel such as `"unknown"` or
//! `"not-applicable"`.

use serde::Deserialize;

/// Top-level response from `GET /api/v2/search`.
#[derive(Debug, Deserialize)]
pub struct OffSearchResponse {
    /// Records on this page. `None` when the field is absent or `null`.
    #[serde(default)]
    pub products: Option<Vec<OffProduct>>,

    /// Total matching records reported by the upstream, if present.
    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub page: Option<u32>,
}

impl OffSearchResponse {
    /// Consumes the response, returning the page's records (empty at end of data).
    #[must_use]
    pub fn into_products(self) -> Vec<OffProduct> {
        self.products.unwrap_or_default()
    }
}

/// Top-level response from `GET /api/v2/product/{code}.json`.
#[derive(Debug, Deserialize)]
pub struct OffProductResponse {
    /// The product, or `None` when the upstream does not know the code.
    #[serde(default)]
    pub product: Option<OffProduct>,

    /// Human-readable status, e.g. `"product found"` / `"product not found"`.
    #[serde(default)]
    pub status_verbose: Option<String>,
}

/// A single product record as the upstream sends it.
#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    /// Barcode, e.g. `"3017620422003"`.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub product_name: Option<String>,

    /// Comma-separated brand list, e.g. `"Ferrero, Nutella"`.
    #[serde(default)]
    pub brands: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Comma-separated category list, most generic first.
    #[serde(default)]
    pub categories: Option<String>,

    #[serde(default)]
    pub ingredients_text: Option<String>,

    /// Grade letter or sentinel; see module docs.
    #[serde(default)]
    pub nutrition_grades: Option<String>,

    #[serde(default)]
    pub nutriments: Option<serde_json::Map<String, serde_json::Value>>,

    /// Label text, e.g. `"Organic, EU Organic"`. Only on the product endpoint.
    #[serde(default)]
    pub labels: Option<String>,

    /// Label tags, e.g. `["en:organic", "en:eu-organic"]`. Only on the product endpoint.
    #[serde(default)]
    pub labels_tags: Option<Vec<String>>,
}
