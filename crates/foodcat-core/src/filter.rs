//! Client-side filtering and sorting of a product catalog.
//!
//! Everything here is a pure function of `(catalog, criteria, sort)`. The
//! catalog is only ever borrowed; the derived view is a fresh list of
//! references (or indices) into it.
//!
//! Pipeline order is fixed: search text, then categories, then sugar
//! ceiling, then sort. Each filter stage only narrows, so the order affects
//! cost, not the resulting set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::products::{NutritionGrade, Product};

/// Category choices offered by the catalog listing.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Beverages", "Dairy", "Snacks", "Bakery", "Frozen"];

/// User-controlled filter inputs for the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against the product name.
    pub search: String,
    /// Categories OR-combined against the product's category text.
    pub categories: BTreeSet<String>,
    /// Exclusive upper bound on sugars per 100g.
    pub sugar_ceiling: Option<f64>,
}

impl FilterCriteria {
    /// Adds `category` if it is not selected, removes it if it is.
    ///
    /// Returns `true` if the category is selected after the call.
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if self.categories.remove(category) {
            false
        } else {
            self.categories.insert(category.to_owned());
            true
        }
    }

    /// `true` when no filter stage would drop anything.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty() && self.categories.is_empty() && self.sugar_ceiling.is_none()
    }
}

/// Sort order for the derived view.
///
/// Parsed from and displayed as the listing's option values
/// (`name_asc`, `calories_low_high`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    None,
    NameAsc,
    NameDesc,
    NutritionAsc,
    NutritionDesc,
    CaloriesLowHigh,
    CaloriesHighLow,
}

impl SortKey {
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::NameAsc,
        Self::NameDesc,
        Self::NutritionAsc,
        Self::NutritionDesc,
        Self::CaloriesLowHigh,
        Self::CaloriesHighLow,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::NutritionAsc => "nutrition_asc",
            Self::NutritionDesc => "nutrition_desc",
            Self::CaloriesLowHigh => "calories_low_high",
            Self::CaloriesHighLow => "calories_high_low",
        }
    }

    /// Human-readable label, e.g. `"Product Name (A-Z)"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Sort By",
            Self::NameAsc => "Product Name (A-Z)",
            Self::NameDesc => "Product Name (Z-A)",
            Self::NutritionAsc => "Nutrition Grade (A-E)",
            Self::NutritionDesc => "Nutrition Grade (E-A)",
            Self::CaloriesLowHigh => "Calories (Lowest to Highest)",
            Self::CaloriesHighLow => "Calories (Highest to Lowest)",
        }
    }

    /// Compares two products under this key. `None` treats everything as equal.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::NameAsc => compare_names(a, b),
            Self::NameDesc => compare_names(b, a),
            Self::NutritionAsc => grade_key(a).cmp(&grade_key(b)),
            Self::NutritionDesc => grade_key(b).cmp(&grade_key(a)),
            Self::CaloriesLowHigh => calorie_key(a).total_cmp(&calorie_key(b)),
            Self::CaloriesHighLow => calorie_key(b).total_cmp(&calorie_key(a)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            other => Self::ALL
                .into_iter()
                .find(|key| key.as_str() == other)
                .ok_or_else(|| {
                    let valid: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                    format!("unknown sort key \"{other}\" (expected one of: {})", valid.join(", "))
                }),
        }
    }
}

/// Applies `criteria` and `sort` to `catalog`, returning the derived view.
#[must_use]
pub fn derive_view<'a>(
    catalog: &'a [Product],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<&'a Product> {
    derive_indices(catalog, criteria, sort)
        .into_iter()
        .map(|idx| &catalog[idx])
        .collect()
}

/// Same as [`derive_view`] but yields positions in `catalog`, for callers
/// that own the catalog and cache the derived view alongside it.
#[must_use]
pub fn derive_indices(catalog: &[Product], criteria: &FilterCriteria, sort: SortKey) -> Vec<usize> {
    if criteria.is_unfiltered() {
        let mut indices: Vec<usize> = (0..catalog.len()).collect();
        sort_indices(&mut indices, catalog, sort);
        return indices;
    }

    let needle = criteria.search.trim().to_lowercase();
    let categories: Vec<String> = criteria
        .categories
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut indices: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_search(p, &needle))
        .filter(|(_, p)| matches_categories(p, &categories))
        .filter(|(_, p)| matches_sugar(p, criteria.sugar_ceiling))
        .map(|(idx, _)| idx)
        .collect();

    sort_indices(&mut indices, catalog, sort);
    indices
}

fn sort_indices(indices: &mut [usize], catalog: &[Product], sort: SortKey) {
    if sort != SortKey::None {
        // `sort_by` is stable: ties keep catalog order in both directions.
        indices.sort_by(|&a, &b| sort.compare(&catalog[a], &catalog[b]));
    }
}

/// `needle` must already be trimmed and lower-cased.
fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product
        .name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// `selected` must already be lower-cased.
fn matches_categories(product: &Product, selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    let Some(text) = product.categories.as_deref() else {
        return false;
    };
    let text = text.to_lowercase();
    selected.iter().any(|c| text.contains(c.as_str()))
}

/// A missing sugar value never passes a ceiling.
fn matches_sugar(product: &Product, ceiling: Option<f64>) -> bool {
    match ceiling {
        None => true,
        Some(limit) => product.sugars().is_some_and(|sugar| sugar < limit),
    }
}

/// Collation in three levels: base letters (accents and case ignored), then
/// accents, then case. So `"Éclair" < "Fromage"`, `"eclair" < "éclair"`, and
/// equal names still have a deterministic order.
fn compare_names(a: &Product, b: &Product) -> Ordering {
    let a = a.name.as_deref().unwrap_or("");
    let b = b.name.as_deref().unwrap_or("");
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_decomposed(a).cmp(lowercase_decomposed(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    lowercase_decomposed(name).filter(|c| !is_combining_mark(*c))
}

/// NFD keeps an accent as a separate combining mark after its base letter.
fn lowercase_decomposed(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn grade_key(product: &Product) -> NutritionGrade {
    product.nutrition_grade.unwrap_or(NutritionGrade::WORST)
}

fn calorie_key(product: &Product) -> f64 {
    product.calories().unwrap_or(0.0)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
