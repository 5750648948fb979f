use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nutrient key for energy per 100g, in kilocalories.
pub const ENERGY_KCAL: &str = "energy_kcal";
pub const FAT_100G: &str = "fat_100g";
pub const CARBOHYDRATES_100G: &str = "carbohydrates_100g";
pub const PROTEINS_100G: &str = "proteins_100g";
pub const SUGARS_100G: &str = "sugars_100g";

/// A food product from the catalog, normalized from the upstream record.
///
/// Only `code` is guaranteed. Every other field is optional and the
/// presentation layer renders a placeholder when it is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream barcode / identifier, e.g. `"3017620422003"`.
    pub code: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    /// Free-text, comma-delimited category list, e.g. `"Beverages, Sodas"`.
    pub categories: Option<String>,
    pub ingredients: Option<String>,
    pub nutrition_grade: Option<NutritionGrade>,
    #[serde(default)]
    pub nutriments: Nutriments,
    pub image_url: Option<String>,
    /// Human-readable label text as the source sends it, e.g. `"Organic, Vegan"`.
    pub labels: Option<String>,
    /// Machine label tags, e.g. `["en:organic", "en:vegan"]`.
    #[serde(default)]
    pub label_tags: Vec<String>,
}

impl Product {
    /// Creates a product with only its identifier set.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Energy per 100g in kcal, if the source reported it.
    #[must_use]
    pub fn calories(&self) -> Option<f64> {
        self.nutriments.get(ENERGY_KCAL)
    }

    /// Sugars per 100g in grams, if the source reported it.
    #[must_use]
    pub fn sugars(&self) -> Option<f64> {
        self.nutriments.get(SUGARS_100G)
    }

    /// Labels for display: the label text if present, otherwise the tags
    /// joined with `", "`. `None` when neither is available.
    #[must_use]
    pub fn labels_display(&self) -> Option<String> {
        if let Some(labels) = &self.labels {
            return Some(labels.clone());
        }
        if self.label_tags.is_empty() {
            None
        } else {
            Some(self.label_tags.join(", "))
        }
    }
}

/// Nutrient measurements keyed by nutrient name (`energy_kcal`, `sugars_100g`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nutriments(BTreeMap<String, f64>);

impl Nutriments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for Nutriments {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Nutri-Score style grade. `A` is best, `E` is worst.
///
/// Variant order is the sort order, so `A < B < ... < E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionGrade {
    A,
    B,
    C,
    D,
    E,
}

impl NutritionGrade {
    /// The grade used when a product has none: the worst one.
    pub const WORST: Self = Self::E;

    /// Parses a grade letter, case-insensitively. Anything else (including
    /// upstream sentinels like `"unknown"` or `"not-applicable"`) is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            "d" => Some(Self::D),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl std::fmt::Display for NutritionGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_parse_is_case_insensitive() {
        assert_eq!(NutritionGrade::parse("a"), Some(NutritionGrade::A));
        assert_eq!(NutritionGrade::parse("E"), Some(NutritionGrade::E));
        assert_eq!(NutritionGrade::parse(" c "), Some(NutritionGrade::C));
    }

    #[test]
    fn grade_parse_rejects_sentinels() {
        assert_eq!(NutritionGrade::parse("unknown"), None);
        assert_eq!(NutritionGrade::parse("not-applicable"), None);
        assert_eq!(NutritionGrade::parse(""), None);
    }

    #[test]
    fn grades_order_best_to_worst() {
        assert!(NutritionGrade::A < NutritionGrade::B);
        assert!(NutritionGrade::D < NutritionGrade::WORST);
    }

    #[test]
    fn calories_and_sugars_read_from_nutriments() {
        let mut product = Product::new("1");
        product.nutriments.insert(ENERGY_KCAL, 150.0);
        product.nutriments.insert(SUGARS_100G, 10.5);
        assert_eq!(product.calories(), Some(150.0));
        assert_eq!(product.sugars(), Some(10.5));
        assert_eq!(Product::new("2").calories(), None);
    }

    #[test]
    fn labels_display_prefers_label_text() {
        let mut product = Product::new("1");
        product.labels = Some("Organic".to_owned());
        product.label_tags = vec!["en:vegan".to_owned()];
        assert_eq!(product.labels_display().as_deref(), Some("Organic"));
    }

    #[test]
    fn labels_display_falls_back_to_joined_tags() {
        let mut product = Product::new("1");
        product.label_tags = vec!["en:organic".to_owned(), "en:vegan".to_owned()];
        assert_eq!(
            product.labels_display().as_deref(),
            Some("en:organic, en:vegan")
        );
        assert!(Product::new("2").labels_display().is_none());
    }

    #[test]
    fn nutriments_serialize_as_plain_map() {
        let mut nutriments = Nutriments::new();
        nutriments.insert(FAT_100G, 3.5);
        let json = serde_json::to_value(&nutriments).unwrap();
        assert_eq!(json, serde_json::json!({ "fat_100g": 3.5 }));
    }
}
