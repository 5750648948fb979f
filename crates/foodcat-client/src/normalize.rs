//! Normalization from raw Open Food Facts records to [`foodcat_core::Product`].

use foodcat_core::products::ENERGY_KCAL;
use foodcat_core::{Nutriments, NutritionGrade, Product};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::types::OffProduct;

/// Per-100g variant of [`ENERGY_KCAL`], used when the plain key is missing.
const ENERGY_KCAL_100G: &str = "energy_kcal_100g";

/// Normalizes a raw [`OffProduct`] into a [`Product`].
///
/// # Errors
///
/// Returns [`ClientError::Normalization`] if the record has no usable `code`.
/// `context` names where the record came from, for the error message.
pub fn normalize_product(raw: OffProduct, context: &str) -> Result<Product, ClientError> {
    let Some(code) = non_empty(raw.code) else {
        return Err(ClientError::Normalization {
            context: context.to_owned(),
            reason: "record has no code".into(),
        });
    };

    let nutrition_grade = raw
        .nutrition_grades
        .as_deref()
        .and_then(NutritionGrade::parse);

    let nutriments = raw
        .nutriments
        .as_ref()
        .map(normalize_nutriments)
        .unwrap_or_default();

    let label_tags = raw
        .labels_tags
        .unwrap_or_default()
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect();

    Ok(Product {
        code,
        name: non_empty(raw.product_name),
        brand: non_empty(raw.brands),
        categories: non_empty(raw.categories),
        ingredients: non_empty(raw.ingredients_text),
        nutrition_grade,
        nutriments,
        image_url: non_empty(raw.image_url),
        labels: non_empty(raw.labels),
        label_tags,
    })
}

/// Converts the raw `nutriments` object into numeric measurements.
///
/// - Hyphens in keys become underscores (`energy-kcal` → `energy_kcal`).
///   When both spellings exist the underscore one wins.
/// - Numbers are kept; numeric strings are parsed; everything else
///   (unit strings, `null`, non-finite values) is dropped.
/// - `energy_kcal` falls back to `energy_kcal_100g` when absent.
#[must_use]
pub fn normalize_nutriments(raw: &Map<String, Value>) -> Nutriments {
    let mut nutriments = Nutriments::new();

    for (key, value) in raw {
        let Some(number) = numeric(value) else {
            continue;
        };
        if key.contains('-') {
            let normalized = key.replace('-', "_");
            if nutriments.get(&normalized).is_none() {
                nutriments.insert(normalized, number);
            }
        } else {
            nutriments.insert(key.clone(), number);
        }
    }

    if nutriments.get(ENERGY_KCAL).is_none() {
        if let Some(per_100g) = nutriments.get(ENERGY_KCAL_100G) {
            nutriments.insert(ENERGY_KCAL, per_100g);
        }
    }

    nutriments
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Treats empty or whitespace-only strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
