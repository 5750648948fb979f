//! Plain-text rendering of the catalog and detail views.
//!
//! Every absent product field prints a placeholder. Headings are styled with
//! ANSI escapes chosen by the active theme, only when writing to a terminal.

use std::fmt::{self, Display, Formatter};
use std::io::IsTerminal;

use foodcat_core::products::{CARBOHYDRATES_100G, ENERGY_KCAL, FAT_100G, PROTEINS_100G};
use foodcat_core::{Product, Theme, DEFAULT_CATEGORIES};

use crate::views::{CatalogView, DetailStatus, DetailView, Listing, LOADING_PRODUCTS};

const CARD_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/150";
const DETAIL_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/300";
const UNKNOWN_PRODUCT: &str = "Unknown Product";
const NOT_AVAILABLE: &str = "Not Available";
const NO_VALUE: &str = "N/A";

/// Label of the control that switches to the other theme.
#[must_use]
pub fn toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "☀ Light Mode",
        Theme::Light => "🌙 Dark Mode",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Style {
    theme: Theme,
    ansi: bool,
}

impl Style {
    #[must_use]
    pub fn new(theme: Theme, ansi: bool) -> Self {
        Self { theme, ansi }
    }

    /// Styles headings only if stdout is a terminal.
    #[must_use]
    pub fn for_stdout(theme: Theme) -> Self {
        Self::new(theme, std::io::stdout().is_terminal())
    }

    fn heading(self, f: &mut Formatter<'_>, text: &str) -> fmt::Result {
        if !self.ansi {
            return f.write_str(text);
        }
        let code = match self.theme {
            Theme::Light => "1;34",
            Theme::Dark => "1;93",
        };
        write!(f, "\x1b[{code}m{text}\x1b[0m")
    }
}

/// The listing page: controls summary followed by the product grid.
pub struct CatalogPage<'a> {
    pub view: &'a CatalogView,
    pub style: Style,
}

impl Display for CatalogPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let criteria = self.view.criteria();

        self.style.heading(f, "OpenFoodFacts Products")?;
        writeln!(f, "  [{}]", toggle_label(self.style.theme))?;

        let search = criteria.search.trim();
        writeln!(
            f,
            "Search: {}",
            if search.is_empty() { "-" } else { search }
        )?;

        f.write_str("Categories:")?;
        let mut shown: Vec<&str> = DEFAULT_CATEGORIES.to_vec();
        shown.extend(
            criteria
                .categories
                .iter()
                .map(String::as_str)
                .filter(|c| !DEFAULT_CATEGORIES.contains(c)),
        );
        for category in shown {
            let mark = if criteria.categories.contains(category) {
                'x'
            } else {
                ' '
            };
            write!(f, " [{mark}] {category}")?;
        }
        writeln!(f)?;

        match criteria.sugar_ceiling {
            Some(ceiling) => writeln!(f, "Sugar (g per 100g): < {ceiling}")?,
            None => writeln!(f, "Sugar (g per 100g): any")?,
        }
        writeln!(f, "Sort: {}", self.view.sort().label())?;
        writeln!(f)?;

        if let Some(message) = self.view.error_message() {
            writeln!(f, "{message}")?;
        }
        if let Some(line) = self.view.status_line() {
            return writeln!(f, "{line}");
        }
        let Listing::Products(products) = self.view.listing() else {
            return Ok(());
        };

        for product in &products {
            write_card(f, self.style, product)?;
            writeln!(f)?;
        }
        writeln!(
            f,
            "{} of {} products",
            products.len(),
            self.view.catalog().len()
        )
    }
}

fn write_card(f: &mut Formatter<'_>, style: Style, product: &Product) -> fmt::Result {
    style.heading(f, product.name.as_deref().unwrap_or(UNKNOWN_PRODUCT))?;
    writeln!(f, " ({})", product.code)?;
    writeln!(
        f,
        "  Image: {}",
        product.image_url.as_deref().unwrap_or(CARD_IMAGE_PLACEHOLDER)
    )?;
    writeln!(f, "  Brand: {}", product.brand.as_deref().unwrap_or("Unknown"))?;
    writeln!(
        f,
        "  Category: {}",
        product.categories.as_deref().unwrap_or(NOT_AVAILABLE)
    )?;
    writeln!(
        f,
        "  Ingredients: {}",
        product.ingredients.as_deref().unwrap_or(NOT_AVAILABLE)
    )?;
    match product.nutrition_grade {
        Some(grade) => writeln!(f, "  Nutrition Grade: {grade}")?,
        None => writeln!(f, "  Nutrition Grade: {NOT_AVAILABLE}")?,
    }
    writeln!(f, "  Calories: {}", quantity(product.calories(), "kcal"))
}

/// The single-product page. Not-found and error states print only their
/// message.
pub struct DetailPage<'a> {
    pub view: &'a DetailView,
    pub style: Style,
}

impl Display for DetailPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.view.status() {
            DetailStatus::Idle => Ok(()),
            DetailStatus::Loading => writeln!(f, "{LOADING_PRODUCTS}"),
            DetailStatus::NotFound | DetailStatus::Error(_) => {
                writeln!(f, "{}", self.view.message().unwrap_or_default())
            }
            DetailStatus::Ready(product) => write_detail(f, self.style, product),
        }
    }
}

fn write_detail(f: &mut Formatter<'_>, style: Style, product: &Product) -> fmt::Result {
    style.heading(f, product.name.as_deref().unwrap_or(UNKNOWN_PRODUCT))?;
    writeln!(f)?;
    writeln!(f, "Code: {}", product.code)?;
    writeln!(f, "Brand: {}", product.brand.as_deref().unwrap_or("Unknown"))?;
    writeln!(
        f,
        "Image: {}",
        product
            .image_url
            .as_deref()
            .unwrap_or(DETAIL_IMAGE_PLACEHOLDER)
    )?;
    writeln!(f)?;

    style.heading(f, "Ingredients")?;
    writeln!(f)?;
    writeln!(
        f,
        "{}",
        product
            .ingredients
            .as_deref()
            .unwrap_or("No ingredients available.")
    )?;
    writeln!(f)?;

    style.heading(f, "Nutritional Values")?;
    writeln!(f)?;
    let nutriments = &product.nutriments;
    writeln!(
        f,
        "  Energy: {}",
        quantity(nutriments.get(ENERGY_KCAL), "kcal")
    )?;
    writeln!(f, "  Fat: {}", quantity(nutriments.get(FAT_100G), "g"))?;
    writeln!(
        f,
        "  Carbohydrates: {}",
        quantity(nutriments.get(CARBOHYDRATES_100G), "g")
    )?;
    writeln!(
        f,
        "  Proteins: {}",
        quantity(nutriments.get(PROTEINS_100G), "g")
    )?;
    writeln!(f)?;

    style.heading(f, "Labels & Tags")?;
    writeln!(f)?;
    writeln!(
        f,
        "{}",
        product
            .labels_display()
            .as_deref()
            .unwrap_or("No labels available.")
    )
}

fn quantity(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value} {unit}"),
        None => NO_VALUE.to_owned(),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
