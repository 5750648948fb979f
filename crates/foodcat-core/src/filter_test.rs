use super::*;
use crate::products::{ENERGY_KCAL, SUGARS_100G};

// -----------------------------------------------------------------------
// fixtures
// -----------------------------------------------------------------------

fn product(code: &str, name: Option<&str>) -> Product {
    let mut p = Product::new(code);
    p.name = name.map(str::to_owned);
    p
}

fn drink(code: &str, name: &str, grade: &str, kcal: f64, sugar: f64) -> Product {
    let mut p = product(code, Some(name));
    p.nutrition_grade = NutritionGrade::parse(grade);
    p.nutriments.insert(ENERGY_KCAL, kcal);
    p.nutriments.insert(SUGARS_100G, sugar);
    p
}

fn with_categories(mut p: Product, categories: &str) -> Product {
    p.categories = Some(categories.to_owned());
    p
}

/// Cola (C, 150 kcal, 10g sugar) then Apple Juice (A, 50 kcal, 20g sugar).
fn cola_and_juice() -> Vec<Product> {
    vec![
        drink("1", "Cola", "C", 150.0, 10.0),
        drink("2", "Apple Juice", "A", 50.0, 20.0),
    ]
}

fn codes(view: &[&Product]) -> Vec<String> {
    view.iter().map(|p| p.code.clone()).collect()
}

fn names(view: &[&Product]) -> Vec<String> {
    view.iter()
        .map(|p| p.name.clone().unwrap_or_default())
        .collect()
}

fn mixed_catalog() -> Vec<Product> {
    vec![
        with_categories(drink("1", "Orange Soda", "D", 180.0, 12.0), "Beverages, Sodas"),
        with_categories(drink("2", "greek yogurt", "B", 97.0, 3.6), "Dairy, Yogurts"),
        product("3", None),
        with_categories(drink("4", "Oat Crackers", "A", 430.0, 2.0), "Snacks, Crackers"),
        with_categories(product("5", Some("Frozen Peas")), "Frozen foods, Vegetables"),
        with_categories(drink("6", "Cola", "E", 42.0, 10.6), "Beverages, Sodas"),
    ]
}

// -----------------------------------------------------------------------
// unfiltered
// -----------------------------------------------------------------------

#[test]
fn empty_criteria_returns_full_catalog_in_order() {
    let catalog = mixed_catalog();
    let criteria = FilterCriteria::default();
    assert!(criteria.is_unfiltered());

    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn whitespace_search_is_a_no_op() {
    let catalog = mixed_catalog();
    let criteria = FilterCriteria {
        search: "   ".to_owned(),
        ..FilterCriteria::default()
    };
    assert!(criteria.is_unfiltered());
    assert_eq!(derive_view(&catalog, &criteria, SortKey::None).len(), 6);
}

#[test]
fn unfiltered_criteria_still_sorts() {
    let catalog = vec![
        product("1", Some("cherry")),
        product("2", None),
        product("3", Some("Apple")),
    ];
    let criteria = FilterCriteria::default();
    assert!(criteria.is_unfiltered());
    assert_eq!(derive_indices(&catalog, &criteria, SortKey::NameAsc), vec![1, 2, 0]);
    assert_eq!(derive_indices(&catalog, &criteria, SortKey::NameDesc), vec![0, 2, 1]);
}

#[test]
fn derive_indices_matches_derive_view() {
    let catalog = mixed_catalog();
    let criteria = FilterCriteria {
        search: "o".to_owned(),
        ..FilterCriteria::default()
    };
    let indices = derive_indices(&catalog, &criteria, SortKey::NameAsc);
    let view = derive_view(&catalog, &criteria, SortKey::NameAsc);
    let from_indices: Vec<&Product> = indices.iter().map(|&i| &catalog[i]).collect();
    assert_eq!(from_indices, view);
}

// -----------------------------------------------------------------------
// search
// -----------------------------------------------------------------------

#[test]
fn search_is_case_insensitive_substring() {
    let catalog = mixed_catalog();
    let criteria = FilterCriteria {
        search: "YOG".to_owned(),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2"]);
}

#[test]
fn search_text_is_trimmed_before_matching() {
    let catalog = mixed_catalog();
    let criteria = FilterCriteria {
        search: "  cola ".to_owned(),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["6"]);
}

#[test]
fn search_never_matches_product_without_name() {
    let catalog = vec![product("1", None), product("2", Some("Nameless Bar"))];
    let criteria = FilterCriteria {
        search: "a".to_owned(),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2"]);
}

// -----------------------------------------------------------------------
// categories
// -----------------------------------------------------------------------

#[test]
fn categories_are_or_combined() {
    let catalog = mixed_catalog();
    let mut criteria = FilterCriteria::default();
    criteria.toggle_category("Dairy");
    criteria.toggle_category("Snacks");

    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2", "4"]);
}

#[test]
fn categories_match_as_case_insensitive_substring() {
    let catalog = mixed_catalog();
    let mut criteria = FilterCriteria::default();
    criteria.toggle_category("frozen");

    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["5"]);
}

#[test]
fn categories_drop_products_without_category_text() {
    let catalog = vec![product("1", Some("Mystery")), with_categories(product("2", Some("Milk")), "Dairy")];
    let mut criteria = FilterCriteria::default();
    criteria.toggle_category("Dairy");

    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2"]);
}

#[test]
fn categories_and_search_are_and_combined() {
    let catalog = mixed_catalog();
    let mut criteria = FilterCriteria {
        search: "cola".to_owned(),
        ..FilterCriteria::default()
    };
    criteria.toggle_category("Beverages");

    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["6"]);
}

#[test]
fn toggle_category_twice_restores_set_and_view() {
    let catalog = mixed_catalog();
    let mut criteria = FilterCriteria {
        search: "o".to_owned(),
        ..FilterCriteria::default()
    };
    criteria.toggle_category("Snacks");
    let original = criteria.clone();
    let before = codes(&derive_view(&catalog, &criteria, SortKey::NameAsc));

    assert!(criteria.toggle_category("Dairy"));
    assert!(!criteria.toggle_category("Dairy"));

    assert_eq!(criteria, original);
    assert_eq!(codes(&derive_view(&catalog, &criteria, SortKey::NameAsc)), before);
}

#[test]
fn toggle_category_reports_selection() {
    let mut criteria = FilterCriteria::default();
    assert!(criteria.toggle_category("Bakery"));
    assert!(criteria.categories.contains("Bakery"));
    assert!(!criteria.toggle_category("Bakery"));
    assert!(criteria.categories.is_empty());
}

// -----------------------------------------------------------------------
// sugar ceiling
// -----------------------------------------------------------------------

#[test]
fn sugar_ceiling_keeps_products_below_limit() {
    let catalog = cola_and_juice();
    let criteria = FilterCriteria {
        sugar_ceiling: Some(15.0),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(names(&view), vec!["Cola"]);
}

#[test]
fn sugar_ceiling_is_strict() {
    let catalog = vec![drink("1", "Exact", "B", 10.0, 15.0), drink("2", "Under", "B", 10.0, 14.99)];
    let criteria = FilterCriteria {
        sugar_ceiling: Some(15.0),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2"]);
}

#[test]
fn sugar_ceiling_excludes_missing_sugar() {
    let catalog = vec![product("1", Some("No Data")), drink("2", "Water", "A", 0.0, 0.0)];
    let criteria = FilterCriteria {
        sugar_ceiling: Some(1_000.0),
        ..FilterCriteria::default()
    };
    let view = derive_view(&catalog, &criteria, SortKey::None);
    assert_eq!(codes(&view), vec!["2"]);
}

// -----------------------------------------------------------------------
// sorting
// -----------------------------------------------------------------------

#[test]
fn calories_low_high_orders_ascending() {
    let catalog = cola_and_juice();
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::CaloriesLowHigh);
    assert_eq!(names(&view), vec!["Apple Juice", "Cola"]);
}

#[test]
fn calories_high_low_treats_missing_as_zero() {
    let catalog = vec![
        product("1", Some("Unknown Energy")),
        drink("2", "Light", "A", 5.0, 0.0),
        drink("3", "Heavy", "E", 500.0, 0.0),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::CaloriesHighLow);
    assert_eq!(codes(&view), vec!["3", "2", "1"]);
}

#[test]
fn nutrition_asc_puts_missing_grade_with_e() {
    let catalog = vec![
        drink("1", "Worst", "E", 0.0, 0.0),
        product("2", Some("Ungraded")),
        drink("3", "Best", "A", 0.0, 0.0),
        drink("4", "Middle", "C", 0.0, 0.0),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NutritionAsc);
    // "1" and "2" tie on E and keep catalog order.
    assert_eq!(codes(&view), vec!["3", "4", "1", "2"]);
}

#[test]
fn nutrition_desc_keeps_ties_in_catalog_order() {
    let catalog = vec![
        drink("1", "Worst", "E", 0.0, 0.0),
        drink("2", "Best", "A", 0.0, 0.0),
        product("3", Some("Ungraded")),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NutritionDesc);
    assert_eq!(codes(&view), vec!["1", "3", "2"]);
}

#[test]
fn name_asc_first_entry_is_smallest() {
    let catalog = mixed_catalog();
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NameAsc);
    let first = &view[0];
    for other in &view {
        assert_ne!(
            SortKey::NameAsc.compare(first, other),
            Ordering::Greater,
            "{:?} sorted before {:?}",
            first.name,
            other.name
        );
    }
    // The nameless product compares as "" and comes first.
    assert_eq!(first.code, "3");
}

#[test]
fn name_sort_ignores_case_before_byte_order() {
    let catalog = vec![
        product("1", Some("banana")),
        product("2", Some("Apple")),
        product("3", Some("cherry")),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NameAsc);
    assert_eq!(names(&view), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn name_sort_places_accented_initials_with_their_base_letter() {
    let catalog = vec![
        product("1", Some("Zeste")),
        product("2", Some("Éclair")),
        product("3", Some("Fromage")),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NameAsc);
    assert_eq!(names(&view), vec!["Éclair", "Fromage", "Zeste"]);

    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NameDesc);
    assert_eq!(names(&view), vec!["Zeste", "Fromage", "Éclair"]);
}

#[test]
fn name_sort_breaks_accent_ties_unaccented_first() {
    let catalog = vec![
        product("1", Some("Pâte")),
        product("2", Some("pate")),
        product("3", Some("Pate")),
        product("4", Some("Pomme")),
    ];
    let view = derive_view(&catalog, &FilterCriteria::default(), SortKey::NameAsc);
    assert_eq!(names(&view), vec!["Pate", "pate", "Pâte", "Pomme"]);
}

#[test]
fn name_desc_reverses_name_asc() {
    let catalog = mixed_catalog();
    let asc = codes(&derive_view(&catalog, &FilterCriteria::default(), SortKey::NameAsc));
    let mut desc = codes(&derive_view(&catalog, &FilterCriteria::default(), SortKey::NameDesc));
    desc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn sorting_does_not_mutate_catalog() {
    let catalog = mixed_catalog();
    let snapshot = catalog.clone();
    let _ = derive_view(&catalog, &FilterCriteria::default(), SortKey::CaloriesHighLow);
    assert_eq!(catalog, snapshot);
}

// -----------------------------------------------------------------------
// SortKey parsing
// -----------------------------------------------------------------------

#[test]
fn sort_key_parses_option_values() {
    assert_eq!("name_asc".parse::<SortKey>().unwrap(), SortKey::NameAsc);
    assert_eq!(
        "calories_high_low".parse::<SortKey>().unwrap(),
        SortKey::CaloriesHighLow
    );
    assert_eq!("".parse::<SortKey>().unwrap(), SortKey::None);
    assert_eq!("none".parse::<SortKey>().unwrap(), SortKey::None);
}

#[test]
fn sort_key_rejects_unknown_value() {
    let err = "price_asc".parse::<SortKey>().unwrap_err();
    assert!(err.contains("price_asc"), "unexpected message: {err}");
    assert!(err.contains("nutrition_desc"), "unexpected message: {err}");
}

#[test]
fn sort_key_display_round_trips() {
    for key in SortKey::ALL {
        assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
    }
}
