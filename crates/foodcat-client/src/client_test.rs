use super::*;

fn client_for(base: &str) -> OffClient {
    OffClient::with_base_url(base, 5, "foodcat-test/0.1", 0, 0).unwrap()
}

#[test]
fn search_url_carries_page_size_and_fields() {
    let url = client_for("https://world.openfoodfacts.org").search_url(2, 50);
    assert_eq!(url.path(), "/api/v2/search");
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("page".to_owned(), "2".to_owned()),
            ("page_size".to_owned(), "50".to_owned()),
            ("fields".to_owned(), SEARCH_FIELDS.to_owned()),
        ]
    );
}

#[test]
fn product_url_appends_code_segment() {
    let url = client_for("https://world.openfoodfacts.org/").product_url("3017620422003");
    assert_eq!(
        url.as_str(),
        "https://world.openfoodfacts.org/api/v2/product/3017620422003.json"
    );
}

#[test]
fn product_url_escapes_path_separators_in_code() {
    let url = client_for("https://world.openfoodfacts.org").product_url("../admin");
    assert_eq!(url.path(), "/api/v2/product/..%2Fadmin.json");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let url = client_for("http://localhost:8080/mirror/").search_url(1, 10);
    assert_eq!(url.path(), "/mirror/api/v2/search");
}

#[test]
fn with_base_url_rejects_invalid_url() {
    let result = OffClient::with_base_url("not a url", 5, "foodcat-test/0.1", 0, 0);
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn with_base_url_rejects_non_base_url() {
    let result = OffClient::with_base_url("mailto:someone@example.com", 5, "foodcat-test/0.1", 0, 0);
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn default_client_targets_production_api() {
    let client = OffClient::new(5, "foodcat-test/0.1", 0, 0).unwrap();
    assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
}

#[test]
fn not_found_is_distinguished_from_network_errors() {
    assert!(ClientError::NotFound {
        code: "1".to_owned()
    }
    .is_not_found());
    assert!(!ClientError::RateLimited {
        retry_after_secs: 1
    }
    .is_not_found());
}
