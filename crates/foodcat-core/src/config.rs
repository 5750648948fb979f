use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment is valid.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("FOODCAT_LOG_LEVEL", "info");

    let api_base_url = or_default("FOODCAT_API_BASE_URL", "https://world.openfoodfacts.org");
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(invalid(
            "FOODCAT_API_BASE_URL",
            format!("\"{api_base_url}\" is not an http(s) URL"),
        ));
    }

    let request_timeout_secs = parse_u64("FOODCAT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "FOODCAT_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("FOODCAT_USER_AGENT", "foodcat/0.1 (catalog-viewer)");
    let catalog_target_count = parse_usize("FOODCAT_CATALOG_TARGET_COUNT", "200")?;

    let catalog_page_size = parse_u32("FOODCAT_CATALOG_PAGE_SIZE", "50")?;
    if catalog_page_size == 0 {
        return Err(invalid(
            "FOODCAT_CATALOG_PAGE_SIZE",
            "must be greater than zero".to_string(),
        ));
    }

    let inter_request_delay_ms = parse_u64("FOODCAT_INTER_REQUEST_DELAY_MS", "0")?;
    let max_retries = parse_u32("FOODCAT_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("FOODCAT_RETRY_BACKOFF_BASE_MS", "1000")?;
    let prefs_path = PathBuf::from(or_default(
        "FOODCAT_PREFS_PATH",
        "./.foodcat/preferences.json",
    ));

    Ok(AppConfig {
        log_level,
        api_base_url,
        request_timeout_secs,
        user_agent,
        catalog_target_count,
        catalog_page_size,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_ms,
        prefs_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
