pub mod app_config;
pub mod config;
pub mod filter;
pub mod products;
pub mod theme;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{derive_indices, derive_view, FilterCriteria, SortKey, DEFAULT_CATEGORIES};
pub use products::{Nutriments, NutritionGrade, Product};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore, Theme,
    ThemePreference,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
