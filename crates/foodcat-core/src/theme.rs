//! Light/dark theme preference, persisted as a single key/value pair.
//!
//! The preference is read once at startup and written on every toggle.
//! Storage sits behind [`PreferenceStore`] so the toggle logic can be tested
//! against [`MemoryPreferenceStore`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(PreferenceError::InvalidTheme(other.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid theme \"{0}\" (expected \"light\" or \"dark\")")]
    InvalidTheme(String),
}

/// Backing storage for the theme preference.
pub trait PreferenceStore {
    /// Returns the stored theme, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the store exists but cannot be read.
    fn load(&self) -> Result<Option<Theme>, PreferenceError>;

    /// Persists `theme`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the store cannot be written.
    fn save(&self, theme: Theme) -> Result<(), PreferenceError>;
}

/// On-disk layout of the preference file: `{"theme": "dark"}`.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    theme: String,
}

/// Stores the preference as a small JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<Theme>, PreferenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        let file: PreferenceFile =
            serde_json::from_str(&raw).map_err(|source| PreferenceError::Json {
                path: self.path.clone(),
                source,
            })?;
        file.theme.parse().map(Some)
    }

    fn save(&self, theme: Theme) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string_pretty(&PreferenceFile {
            theme: theme.as_str().to_owned(),
        })
        .map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|e| self.io_err(e))
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            value: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<Theme>, PreferenceError> {
        Ok(*self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    fn save(&self, theme: Theme) -> Result<(), PreferenceError> {
        *self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(theme);
        Ok(())
    }
}

/// The current theme plus the store it persists to.
pub struct ThemePreference<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Reads the stored theme. Unset defaults to [`Theme::Light`]; an
    /// unreadable store is logged and also falls back to light.
    pub fn load(store: S) -> Self {
        let current = match store.load() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "could not read theme preference; using light");
                Theme::default()
            }
        };
        Self { store, current }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and writes it to the store.
    ///
    /// The in-memory value only changes once the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the store rejects the write.
    pub fn toggle_and_persist(&mut self) -> Result<Theme, PreferenceError> {
        let next = self.current.toggled();
        self.store.save(next)?;
        tracing::debug!(theme = %next, "theme preference saved");
        self.current = next;
        Ok(next)
    }
}
