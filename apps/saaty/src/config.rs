//! # Configuration
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. `saaty.toml` (or the file given with `--config`)
//! 2. `SAATY_*` environment variables
//! 3. CLI flags
//!
//! ```toml
//! [criteria]
//! min = 2
//! max = 15
//!
//! [storage]
//! database = "saaty.db"   # ":memory:" keeps rows in memory only
//! sheet = "responses"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [report]
//! locale = "es"
//! ```
//!
//! `SAATY_API_KEY`, `SAATY_RATE_LIMIT` and `SAATY_CORS_ORIGINS` are read by
//! the HTTP layer directly.

use saaty_core::{
    CriteriaBounds, Locale, SaatyError, SheetBackend, SheetId,
    primitives::{DEFAULT_SHEET, MAX_CRITERIA, MIN_CRITERIA},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "saaty.toml";

/// Database path that selects the volatile backend.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is {size} bytes (maximum {max})", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("Cannot render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SaatyError),
}

// =============================================================================
// SECTIONS
// =============================================================================

/// `[criteria]`: how many criteria a questionnaire may have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CriteriaSection {
    pub min: usize,
    pub max: usize,
}

impl Default for CriteriaSection {
    fn default() -> Self {
        Self {
            min: MIN_CRITERIA,
            max: MAX_CRITERIA,
        }
    }
}

/// `[storage]`: where submissions are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub database: PathBuf,
    pub sheet: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            database: PathBuf::from("saaty.db"),
            sheet: DEFAULT_SHEET.to_string(),
        }
    }
}

/// `[server]`: HTTP bind address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// `[report]`: presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub locale: Locale,
}

// =============================================================================
// CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub criteria: CriteriaSection,
    pub storage: StorageSection,
    pub server: ServerSection,
    pub report: ReportSection,
}

impl Config {
    /// Load the file layer and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `saaty.toml` in the working
    /// directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let read_error = |source: std::io::Error| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(read_error)?.len();
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: MAX_CONFIG_FILE_SIZE,
            });
        }

        let text = std::fs::read_to_string(path).map_err(read_error)?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text. Missing sections and fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Render as TOML, in the same layout the file is read in.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply `SAATY_DATABASE`, `SAATY_SHEET` and `SAATY_LOCALE` through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = lookup("SAATY_DATABASE").filter(|v| !v.is_empty()) {
            self.storage.database = PathBuf::from(database);
        }
        if let Some(sheet) = lookup("SAATY_SHEET").filter(|v| !v.is_empty()) {
            self.storage.sheet = sheet;
        }
        if let Some(locale) = lookup("SAATY_LOCALE").filter(|v| !v.is_empty()) {
            self.report.locale = locale.parse().map_err(|_| ConfigError::Env {
                var: "SAATY_LOCALE",
                value: locale,
            })?;
        }
        Ok(())
    }

    /// Check values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        if self.storage.sheet.trim().is_empty() {
            return Err(SaatyError::MissingField("storage.sheet").into());
        }
        Ok(())
    }

    /// The configured criteria-count bounds.
    pub fn bounds(&self) -> Result<CriteriaBounds, SaatyError> {
        CriteriaBounds::new(self.criteria.min, self.criteria.max)
    }

    /// The sheet rows are appended to.
    pub fn sheet(&self) -> SheetId {
        SheetId::new(self.storage.sheet.trim())
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether rows are kept in memory only.
    pub fn is_memory_database(&self) -> bool {
        self.storage.database.as_os_str() == MEMORY_DATABASE
    }

    /// Open the configured sheet store.
    pub fn open_store(&self) -> Result<SheetBackend, SaatyError> {
        if self.is_memory_database() {
            Ok(SheetBackend::default())
        } else {
            SheetBackend::with_redb(&self.storage.database)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
