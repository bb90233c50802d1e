//! Configuration management for the catalog pipeline
//!
//! Handles loading, environment overrides, profile application and
//! validation of the TOML configuration file.

use crate::error::{CatalogError, Result};
use crate::filtering::SortSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Schema version understood by this build
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub pagination: PaginationConfig,
    pub filters: FiltersConfig,
    pub sorting: SortingConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileOverrides>,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Page size settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

/// Price slider bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub price_min: f64,
    pub price_max: f64,
}

/// Default ordering, as a sort dropdown value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortingConfig {
    pub default_sort: String,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub default_format: String,
}

/// Per-listing overrides (shop, wishlist, admin orders, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| CatalogError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Load configuration with a specific profile applied
    pub fn load_with_profile(path: &Path, profile: &str) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_profile(profile)?;
        Ok(config)
    }

    /// Built-in defaults with `CATALOG_*` overrides, validated like a loaded file
    pub fn from_overrides<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        config.apply_overrides(vars);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Effective configuration for a command
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when present, otherwise built-in defaults plus environment overrides.
    pub fn resolve(path: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(Self::default_path()?).filter(|p| p.exists()),
        };

        match (path, profile) {
            (Some(path), Some(profile)) => Self::load_with_profile(&path, profile),
            (Some(path), None) => Self::load(&path),
            (None, profile) => {
                tracing::debug!("No config file found, using defaults");
                let mut config = Self::from_overrides(std::env::vars())?;
                if let Some(profile) = profile {
                    config.apply_profile(profile)?;
                }
                Ok(config)
            }
        }
    }

    /// Apply a profile's overrides to the configuration
    pub fn apply_profile(&mut self, profile: &str) -> Result<()> {
        let overrides = self
            .profiles
            .get(profile)
            .cloned()
            .ok_or_else(|| CatalogError::Config(format!("Unknown profile: {}", profile)))?;

        if let Some(page_size) = overrides.page_size {
            self.pagination.default_page_size = page_size;
        }
        if let Some(sort) = overrides.default_sort {
            self.sorting.default_sort = sort;
        }
        if let Some(price_max) = overrides.price_max {
            self.filters.price_max = price_max;
        }

        ConfigValidator::validate(self)
    }

    /// Apply environment variable overrides
    /// Environment variables in format: CATALOG_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    /// Apply overrides from `(name, value)` pairs; names without the prefix are ignored
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(config_key) = key.strip_prefix("CATALOG_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "PAGINATION__DEFAULT_PAGE_SIZE" => {
                self.pagination.default_page_size = parse_value(path, value)?;
            }
            "PAGINATION__MAX_PAGE_SIZE" => {
                self.pagination.max_page_size = parse_value(path, value)?;
            }
            "FILTERS__PRICE_MIN" => {
                self.filters.price_min = parse_value(path, value)?;
            }
            "FILTERS__PRICE_MAX" => {
                self.filters.price_max = parse_value(path, value)?;
            }
            "SORTING__DEFAULT_SORT" => {
                self.sorting.default_sort = value.to_string();
            }
            "EXPORT__DEFAULT_FORMAT" => {
                self.export.default_format = value.to_string();
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Configured default ordering
    pub fn default_sort(&self) -> SortSpec {
        SortSpec::parse(&self.sorting.default_sort)
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CatalogError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("storefront-catalog").join("config.toml"))
    }
}

fn parse_value<T: std::str::FromStr>(path: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::InvalidConfigValue {
            path: path.to_string(),
            message: format!("Cannot parse '{}'", value),
        })
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "admin".to_string(),
            ProfileOverrides {
                page_size: Some(10),
                default_sort: Some("newest".to_string()),
                price_max: Some(10_000.0),
            },
        );
        profiles.insert(
            "wishlist".to_string(),
            ProfileOverrides {
                page_size: Some(24),
                default_sort: Some("recent".to_string()),
                price_max: None,
            },
        );

        Self {
            meta: MetaConfig {
                schema_version: SCHEMA_VERSION.to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            pagination: PaginationConfig {
                default_page_size: 12,
                max_page_size: 100,
            },
            filters: FiltersConfig {
                price_min: 0.0,
                price_max: 200.0,
            },
            sorting: SortingConfig {
                default_sort: "featured".to_string(),
            },
            export: ExportConfig {
                default_format: "csv".to_string(),
            },
            profiles,
        }
    }
}
