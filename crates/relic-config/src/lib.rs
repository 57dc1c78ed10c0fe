//! # relic-config
//!
//! Layered configuration loading for relic using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RELIC_*` prefix, `__` as separator)
//! 2. Project-level `.relic/config.toml`
//! 3. User-level `~/.config/relic/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RELIC_GENERAL__NUM_PACKAGES` -> `general.num_packages`,
//! `RELIC_REGISTRY__TIMEOUT_SECS` -> `registry.timeout_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use relic_config::RelicConfig;
//!
//! let config = RelicConfig::load_with_dotenv().expect("config");
//! println!("listing top {} packages", config.general.num_packages);
//! ```

mod classify;
mod error;
mod general;
mod registry;

pub use classify::ClassifyConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use registry::{DEFAULT_GITHUB_URL, DEFAULT_PYPI_URL, DEFAULT_TOP_URL, RegistryConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RelicConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
}

impl RelicConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect it or stack extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".relic/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("RELIC_").split("__"))
    }

    /// Reject values no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("registry.top_url", &self.registry.top_url),
            ("registry.pypi_url", &self.registry.pypi_url),
            ("registry.github_url", &self.registry.github_url),
        ];
        for (field, value) in urls {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("expected an http(s) URL, got '{value}'"),
                });
            }
        }

        if self.registry.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relic").join("config.toml"))
    }
}
