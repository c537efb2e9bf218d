//! # Component Settings
//!
//! Process-wide settings consumed by component resolution and registration.
//!
//! ## Architecture
//!
//! - **Layered sources**: built-in defaults, `config/components.*`, an environment
//!   overlay `config/components.<env>.*` and `COMPONENTS__*` environment variables
//! - **Explicit Validation**: settings are validated before a registry may use them
//!
//! ## Usage
//!
//! ```rust,no_run
//! use component_registry::config::SettingsLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = SettingsLoader::load()?;
//! let field = &loader.settings().default_identifier_field;
//! let entries = &loader.settings().installed_components;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::SettingsLoader;

/// Identifier field strategy used when neither the sub-resource nor its component declare one
pub const DEFAULT_IDENTIFIER_FIELD: &str = "AutoField";

/// Settings read by the registry and by component configs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default identifier field strategy for sub-resources
    #[serde(default = "default_identifier_field")]
    pub default_identifier_field: String,

    /// Entries resolved by `ComponentRegistry::populate_from_settings`, in order
    #[serde(default)]
    pub installed_components: Vec<String>,
}

fn default_identifier_field() -> String {
    DEFAULT_IDENTIFIER_FIELD.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_identifier_field: default_identifier_field(),
            installed_components: Vec::new(),
        }
    }
}

impl Settings {
    /// Settings with the given installed entries and default values elsewhere
    pub fn with_installed<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed_components: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_identifier_field.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "default_identifier_field",
                "",
                "must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.installed_components {
            if entry.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    "installed_components",
                    entry.clone(),
                    "entries must not be empty",
                ));
            }
            if !seen.insert(entry.as_str()) {
                return Err(ConfigurationError::invalid_value(
                    "installed_components",
                    entry.clone(),
                    "entries must be unique",
                ));
            }
        }

        Ok(())
    }
}
