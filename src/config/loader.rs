//! Settings Loader
//!
//! Environment-aware settings loading. Sources are layered with the `config` crate:
//! defaults, then `components.*` and `components.<environment>.*` from the settings
//! directory, then `COMPONENTS__*` environment variables.

use super::error::{ConfigResult, ConfigurationError};
use super::{Settings, DEFAULT_IDENTIFIER_FIELD};
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const SETTINGS_BASENAME: &str = "components";
const ENV_PREFIX: &str = "COMPONENTS";

/// Loaded settings together with the context they were loaded from
#[derive(Debug)]
pub struct SettingsLoader {
    settings: Settings,
    environment: String,
    config_directory: PathBuf,
}

impl SettingsLoader {
    /// Load settings with environment auto-detection
    pub fn load() -> ConfigResult<Arc<SettingsLoader>> {
        Self::load_from_directory(None)
    }

    /// Load settings from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<SettingsLoader>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load settings from a specific directory with explicit environment,
    /// reading overrides from the process environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<SettingsLoader>> {
        Self::load_with_overrides(config_dir, environment, None)
    }

    /// Load settings with an explicit override map standing in for the process
    /// environment. Keys use the `COMPONENTS__FIELD` form.
    pub fn load_with_overrides(
        config_dir: Option<PathBuf>,
        environment: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<SettingsLoader>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            "Loading settings for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let settings = Self::build_settings(&config_directory, environment, overrides)?;
        settings.validate()?;

        debug!(
            "Settings loaded successfully: {}",
            serde_json::to_string_pretty(&settings)
                .unwrap_or_else(|_| "[serialization error]".to_string())
        );

        Ok(Arc::new(SettingsLoader {
            settings,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    fn build_settings(
        config_directory: &Path,
        environment: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Settings> {
        let base = config_directory.join(SETTINGS_BASENAME);
        let overlay = config_directory.join(format!("{SETTINGS_BASENAME}.{environment}"));

        let environment_source = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("installed_components")
            .try_parsing(true)
            .source(overrides);

        let config = Config::builder()
            .set_default("default_identifier_field", DEFAULT_IDENTIFIER_FIELD)
            .map_err(|e| ConfigurationError::load_error("defaults", e))?
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(environment_source)
            .build()
            .map_err(|e| ConfigurationError::load_error(config_directory.display().to_string(), e))?;

        config
            .try_deserialize::<Settings>()
            .map_err(|e| ConfigurationError::load_error(config_directory.display().to_string(), e))
    }

    /// Get the loaded settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the environment the settings were loaded for
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the settings directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect current environment: COMPONENTS_ENV || APP_ENV || 'development'
    pub fn detect_environment() -> String {
        env::var("COMPONENTS_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }
}
