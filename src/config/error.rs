//! Configuration error types for settings loading and validation.

use thiserror::Error;

/// Errors raised while loading or validating [`Settings`](super::Settings)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Failed to load settings from {source_name}: {message}")]
    Load {
        source_name: String,
        message: String,
    },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    pub fn load_error(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Load {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;
