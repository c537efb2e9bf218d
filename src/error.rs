//! # Component Error Types
//!
//! Structured errors for entry resolution, component construction, readiness
//! checks and sub-resource lookups, using thiserror instead of `Box<dyn Error>`.

use crate::config::ConfigurationError;
use crate::registry::readiness::ReadinessStage;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the module catalog while importing a module or a member
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("No module named '{module}'")]
    ModuleNotFound { module: String },

    #[error("Module '{module}' does not define a '{attribute}' attribute")]
    AttributeNotFound { module: String, attribute: String },

    #[error("{path} doesn't look like a module path")]
    InvalidPath { path: String },
}

/// Errors produced while resolving, constructing and querying components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("The component label '{label}' is not a valid identifier.")]
    InvalidLabel { label: String },

    #[error(
        "{module} declares more than one default ComponentConfig: {}",
        quoted(.candidates)
    )]
    AmbiguousDefault {
        module: String,
        candidates: Vec<String>,
    },

    #[error("Module '{module}' does not contain a '{class_name}' class.{}", choices(.candidates))]
    ClassNotFound {
        module: String,
        class_name: String,
        candidates: Vec<String>,
    },

    #[error("'{entry}' isn't a subclass of ComponentConfig.")]
    NotAConfigSubclass { entry: String },

    #[error("'{entry}' must supply a name attribute.")]
    MissingIdentityAttribute { entry: String },

    #[error("Cannot import '{name}'. Check that '{attribute}' is correct.")]
    BadDeclaredIdentity { name: String, attribute: String },

    #[error("{}", unresolvable_location(.module, .locations))]
    UnresolvableLocation {
        module: String,
        locations: Vec<PathBuf>,
    },

    #[error("{}", .stage.not_ready_message())]
    NotReady { stage: ReadinessStage },

    #[error("Component '{label}' doesn't have a '{name}' sub-resource.")]
    SubResourceNotFound { label: String, name: String },

    #[error("No installed component with label '{label}'.")]
    ComponentNotFound { label: String },

    #[error("Component labels aren't unique, duplicates: {label}")]
    DuplicateLabel { label: String },

    #[error("Component names aren't unique, duplicates: {name}")]
    DuplicateName { name: String },

    #[error("Conflicting '{name}' sub-resources in component '{label}'.")]
    ConflictingSubResource { label: String, name: String },

    #[error("populate() isn't reentrant")]
    PopulateReentrant,

    #[error(transparent)]
    Settings(#[from] ConfigurationError),
}

impl ComponentError {
    /// Errors that are fatal to processing a single entry during startup
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::Import(_)
                | Self::InvalidLabel { .. }
                | Self::AmbiguousDefault { .. }
                | Self::ClassNotFound { .. }
                | Self::NotAConfigSubclass { .. }
                | Self::MissingIdentityAttribute { .. }
                | Self::BadDeclaredIdentity { .. }
                | Self::UnresolvableLocation { .. }
        )
    }

    /// Errors a caller may catch and retry once the registry has progressed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotReady { .. } | Self::SubResourceNotFound { .. } | Self::ComponentNotFound { .. }
        )
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn choices(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" Choices are: {}.", quoted(candidates))
    }
}

fn unresolvable_location(module: &str, locations: &[PathBuf]) -> String {
    if locations.is_empty() {
        format!(
            "The component module '{module}' has no filesystem location; \
             you must configure this component with a ComponentConfig that declares a 'path'."
        )
    } else {
        let listed = locations
            .iter()
            .map(|location| location.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "The component module '{module}' has multiple filesystem locations ({listed}); \
             you must configure this component with a ComponentConfig that declares a 'path'."
        )
    }
}

pub type Result<T> = std::result::Result<T, ComponentError>;
