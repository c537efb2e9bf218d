#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Component Registry
//!
//! Discovery, resolution and staged registration of pluggable components.
//!
//! ## Overview
//!
//! A host application names its components with short *entry* strings. Each
//! entry resolves to exactly one configuration object describing the
//! component's identity (name, label, display name, filesystem location). A
//! registry installs those configurations, imports the sub-resources each
//! component declares, and exposes a staged readiness protocol so that
//! cross-component queries only run once everything is loaded.
//!
//! ## Key Features
//!
//! - **Deterministic resolution**: package entries, class-path entries and
//!   default-marked discovery, with distinct errors for ambiguity and absence
//! - **Typed registration**: modules and config classes declare themselves into a
//!   [`catalog::ModuleCatalog`] instead of being reflected over
//! - **Staged readiness**: components, sub-resources and ready hooks
//! - **Layered settings**: files plus environment through the `config` crate
//!
//! ## Module Organization
//!
//! - [`catalog`] - Module declarations and idempotent imports
//! - [`registry`] - Entry resolution, component configs and the registry
//! - [`config`] - Settings loading and validation
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//! - [`validation`] - Label and naming rules
//!
//! ## Quick Start
//!
//! ```rust
//! use component_registry::catalog::{Module, ModuleCatalog};
//! use component_registry::config::Settings;
//! use component_registry::registry::ComponentRegistry;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(ModuleCatalog::new());
//! catalog.declare(Module::package("order_history", "/srv/order_history"));
//!
//! let registry = ComponentRegistry::new(
//!     catalog,
//!     Arc::new(Settings::with_installed(["order_history"])),
//! );
//! registry.populate_from_settings()?;
//!
//! let config = registry.get_component_config("order_history")?;
//! assert_eq!(config.verbose_name(), "Order_History");
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod registry;
pub mod validation;

pub use catalog::{Member, Module, ModuleCatalog};
pub use config::{ConfigurationError, Settings, SettingsLoader};
pub use error::{ComponentError, ImportError, Result};
pub use registry::{
    ComponentConfig, ComponentHooks, ComponentRegistry, ConfigClass, ReadinessStage, SubResource,
};
