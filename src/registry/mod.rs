//! # Component Registry Infrastructure
//!
//! Resolution, configuration and registration of pluggable components.
//!
//! ## Overview
//!
//! An *entry* string names a component either as a module path (`"shop"`) or as
//! a path to a config class (`"shop.apps.ShopConfig"`). The [`EntryResolver`]
//! maps it to exactly one config class, which instantiates a [`ComponentConfig`].
//! The [`ComponentRegistry`] installs configs, imports their sub-resources and
//! runs their ready hooks, publishing progress through [`Readiness`].
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── EntryResolver      (entry string -> config class)
//! ├── ConfigClass        (class-level overrides + lifecycle hooks)
//! ├── ComponentConfig    (identity, path, gated sub-resource access)
//! ├── SubResourceStore   (registry-owned buckets keyed by label)
//! └── ComponentRegistry  (three-phase population + readiness)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use component_registry::catalog::{Module, ModuleCatalog};
//! use component_registry::registry::{ComponentConfig, ConfigClass};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = ModuleCatalog::new();
//! catalog.declare(Module::package("shop", "/srv/shop"));
//! catalog.declare(
//!     Module::package("shop.apps", "/srv/shop")
//!         .with_base_reexport()
//!         .with_config(ConfigClass::new("ShopConfig").with_name("shop").marked_default(true))
//!         .with_config(ConfigClass::new("LegacyShopConfig").with_name("shop")),
//! );
//!
//! let config = ComponentConfig::create(&catalog, "shop")?;
//! assert_eq!(config.class().class_name(), "ShopConfig");
//! assert_eq!(config.label(), "shop");
//! # Ok(())
//! # }
//! ```

pub mod component_config;
pub mod component_registry;
pub mod config_class;
pub mod readiness;
pub mod resolver;
pub mod sub_resources;

// Re-export main types for easy access
pub use component_config::{ComponentConfig, ComponentSummary, RegistryLink};
pub use component_registry::ComponentRegistry;
pub use config_class::{ComponentHooks, ConfigClass, NoopHooks};
pub use readiness::{Readiness, ReadinessStage};
pub use resolver::{resolve, EntryResolver, ResolvedEntry};
pub use sub_resources::{
    SubResource, SubResourceBucket, SubResourceIter, SubResourceStore, SubResourceView,
};
