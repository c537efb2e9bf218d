//! # Module Catalog
//!
//! Typed, process-wide table of importable modules.
//!
//! ## Overview
//!
//! Components declare themselves once at load time: each [`Module`] lists its
//! filesystem locations, the config classes it defines or re-exports and the
//! sub-resources it declares. Resolution queries the catalog by dotted path
//! instead of reflecting over arbitrary module members.
//!
//! ## Usage
//!
//! ```rust
//! use component_registry::catalog::{Module, ModuleCatalog};
//! use component_registry::registry::ConfigClass;
//!
//! let catalog = ModuleCatalog::new();
//! catalog.declare(Module::package("shop", "/srv/app/shop"));
//! catalog.declare(
//!     Module::package("shop.apps", "/srv/app/shop")
//!         .with_config(ConfigClass::new("ShopConfig").with_name("shop").marked_default(true)),
//! );
//!
//! let shop = catalog.import_module("shop").unwrap();
//! assert!(catalog.module_has_submodule(&shop, "apps"));
//! ```

pub mod module;
pub mod module_catalog;

pub use module::{Member, Module};
pub use module_catalog::ModuleCatalog;
