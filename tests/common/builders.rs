//! Catalog fixtures shared by the integration tests.

#![allow(dead_code)]

use component_registry::catalog::{Module, ModuleCatalog};
use component_registry::config::Settings;
use component_registry::registry::{ComponentRegistry, ConfigClass, SubResource};
use std::sync::Arc;

/// Builder for a catalog holding one `shop` package and optional sub-modules
pub struct ShopCatalogBuilder {
    discovery: Option<Module>,
    resources: Option<Module>,
    extra: Vec<Module>,
}

impl ShopCatalogBuilder {
    pub fn new() -> Self {
        Self {
            discovery: None,
            resources: None,
            extra: Vec::new(),
        }
    }

    /// `shop.apps` re-exporting the base type and defining `classes` in order
    pub fn with_discovery(mut self, classes: Vec<ConfigClass>) -> Self {
        let module = classes.into_iter().fold(
            Module::package("shop.apps", "/srv/app/shop").with_base_reexport(),
            Module::with_config,
        );
        self.discovery = Some(module);
        self
    }

    /// `shop.models` declaring `sub_resources` in order
    pub fn with_resources(mut self, sub_resources: Vec<SubResource>) -> Self {
        let module = sub_resources.into_iter().fold(
            Module::package("shop.models", "/srv/app/shop"),
            Module::with_sub_resource,
        );
        self.resources = Some(module);
        self
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.extra.push(module);
        self
    }

    pub fn build(self) -> Arc<ModuleCatalog> {
        let catalog = Arc::new(ModuleCatalog::new());
        catalog.declare(Module::package("shop", "/srv/app/shop"));
        for module in self
            .discovery
            .into_iter()
            .chain(self.resources)
            .chain(self.extra)
        {
            catalog.declare(module);
        }
        catalog
    }
}

impl Default for ShopCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `shop` with `ShopConfig(default = true)` and an unmarked `LegacyShopConfig`
pub fn shop_with_default_config() -> Arc<ModuleCatalog> {
    ShopCatalogBuilder::new()
        .with_discovery(vec![
            ConfigClass::new("ShopConfig")
                .with_name("shop")
                .marked_default(true),
            ConfigClass::new("LegacyShopConfig").with_name("shop"),
        ])
        .build()
}

/// `shop` with an unmarked `ShopConfig` next to a `LegacyShopConfig` excluded from discovery
pub fn shop_with_legacy_config() -> Arc<ModuleCatalog> {
    ShopCatalogBuilder::new()
        .with_discovery(vec![
            ConfigClass::new("ShopConfig").with_name("shop"),
            ConfigClass::new("LegacyShopConfig")
                .with_name("shop")
                .marked_default(false),
        ])
        .build()
}

/// Declare a package and every ancestor package of a dotted path
pub fn declare_package_chain(catalog: &ModuleCatalog, path: &str, root: &str) {
    let mut prefix = String::new();
    for segment in path.split('.') {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);
        if !catalog.contains(&prefix) {
            catalog.declare(Module::package(&prefix, format!("{root}/{}", prefix.replace('.', "/"))));
        }
    }
}

/// Registry over `catalog` with `entries` installed and default settings otherwise
pub fn registry_for(catalog: Arc<ModuleCatalog>, entries: &[&str]) -> ComponentRegistry {
    ComponentRegistry::new(
        catalog,
        Arc::new(Settings::with_installed(entries.iter().copied())),
    )
}
