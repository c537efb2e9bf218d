//! # Component Registry
//!
//! Owns every installed [`ComponentConfig`], the readiness flags and the
//! sub-resource store, and drives population in three phases:
//!
//! ```text
//! entries -> resolve + register (apps ready) -> import sub-resources (models ready) -> ready hooks (ready)
//! ```
//!
//! A failure in any phase aborts population and is returned verbatim. The
//! registry is not reset afterwards, so a second `populate` call fails with
//! [`ComponentError::PopulateReentrant`].
//!
//! ## Usage
//!
//! ```rust
//! use component_registry::catalog::{Module, ModuleCatalog};
//! use component_registry::config::Settings;
//! use component_registry::registry::ComponentRegistry;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(ModuleCatalog::new());
//! catalog.declare(Module::package("shop", "/srv/shop"));
//!
//! let registry = ComponentRegistry::new(catalog, Arc::new(Settings::with_installed(["shop"])));
//! registry.populate_from_settings()?;
//!
//! assert_eq!(registry.get_component_config("shop")?.verbose_name(), "Shop");
//! # Ok(())
//! # }
//! ```

use crate::catalog::ModuleCatalog;
use crate::config::Settings;
use crate::constants::operations;
use crate::error::{ComponentError, Result};
use crate::logging::{log_component_operation, log_error};
use crate::registry::component_config::{ComponentConfig, ComponentSummary, RegistryLink};
use crate::registry::readiness::Readiness;
use crate::registry::sub_resources::{SubResource, SubResourceStore};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of installed components keyed by label
#[derive(Debug)]
pub struct ComponentRegistry {
    catalog: Arc<ModuleCatalog>,
    settings: Arc<Settings>,
    readiness: Arc<Readiness>,
    store: SubResourceStore,
    /// Installed configs in installation order
    configs: RwLock<IndexMap<String, Arc<ComponentConfig>>>,
    loading: AtomicBool,
}

impl ComponentRegistry {
    pub fn new(catalog: Arc<ModuleCatalog>, settings: Arc<Settings>) -> Self {
        Self {
            catalog,
            settings,
            readiness: Arc::new(Readiness::new()),
            store: SubResourceStore::new(),
            configs: RwLock::new(IndexMap::new()),
            loading: AtomicBool::new(false),
        }
    }

    /// Populate from `settings.installed_components`, validating settings first
    pub fn populate_from_settings(&self) -> Result<()> {
        self.settings.validate()?;
        let entries = self.settings.installed_components.clone();
        self.populate(&entries)
    }

    /// Resolve, register and initialize every entry. A no-op once ready.
    pub fn populate<S: AsRef<str>>(&self, entries: &[S]) -> Result<()> {
        if self.readiness.is_ready() {
            debug!("Component registry already populated");
            return Ok(());
        }

        if self.loading.swap(true, Ordering::AcqRel) {
            return Err(ComponentError::PopulateReentrant);
        }

        info!(entries = entries.len(), "Populating component registry");

        let result = self.run_phases(entries);
        if let Err(err) = &result {
            log_error(
                "ComponentRegistry",
                "populate",
                &err.to_string(),
                Some("component registry population aborted"),
            );
        }
        result
    }

    fn run_phases<S: AsRef<str>>(&self, entries: &[S]) -> Result<()> {
        for entry in entries {
            self.register_entry(entry.as_ref())?;
        }
        self.readiness.mark_apps_ready();

        for config in self.get_component_configs() {
            config.import_sub_resources(&self.catalog)?;
            log_component_operation(
                operations::IMPORT_SUB_RESOURCES,
                Some(config.label()),
                Some(config.name()),
                "completed",
                config.resources_module(),
            );
        }
        self.readiness.mark_models_ready();

        for config in self.get_component_configs() {
            config.ready()?;
            log_component_operation(
                operations::READY,
                Some(config.label()),
                Some(config.name()),
                "completed",
                None,
            );
        }
        self.readiness.mark_ready();

        info!(
            components = self.configs.read().len(),
            "Component registry ready"
        );
        Ok(())
    }

    fn register_entry(&self, entry: &str) -> Result<()> {
        let config = ComponentConfig::create(&self.catalog, entry)?;
        log_component_operation(
            operations::RESOLVE,
            Some(config.label()),
            Some(config.name()),
            "resolved",
            Some(entry),
        );

        config.path()?;

        let mut configs = self.configs.write();
        if configs.contains_key(config.label()) {
            return Err(ComponentError::DuplicateLabel {
                label: config.label().to_string(),
            });
        }
        if configs.values().any(|existing| existing.name() == config.name()) {
            return Err(ComponentError::DuplicateName {
                name: config.name().to_string(),
            });
        }

        config.attach(RegistryLink::new(self.readiness.clone(), self.store.clone()));
        config.finalize(&self.settings);

        let details = serde_json::to_string(&config.summary()).ok();
        log_component_operation(
            operations::REGISTER,
            Some(config.label()),
            Some(config.name()),
            "registered",
            details.as_deref(),
        );
        configs.insert(config.label().to_string(), Arc::new(config));
        Ok(())
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn store(&self) -> &SubResourceStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &Arc<ModuleCatalog> {
        &self.catalog
    }

    /// Population has started and the registry is not ready yet
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire) && !self.readiness.is_ready()
    }

    pub fn check_apps_ready(&self) -> Result<()> {
        self.readiness.check_apps_ready()
    }

    pub fn check_models_ready(&self) -> Result<()> {
        self.readiness.check_models_ready()
    }

    pub fn check_ready(&self) -> Result<()> {
        self.readiness.check_ready()
    }

    /// Installed configs in installation order
    pub fn get_component_configs(&self) -> Vec<Arc<ComponentConfig>> {
        self.configs.read().values().cloned().collect()
    }

    /// Snapshots of every installed component, in installation order
    pub fn summaries(&self) -> Vec<ComponentSummary> {
        self.configs
            .read()
            .values()
            .map(|config| config.summary())
            .collect()
    }

    /// The config registered under `label`
    pub fn get_component_config(&self, label: &str) -> Result<Arc<ComponentConfig>> {
        self.check_apps_ready()?;
        self.configs
            .read()
            .get(label)
            .cloned()
            .ok_or_else(|| ComponentError::ComponentNotFound {
                label: label.to_string(),
            })
    }

    /// Whether a component with module identity `name` is installed
    pub fn is_installed(&self, name: &str) -> bool {
        self.configs
            .read()
            .values()
            .any(|config| config.name() == name)
    }

    /// Look up a sub-resource of the component registered under `label`
    pub fn get_sub_resource(
        &self,
        label: &str,
        name: &str,
        require_ready: bool,
    ) -> Result<Arc<SubResource>> {
        self.get_component_config(label)?
            .get_sub_resource(name, require_ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Module;
    use crate::registry::readiness::ReadinessStage;
    use crate::registry::ConfigClass;

    fn shop_catalog() -> Arc<ModuleCatalog> {
        let catalog = Arc::new(ModuleCatalog::new());
        catalog.declare(Module::package("shop", "/srv/shop"));
        catalog.declare(
            Module::package("shop.models", "/srv/shop").with_sub_resource(SubResource::new("Order")),
        );
        catalog.declare(Module::package("billing", "/srv/billing"));
        catalog
    }

    fn registry(catalog: Arc<ModuleCatalog>, entries: &[&str]) -> ComponentRegistry {
        ComponentRegistry::new(catalog, Arc::new(Settings::with_installed(entries.to_vec())))
    }

    #[test]
    fn test_populate_reaches_every_stage() {
        let registry = registry(shop_catalog(), &["shop", "billing"]);
        assert!(registry.check_apps_ready().is_err());

        registry.populate_from_settings().unwrap();

        assert!(registry.check_ready().is_ok());
        let labels: Vec<String> = registry
            .get_component_configs()
            .iter()
            .map(|config| config.label().to_string())
            .collect();
        assert_eq!(labels, vec!["shop", "billing"]);
        assert_eq!(registry.get_sub_resource("shop", "order", true).unwrap().name, "Order");
        assert!(registry.is_installed("billing"));
        assert!(!registry.is_installed("bill"));
    }

    #[test]
    fn test_populate_is_idempotent_once_ready() {
        let registry = registry(shop_catalog(), &["shop"]);
        registry.populate(&["shop"]).unwrap();
        assert!(!registry.is_loading());
        registry.populate(&["shop", "billing"]).unwrap();
        assert_eq!(registry.get_component_configs().len(), 1);
    }

    #[test]
    fn test_failed_population_is_not_retried() {
        let registry = registry(shop_catalog(), &[]);
        assert!(registry.populate(&["missing"]).is_err());
        assert!(registry.is_loading());
        assert_eq!(
            registry.populate(&["shop"]).unwrap_err(),
            ComponentError::PopulateReentrant
        );
    }

    #[test]
    fn test_duplicate_label_aborts() {
        let catalog = shop_catalog();
        catalog.declare(Module::package("legacy", "/srv/legacy"));
        catalog.declare(Module::package("legacy.shop", "/srv/legacy/shop"));

        let registry = registry(catalog, &[]);
        assert_eq!(
            registry.populate(&["shop", "legacy.shop"]).unwrap_err(),
            ComponentError::DuplicateLabel {
                label: "shop".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_name_aborts() {
        let catalog = shop_catalog();
        catalog.declare(Module::package("retail", "/srv/retail"));
        catalog.declare(
            Module::package("retail.apps", "/srv/retail").with_config(
                ConfigClass::new("RetailConfig")
                    .with_name("shop")
                    .with_label("retail"),
            ),
        );

        let registry = registry(catalog, &[]);
        assert_eq!(
            registry
                .populate(&["shop", "retail.apps.RetailConfig"])
                .unwrap_err(),
            ComponentError::DuplicateName {
                name: "shop".to_string()
            }
        );
    }

    #[test]
    fn test_summaries_serialize() {
        let registry = registry(shop_catalog(), &["shop", "billing"]);
        registry.populate_from_settings().unwrap();

        let summaries = serde_json::to_value(registry.summaries()).unwrap();
        assert_eq!(summaries[0]["label"], "shop");
        assert_eq!(summaries[0]["resources_module"], "shop.models");
        assert_eq!(summaries[0]["sub_resources"], 1);
        assert_eq!(summaries[1]["path"], "/srv/billing");
        assert!(summaries[1]["resources_module"].is_null());
    }

    #[test]
    fn test_unknown_label() {
        let registry = registry(shop_catalog(), &["shop"]);
        assert_eq!(
            registry.get_component_config("shop").unwrap_err(),
            ComponentError::NotReady {
                stage: ReadinessStage::Components
            }
        );

        registry.populate_from_settings().unwrap();
        assert_eq!(
            registry.get_component_config("billing").unwrap_err(),
            ComponentError::ComponentNotFound {
                label: "billing".to_string()
            }
        );
    }

    #[test]
    fn test_configs_are_finalized_against_settings() {
        let settings = Settings {
            default_identifier_field: "BigAutoField".to_string(),
            installed_components: vec!["shop".to_string()],
        };
        let registry = ComponentRegistry::new(shop_catalog(), Arc::new(settings));
        registry.populate_from_settings().unwrap();

        let shop = registry.get_component_config("shop").unwrap();
        assert_eq!(shop.default_identifier_field().unwrap(), "BigAutoField");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let registry = registry(shop_catalog(), &["shop", "shop"]);
        assert!(matches!(
            registry.populate_from_settings(),
            Err(ComponentError::Settings(_))
        ));
        assert!(!registry.is_loading());
    }
}
