//! # Component Config
//!
//! The instantiated configuration object for one discovered component.
//!
//! ## Lifecycle
//!
//! ```text
//! create(entry) -> attach(registry) -> finalize(settings) -> import_sub_resources() -> ready()
//! ```
//!
//! Identity (`name`, `label`, `verbose_name`) is fixed and validated at
//! construction. Everything the registry supplies later is written once and
//! only read afterwards.

use crate::catalog::{Module, ModuleCatalog};
use crate::config::Settings;
use crate::constants::RESOURCES_MODULE_NAME;
use crate::error::{ComponentError, Result};
use crate::registry::config_class::ConfigClass;
use crate::registry::readiness::{Readiness, ReadinessStage};
use crate::registry::resolver::EntryResolver;
use crate::registry::sub_resources::{
    SubResource, SubResourceBucket, SubResourceStore, SubResourceView,
};
use crate::validation::{last_segment, title_case, validate_label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// What a registry grants a component when registering it
#[derive(Debug, Clone)]
pub struct RegistryLink {
    readiness: Arc<Readiness>,
    store: SubResourceStore,
}

impl RegistryLink {
    pub fn new(readiness: Arc<Readiness>, store: SubResourceStore) -> Self {
        Self { readiness, store }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}

/// Serializable snapshot of a component for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub name: String,
    pub label: String,
    pub verbose_name: String,
    pub class: String,
    /// Present once the path has been resolved
    pub path: Option<PathBuf>,
    pub resources_module: Option<String>,
    pub sub_resources: usize,
}

/// Configuration and metadata for one installed component
pub struct ComponentConfig {
    class: Arc<ConfigClass>,
    name: String,
    module: Arc<Module>,
    label: String,
    verbose_name: String,
    path: OnceLock<PathBuf>,
    default_identifier_field: OnceLock<String>,
    registry: OnceLock<RegistryLink>,
    sub_resources: OnceLock<SubResourceBucket>,
    resources_module: OnceLock<Option<String>>,
    ready_invoked: AtomicBool,
}

impl ComponentConfig {
    /// Resolve `entry` against `catalog` and instantiate the selected class
    pub fn create(catalog: &ModuleCatalog, entry: &str) -> Result<ComponentConfig> {
        let resolved = EntryResolver::new(catalog).resolve(entry)?;
        resolved.class.instantiate(&resolved.name, resolved.module)
    }

    pub(crate) fn new(class: Arc<ConfigClass>, name: &str, module: Arc<Module>) -> Result<Self> {
        let label = class
            .declared_label()
            .unwrap_or_else(|| last_segment(name))
            .to_string();
        validate_label(&label)?;

        let verbose_name = class
            .declared_verbose_name()
            .map(str::to_string)
            .unwrap_or_else(|| title_case(&label));

        debug!(
            name = name,
            label = %label,
            class = %class.qualified_name(),
            "Constructed component config"
        );

        Ok(Self {
            class,
            name: name.to_string(),
            module,
            label,
            verbose_name,
            path: OnceLock::new(),
            default_identifier_field: OnceLock::new(),
            registry: OnceLock::new(),
            sub_resources: OnceLock::new(),
            resources_module: OnceLock::new(),
            ready_invoked: AtomicBool::new(false),
        })
    }

    /// Fully-qualified module identity
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn verbose_name(&self) -> &str {
        &self.verbose_name
    }

    pub fn class(&self) -> &Arc<ConfigClass> {
        &self.class
    }

    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    /// Filesystem location backing the component.
    ///
    /// A class-declared path wins. Otherwise the module must have exactly one
    /// location, or none and a backing file whose directory is used.
    pub fn path(&self) -> Result<&Path> {
        if let Some(path) = self.path.get() {
            return Ok(path.as_path());
        }

        let resolved = match self.class.declared_path() {
            Some(path) => path.to_path_buf(),
            None => path_from_module(&self.module)?,
        };

        Ok(self.path.get_or_init(|| resolved).as_path())
    }

    /// Attach the owning registry. Only the first attachment takes effect.
    pub fn attach(&self, link: RegistryLink) -> bool {
        let attached = self.registry.set(link).is_ok();
        if !attached {
            warn!(label = %self.label, "Component is already attached to a registry");
        }
        attached
    }

    pub fn registry(&self) -> Option<&RegistryLink> {
        self.registry.get()
    }

    fn link(&self) -> Result<&RegistryLink> {
        self.registry.get().ok_or(ComponentError::NotReady {
            stage: ReadinessStage::Components,
        })
    }

    /// Second initialization phase: fix the default identifier field from
    /// finalized settings unless the class declares its own
    pub fn finalize(&self, settings: &Settings) {
        let field = self.default_identifier_field.get_or_init(|| {
            self.class
                .declared_default_identifier_field()
                .unwrap_or(settings.default_identifier_field.as_str())
                .to_string()
        });
        debug!(label = %self.label, field = %field, "Finalized component settings");
    }

    pub fn default_identifier_field(&self) -> Result<&str> {
        self.default_identifier_field
            .get()
            .map(String::as_str)
            .ok_or(ComponentError::NotReady {
                stage: ReadinessStage::Settings,
            })
    }

    /// Whether the class declares its own default identifier field
    pub fn is_default_identifier_field_overridden(&self) -> bool {
        self.class.declared_default_identifier_field().is_some()
    }

    /// Identifier field for `sub_resource`, falling back to the component default
    pub fn identifier_field_for<'a>(&'a self, sub_resource: &'a SubResource) -> Result<&'a str> {
        match sub_resource.identifier_field.as_deref() {
            Some(field) => Ok(field),
            None => self.default_identifier_field(),
        }
    }

    /// Bind this component's sub-resource bucket and import its resources
    /// module, registering every sub-resource it declares
    pub fn import_sub_resources(&self, catalog: &ModuleCatalog) -> Result<()> {
        let link = self.link()?;

        if self.resources_module.get().is_some() {
            debug!(label = %self.label, "Sub-resources already imported");
            return Ok(());
        }

        let bucket = self
            .sub_resources
            .get_or_init(|| link.store.bucket(&self.label));

        let resources_module = if catalog.module_has_submodule(&self.module, RESOURCES_MODULE_NAME)
        {
            let module_path = format!("{}.{}", self.name, RESOURCES_MODULE_NAME);
            let resources = catalog.import_module(&module_path)?;
            for sub_resource in resources.sub_resources() {
                bucket.register(sub_resource.clone())?;
            }
            Some(module_path)
        } else {
            None
        };

        info!(
            label = %self.label,
            resources_module = ?resources_module,
            sub_resources = bucket.len(),
            "Imported component sub-resources"
        );

        let _ = self.resources_module.set(resources_module);
        Ok(())
    }

    /// Path of the imported resources module, if the component has one
    pub fn resources_module(&self) -> Option<&str> {
        self.resources_module.get().and_then(|module| module.as_deref())
    }

    fn bucket(&self) -> Result<&SubResourceBucket> {
        self.sub_resources.get().ok_or(ComponentError::NotReady {
            stage: ReadinessStage::SubResources,
        })
    }

    /// Look up a sub-resource by case-insensitive name.
    ///
    /// Requires every component to have imported its sub-resources, or only
    /// component registration when `require_ready` is false.
    pub fn get_sub_resource(&self, name: &str, require_ready: bool) -> Result<Arc<SubResource>> {
        let link = self.link()?;
        if require_ready {
            link.readiness.check_models_ready()?;
        } else {
            link.readiness.check_apps_ready()?;
        }

        self.bucket()?
            .get(name)
            .ok_or_else(|| ComponentError::SubResourceNotFound {
                label: self.label.clone(),
                name: name.to_string(),
            })
    }

    /// Sub-resources of this component, skipping auto-created and swapped-out
    /// entries unless included
    pub fn get_sub_resources(
        &self,
        include_auto_created: bool,
        include_swapped: bool,
    ) -> Result<SubResourceView> {
        self.link()?.readiness.check_models_ready()?;
        Ok(SubResourceView::new(
            self.bucket()?.clone(),
            include_auto_created,
            include_swapped,
        ))
    }

    pub fn summary(&self) -> ComponentSummary {
        ComponentSummary {
            name: self.name.clone(),
            label: self.label.clone(),
            verbose_name: self.verbose_name.clone(),
            class: self.class.qualified_name(),
            path: self.path.get().cloned(),
            resources_module: self.resources_module().map(str::to_string),
            sub_resources: self.sub_resources.get().map_or(0, SubResourceBucket::len),
        }
    }

    /// Run the class's ready hook. Later calls are ignored.
    pub fn ready(&self) -> Result<()> {
        if self.ready_invoked.swap(true, Ordering::AcqRel) {
            warn!(label = %self.label, "ready() already invoked, ignoring");
            return Ok(());
        }
        self.class.hooks().ready(self)
    }
}

fn path_from_module(module: &Module) -> Result<PathBuf> {
    let mut locations: Vec<PathBuf> = Vec::new();
    for location in module.locations() {
        if !locations.contains(location) {
            locations.push(location.clone());
        }
    }

    if locations.is_empty() {
        if let Some(parent) = module.file().and_then(|file| file.parent()) {
            return Ok(parent.to_path_buf());
        }
    }

    if locations.len() == 1 {
        return Ok(locations.remove(0));
    }

    Err(ComponentError::UnresolvableLocation {
        module: module.name().to_string(),
        locations,
    })
}

impl fmt::Display for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.class.class_name(), self.label)
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("class", &self.class.qualified_name())
            .field("name", &self.name)
            .field("label", &self.label)
            .field("verbose_name", &self.verbose_name)
            .field("path", &self.path.get())
            .field("attached", &self.registry.get().is_some())
            .finish_non_exhaustive()
    }
}
