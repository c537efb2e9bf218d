//! # Config Classes
//!
//! Typed descriptions of component configuration "classes". A [`ConfigClass`]
//! carries the class-level overrides a component may declare (identity, label,
//! display name, path, default marking) together with its lifecycle hooks, and
//! acts as the constructor for [`ComponentConfig`] values.

use crate::catalog::Module;
use crate::constants::{BASE_CONFIG_CLASS_NAME, BASE_CONFIG_MODULE};
use crate::error::Result;
use crate::registry::component_config::ComponentConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lifecycle hooks a component may override
pub trait ComponentHooks: Send + Sync {
    /// Invoked once, after every installed component imported its sub-resources
    fn ready(&self, _config: &ComponentConfig) -> Result<()> {
        Ok(())
    }
}

/// Hooks used when a class declares none
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl ComponentHooks for NoopHooks {}

impl<F> ComponentHooks for F
where
    F: Fn(&ComponentConfig) -> Result<()> + Send + Sync,
{
    fn ready(&self, config: &ComponentConfig) -> Result<()> {
        self(config)
    }
}

/// A component configuration class
#[derive(Clone)]
pub struct ConfigClass {
    class_name: String,
    module: String,
    name: Option<String>,
    label: Option<String>,
    verbose_name: Option<String>,
    path: Option<PathBuf>,
    default: Option<bool>,
    default_identifier_field: Option<String>,
    is_base: bool,
    hooks: Arc<dyn ComponentHooks>,
}

impl ConfigClass {
    /// A config subclass named `class_name`; the declaring module is filled in
    /// when the class is added to a [`Module`]
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            module: String::new(),
            name: None,
            label: None,
            verbose_name: None,
            path: None,
            default: None,
            default_identifier_field: None,
            is_base: false,
            hooks: Arc::new(NoopHooks),
        }
    }

    /// The base configuration type itself
    pub fn base() -> Self {
        Self {
            is_base: true,
            ..Self::new(BASE_CONFIG_CLASS_NAME).declared_in(BASE_CONFIG_MODULE)
        }
    }

    pub fn declared_in(mut self, module: &str) -> Self {
        self.module = module.to_string();
        self
    }

    /// Declare the module identity this class configures
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_verbose_name(mut self, verbose_name: &str) -> Self {
        self.verbose_name = Some(verbose_name.to_string());
        self
    }

    /// Declare an explicit filesystem path, bypassing location resolution
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark (or unmark) this class as the default among its siblings
    pub fn marked_default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_default_identifier_field(mut self, field: &str) -> Self {
        self.default_identifier_field = Some(field.to_string());
        self
    }

    pub fn with_hooks(mut self, hooks: impl ComponentHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Declaring module path, empty until declared
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn qualified_name(&self) -> String {
        if self.module.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.module, self.class_name)
        }
    }

    /// The declared module identity, if any
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn declared_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn declared_verbose_name(&self) -> Option<&str> {
        self.verbose_name.as_deref()
    }

    pub fn declared_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn declared_default_identifier_field(&self) -> Option<&str> {
        self.default_identifier_field.as_deref()
    }

    pub fn is_base(&self) -> bool {
        self.is_base
    }

    /// Eligible for discovery unless explicitly marked non-default
    pub fn is_default_candidate(&self) -> bool {
        self.default != Some(false)
    }

    /// Explicitly marked as the default
    pub fn is_marked_default(&self) -> bool {
        self.default == Some(true)
    }

    pub fn hooks(&self) -> &Arc<dyn ComponentHooks> {
        &self.hooks
    }

    /// Construct a component config for `name`, backed by `module`
    pub fn instantiate(self: &Arc<Self>, name: &str, module: Arc<Module>) -> Result<ComponentConfig> {
        ComponentConfig::new(self.clone(), name, module)
    }
}

impl fmt::Debug for ConfigClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigClass")
            .field("class_name", &self.class_name)
            .field("module", &self.module)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("verbose_name", &self.verbose_name)
            .field("path", &self.path)
            .field("default", &self.default)
            .field("default_identifier_field", &self.default_identifier_field)
            .field("is_base", &self.is_base)
            .finish_non_exhaustive()
    }
}
