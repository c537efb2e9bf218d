//! Process-wide module table with idempotent imports.

use super::module::{Member, Module};
use crate::error::ImportError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

static GLOBAL_CATALOG: OnceLock<ModuleCatalog> = OnceLock::new();

/// Table of declared modules keyed by dotted path
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: RwLock<HashMap<String, Arc<Module>>>,
    /// Import counts per module path, for cache-hit diagnostics
    imports: RwLock<HashMap<String, usize>>,
}

impl ModuleCatalog {
    /// Create an isolated catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalog components declare themselves into at load time
    pub fn global() -> &'static ModuleCatalog {
        GLOBAL_CATALOG.get_or_init(ModuleCatalog::new)
    }

    /// Declare a module, replacing any previous declaration under the same path
    pub fn declare(&self, module: Module) -> Arc<Module> {
        let module = Arc::new(module);
        let mut modules = self.modules.write();

        if modules.contains_key(module.name()) {
            warn!(module = module.name(), "Module already declared, replacing");
        } else {
            debug!(module = module.name(), "Declared module");
        }

        modules.insert(module.name().to_string(), module.clone());
        module
    }

    /// Import a module by dotted path. Every ancestor package must be declared too.
    pub fn import_module(&self, path: &str) -> Result<Arc<Module>, ImportError> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(ImportError::InvalidPath {
                path: path.to_string(),
            });
        }

        let modules = self.modules.read();

        let mut ancestor_end = 0;
        for segment in path.split('.') {
            ancestor_end += segment.len();
            let ancestor = &path[..ancestor_end];
            if !modules.contains_key(ancestor) {
                return Err(ImportError::ModuleNotFound {
                    module: ancestor.to_string(),
                });
            }
            ancestor_end += 1;
        }

        let module = modules
            .get(path)
            .cloned()
            .ok_or_else(|| ImportError::ModuleNotFound {
                module: path.to_string(),
            })?;
        drop(modules);

        let mut imports = self.imports.write();
        let count = imports.entry(path.to_string()).or_insert(0);
        *count += 1;
        if *count > 1 {
            debug!(module = path, count = *count, "Module import served from cache");
        }

        Ok(module)
    }

    /// Whether `module` has a declared sub-module `name`, without importing it
    pub fn module_has_submodule(&self, module: &Module, name: &str) -> bool {
        self.modules
            .read()
            .contains_key(&format!("{}.{}", module.name(), name))
    }

    /// Import the member named by the last segment of a dotted path
    pub fn import_string(&self, dotted_path: &str) -> Result<Member, ImportError> {
        let (module_path, attribute) =
            dotted_path
                .rsplit_once('.')
                .ok_or_else(|| ImportError::InvalidPath {
                    path: dotted_path.to_string(),
                })?;

        let module = self.import_module(module_path)?;
        module
            .member(attribute)
            .cloned()
            .ok_or_else(|| ImportError::AttributeNotFound {
                module: module_path.to_string(),
                attribute: attribute.to_string(),
            })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modules.read().contains_key(path)
    }

    /// Number of successful imports of `path` so far
    pub fn import_count(&self, path: &str) -> usize {
        self.imports.read().get(path).copied().unwrap_or(0)
    }

    /// Declared module paths, sorted
    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.read().keys().cloned().collect();
        names.sort();
        names
    }
}
