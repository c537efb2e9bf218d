//! # Entry Resolver
//!
//! Maps an entry string to exactly one `(module identity, config class)` pair.
//!
//! ## Resolution order
//!
//! ```text
//! entry
//!  ├─ imports as a module?
//!  │    ├─ has an `apps` sub-module with one eligible / one default class -> that class
//!  │    └─ otherwise                                                      -> base class, name = entry
//!  ├─ imports as `module.Class`?                                          -> that member
//!  └─ neither -> diagnose: ClassNotFound (upper-case tail) or the plain import error
//! ```
//!
//! The selected member must be a config class, and its declared identity must
//! import. Each failure maps to its own [`ComponentError`] variant.

use crate::catalog::{Member, Module, ModuleCatalog};
use crate::constants::DISCOVERY_MODULE_NAME;
use crate::error::{ComponentError, Result};
use crate::registry::config_class::ConfigClass;
use std::sync::Arc;
use tracing::debug;

/// Outcome of resolving one entry
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Module identity of the component
    pub name: String,
    /// Config class to instantiate
    pub class: Arc<ConfigClass>,
    /// Imported module for `name`
    pub module: Arc<Module>,
}

/// Stateless resolver over a module catalog
#[derive(Debug, Clone, Copy)]
pub struct EntryResolver<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> EntryResolver<'a> {
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, entry: &str) -> Result<ResolvedEntry> {
        let mut selected: Option<Member> = None;
        let mut name: Option<String> = None;

        let entry_module = self.catalog.import_module(entry).ok();
        if let Some(module) = &entry_module {
            match self.discover_default_class(module)? {
                Some(class) => {
                    debug!(entry = entry, class = %class.qualified_name(), "Discovered config class");
                    selected = Some(Member::Config(class));
                }
                None => {
                    debug!(entry = entry, "No config class discovered, using base config");
                    selected = Some(Member::Config(Arc::new(ConfigClass::base())));
                    name = Some(entry.to_string());
                }
            }
        }

        if selected.is_none() {
            match self.catalog.import_string(entry) {
                Ok(member) => selected = Some(member),
                Err(err) => debug!(entry = entry, error = %err, "Entry is not a class path"),
            }
        }

        let Some(selected) = selected else {
            return Err(self.diagnose(entry));
        };

        let class = match selected {
            Member::Config(class) => class,
            Member::Object { .. } => {
                return Err(ComponentError::NotAConfigSubclass {
                    entry: entry.to_string(),
                })
            }
        };

        let name = match name {
            Some(name) => name,
            None => class
                .declared_name()
                .map(str::to_string)
                .ok_or_else(|| ComponentError::MissingIdentityAttribute {
                    entry: entry.to_string(),
                })?,
        };

        let module = self.catalog.import_module(&name).map_err(|err| {
            debug!(name = %name, error = %err, "Declared component name does not import");
            ComponentError::BadDeclaredIdentity {
                name: name.clone(),
                attribute: format!("{}.name", class.qualified_name()),
            }
        })?;

        Ok(ResolvedEntry {
            name,
            class,
            module,
        })
    }

    /// Scan `<module>.apps` for the config class to use. `Ok(None)` when there
    /// is no discovery sub-module or no single eligible class in it.
    fn discover_default_class(&self, module: &Module) -> Result<Option<Arc<ConfigClass>>> {
        if !self
            .catalog
            .module_has_submodule(module, DISCOVERY_MODULE_NAME)
        {
            return Ok(None);
        }

        let discovery_path = format!("{}.{}", module.name(), DISCOVERY_MODULE_NAME);
        let discovery = self.catalog.import_module(&discovery_path)?;

        let mut candidates = sorted_config_subclasses(&discovery);
        candidates.retain(|(_, class)| class.is_default_candidate());

        if let [(_, class)] = candidates.as_slice() {
            return Ok(Some(Arc::clone(class)));
        }

        let defaults: Vec<(&str, &Arc<ConfigClass>)> = candidates
            .into_iter()
            .filter(|(_, class)| class.is_marked_default())
            .collect();

        match defaults.as_slice() {
            [] => Ok(None),
            [(_, class)] => Ok(Some(Arc::clone(class))),
            conflicting => Err(ComponentError::AmbiguousDefault {
                module: discovery_path,
                candidates: conflicting
                    .iter()
                    .map(|(member_name, _)| member_name.to_string())
                    .collect(),
            }),
        }
    }

    /// Explain why neither a module nor a class path matched `entry`
    fn diagnose(&self, entry: &str) -> ComponentError {
        if let Some((module_path, class_name)) = entry.rsplit_once('.') {
            let looks_like_class = class_name
                .chars()
                .next()
                .is_some_and(char::is_uppercase);

            if !module_path.is_empty() && looks_like_class {
                let module = match self.catalog.import_module(module_path) {
                    Ok(module) => module,
                    Err(err) => return err.into(),
                };
                let candidates = sorted_config_subclasses(&module)
                    .into_iter()
                    .map(|(member_name, _)| member_name.to_string())
                    .collect();

                return ComponentError::ClassNotFound {
                    module: module_path.to_string(),
                    class_name: class_name.to_string(),
                    candidates,
                };
            }
        }

        match self.catalog.import_module(entry) {
            Err(err) => err.into(),
            Ok(_) => ComponentError::NotAConfigSubclass {
                entry: entry.to_string(),
            },
        }
    }
}

/// Config subclasses exported by `module`, ordered by member name
fn sorted_config_subclasses(module: &Module) -> Vec<(&str, &Arc<ConfigClass>)> {
    let mut subclasses: Vec<_> = module.config_subclasses().collect();
    subclasses.sort_by(|(left, _), (right, _)| left.cmp(right));
    subclasses
}

/// Resolve `entry` against `catalog`
pub fn resolve(catalog: &ModuleCatalog, entry: &str) -> Result<ResolvedEntry> {
    EntryResolver::new(catalog).resolve(entry)
}
