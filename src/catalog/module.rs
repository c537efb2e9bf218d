//! Module descriptors and their members.

use crate::constants::BASE_CONFIG_CLASS_NAME;
use crate::registry::config_class::ConfigClass;
use crate::registry::sub_resources::SubResource;
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A named attribute exported by a module
#[derive(Debug, Clone)]
pub enum Member {
    /// A component config class, defined in the module or re-exported into it
    Config(Arc<ConfigClass>),
    /// Any other exported object
    Object { kind: String },
}

impl Member {
    pub fn as_config(&self) -> Option<&Arc<ConfigClass>> {
        match self {
            Self::Config(class) => Some(class),
            Self::Object { .. } => None,
        }
    }
}

/// Declaration of one importable module
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    locations: Vec<PathBuf>,
    file: Option<PathBuf>,
    members: IndexMap<String, Member>,
    sub_resources: Vec<SubResource>,
}

impl Module {
    fn with_backing(name: &str, locations: Vec<PathBuf>, file: Option<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            locations,
            file,
            members: IndexMap::new(),
            sub_resources: Vec::new(),
        }
    }

    /// A regular package backed by one directory
    pub fn package(name: &str, location: impl Into<PathBuf>) -> Self {
        Self::with_backing(name, vec![location.into()], None)
    }

    /// A single-file module with no package directory
    pub fn single_file(name: &str, file: impl Into<PathBuf>) -> Self {
        Self::with_backing(name, Vec::new(), Some(file.into()))
    }

    /// A namespace package that may span several directories
    pub fn namespace<I, P>(name: &str, locations: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_backing(name, locations.into_iter().map(Into::into).collect(), None)
    }

    /// A module with no filesystem backing at all
    pub fn in_memory(name: &str) -> Self {
        Self::with_backing(name, Vec::new(), None)
    }

    /// Define a config class in this module
    pub fn with_config(mut self, class: ConfigClass) -> Self {
        let class = if class.module().is_empty() {
            class.declared_in(&self.name)
        } else {
            class
        };
        self.members.insert(
            class.class_name().to_string(),
            Member::Config(Arc::new(class)),
        );
        self
    }

    /// Re-export an existing config class under `alias`
    pub fn with_config_as(mut self, alias: &str, class: Arc<ConfigClass>) -> Self {
        self.members.insert(alias.to_string(), Member::Config(class));
        self
    }

    /// Re-export the base config type, as discovery modules commonly do
    pub fn with_base_reexport(mut self) -> Self {
        self.members.insert(
            BASE_CONFIG_CLASS_NAME.to_string(),
            Member::Config(Arc::new(ConfigClass::base())),
        );
        self
    }

    /// Export a non-config object
    pub fn with_object(mut self, name: &str, kind: &str) -> Self {
        self.members.insert(
            name.to_string(),
            Member::Object {
                kind: kind.to_string(),
            },
        );
        self
    }

    /// Declare a sub-resource, registered with the owning component on import
    pub fn with_sub_resource(mut self, sub_resource: SubResource) -> Self {
        self.sub_resources.push(sub_resource);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Members in declaration order
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    /// Config classes exported here, excluding the base type, in declaration order
    pub fn config_subclasses(&self) -> impl Iterator<Item = (&str, &Arc<ConfigClass>)> {
        self.members().filter_map(|(name, member)| {
            member
                .as_config()
                .filter(|class| !class.is_base())
                .map(|class| (name, class))
        })
    }

    pub fn sub_resources(&self) -> &[SubResource] {
        &self.sub_resources
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<module '{}'>", self.name)
    }
}
