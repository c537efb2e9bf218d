//! # Sub-resources
//!
//! Named units declared by a component (data models, schemas) and the
//! registry-owned store that keys them by component label.
//!
//! The [`SubResourceStore`] owns one [`SubResourceBucket`] per label. A component
//! receives the handle for its own bucket when it imports its sub-resources and
//! never sees the store itself.

use crate::error::{ComponentError, Result};
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

type Entries = IndexMap<String, Arc<SubResource>>;

/// A sub-resource declared by a component's resources module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResource {
    pub name: String,
    /// Created implicitly by the framework rather than declared by the component
    #[serde(default)]
    pub auto_created: bool,
    /// The sub-resource that replaces this one, when swapped out
    #[serde(default)]
    pub swapped: Option<String>,
    /// Identifier field strategy declared by the sub-resource itself
    #[serde(default)]
    pub identifier_field: Option<String>,
}

impl SubResource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            auto_created: false,
            swapped: None,
            identifier_field: None,
        }
    }

    pub fn auto_created(mut self) -> Self {
        self.auto_created = true;
        self
    }

    pub fn swapped_for(mut self, replacement: &str) -> Self {
        self.swapped = Some(replacement.to_string());
        self
    }

    pub fn with_identifier_field(mut self, field: &str) -> Self {
        self.identifier_field = Some(field.to_string());
        self
    }

    pub fn is_swapped(&self) -> bool {
        self.swapped.is_some()
    }

    /// Lower-cased lookup key
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Handle onto the sub-resources registered under one component label
#[derive(Debug, Clone)]
pub struct SubResourceBucket {
    label: String,
    entries: Arc<RwLock<Entries>>,
}

impl SubResourceBucket {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            entries: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Register a sub-resource. Registering an equal declaration again is a
    /// no-op; a different declaration under the same name is a conflict.
    pub fn register(&self, sub_resource: SubResource) -> Result<Arc<SubResource>> {
        let key = sub_resource.key();
        let mut entries = self.entries.write();

        if let Some(existing) = entries.get(&key) {
            if existing.as_ref() == &sub_resource {
                warn!(
                    label = %self.label,
                    name = %sub_resource.name,
                    "Sub-resource was already registered, ignoring repeated registration"
                );
                return Ok(existing.clone());
            }
            return Err(ComponentError::ConflictingSubResource {
                label: self.label.clone(),
                name: sub_resource.name,
            });
        }

        debug!(label = %self.label, name = %sub_resource.name, "Registered sub-resource");
        let sub_resource = Arc::new(sub_resource);
        entries.insert(key, sub_resource.clone());
        Ok(sub_resource)
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<Arc<SubResource>> {
        self.entries.read().get(&name.to_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read()
    }
}

/// Registry-owned mapping from component label to its bucket
#[derive(Debug, Clone, Default)]
pub struct SubResourceStore {
    buckets: Arc<RwLock<HashMap<String, SubResourceBucket>>>,
}

impl SubResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bucket for `label`, created empty on first use
    pub fn bucket(&self, label: &str) -> SubResourceBucket {
        if let Some(bucket) = self.buckets.read().get(label) {
            return bucket.clone();
        }

        self.buckets
            .write()
            .entry(label.to_string())
            .or_insert_with(|| SubResourceBucket::new(label))
            .clone()
    }

    /// Labels that have a bucket, sorted
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.buckets.read().keys().cloned().collect();
        labels.sort();
        labels
    }
}

/// Lazy, restartable view over a component's sub-resources.
///
/// Every call to [`iter`](Self::iter) walks the bucket as it is at that moment,
/// in registration order.
#[derive(Debug, Clone)]
pub struct SubResourceView {
    bucket: SubResourceBucket,
    include_auto_created: bool,
    include_swapped: bool,
}

impl SubResourceView {
    pub(crate) fn new(
        bucket: SubResourceBucket,
        include_auto_created: bool,
        include_swapped: bool,
    ) -> Self {
        Self {
            bucket,
            include_auto_created,
            include_swapped,
        }
    }

    pub fn iter(&self) -> SubResourceIter<'_> {
        SubResourceIter {
            entries: self.bucket.read(),
            position: 0,
            include_auto_created: self.include_auto_created,
            include_swapped: self.include_swapped,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|sub_resource| sub_resource.name.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a SubResourceView {
    type Item = Arc<SubResource>;
    type IntoIter = SubResourceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator produced by [`SubResourceView::iter`]
pub struct SubResourceIter<'a> {
    entries: RwLockReadGuard<'a, Entries>,
    position: usize,
    include_auto_created: bool,
    include_swapped: bool,
}

impl Iterator for SubResourceIter<'_> {
    type Item = Arc<SubResource>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((_, sub_resource)) = self.entries.get_index(self.position) {
            self.position += 1;
            if sub_resource.auto_created && !self.include_auto_created {
                continue;
            }
            if sub_resource.is_swapped() && !self.include_swapped {
                continue;
            }
            return Some(sub_resource.clone());
        }
        None
    }
}
