//! In-memory host view used by the unit tests.

use std::any::Any;
use std::collections::HashMap;

use super::index::IndexPath;
use super::kind::SupplementaryElementKind;
use super::reusable::{ReusableViewDescriptor, ReusableViewHost, ViewClass};

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct TextCell {
    pub(crate) text: String,
    pub(crate) position: Option<IndexPath>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ImageCell {
    pub(crate) name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct HeaderView {
    pub(crate) title: String,
}

type PoolKey = (Option<SupplementaryElementKind>, String);

/// A reuse pool that instantiates registered classes on every dequeue and
/// records what it was asked to do.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pool: HashMap<PoolKey, ViewClass>,
    resources: HashMap<String, ViewClass>,
    registrations: Vec<PoolKey>,
    dequeues: Vec<(String, IndexPath)>,
}

impl RecordingView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes resource `name` load as an instance of `class`.
    pub(crate) fn with_resource(mut self, name: &str, class: ViewClass) -> Self {
        self.resources.insert(name.to_string(), class);
        self
    }

    pub(crate) fn registrations(&self) -> &[PoolKey] {
        &self.registrations
    }

    pub(crate) fn dequeues(&self) -> &[(String, IndexPath)] {
        &self.dequeues
    }
}

impl ReusableViewHost for RecordingView {
    fn register_reusable(
        &mut self,
        descriptor: &ReusableViewDescriptor,
        kind: Option<&SupplementaryElementKind>,
    ) {
        let key = (kind.cloned(), descriptor.identifier().to_string());
        let class = match descriptor {
            ReusableViewDescriptor::Class { class, .. } => Some(*class),
            ReusableViewDescriptor::Resource { resource, .. } => {
                self.resources.get(&resource.name).copied()
            }
        };
        if let Some(class) = class {
            self.pool.insert(key.clone(), class);
        }
        self.registrations.push(key);
    }

    fn dequeue_reusable_cell(
        &mut self,
        identifier: &str,
        position: IndexPath,
    ) -> Option<Box<dyn Any>> {
        self.dequeues.push((identifier.to_string(), position));
        self.pool
            .get(&(None, identifier.to_string()))
            .map(ViewClass::instantiate)
    }

    fn dequeue_reusable_supplementary_view(
        &mut self,
        kind: &SupplementaryElementKind,
        identifier: &str,
        position: IndexPath,
    ) -> Option<Box<dyn Any>> {
        self.dequeues.push((identifier.to_string(), position));
        self.pool
            .get(&(Some(kind.clone()), identifier.to_string()))
            .map(ViewClass::instantiate)
    }
}
