//! Reusable view descriptors and the host view contract.
//!
//! A list widget keeps a pool of reusable cells and supplementary views keyed
//! by identifier. This module describes the two things the factory needs from
//! that pool: registering a view class (or resource) under an identifier, and
//! dequeuing an instance for an identifier at a position.
//!
//! Dequeued instances come back type-erased as `Box<dyn Any>`, the way a
//! toolkit hands back its base view type. The factory downcasts them once, at
//! the vending boundary, and reports a mismatch as an error.

use std::any::{Any, TypeId};
use std::fmt;

use super::index::IndexPath;
use super::kind::SupplementaryElementKind;

fn construct<T: Default + 'static>() -> Box<dyn Any> {
    Box::new(T::default())
}

/// A reference to a view class that a host view can instantiate.
#[derive(Clone, Copy)]
pub struct ViewClass {
    type_id: TypeId,
    type_name: &'static str,
    construct: fn() -> Box<dyn Any>,
}

impl ViewClass {
    /// Returns the class reference for `T`.
    pub fn of<T: Default + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            construct: construct::<T>,
        }
    }

    /// The `TypeId` of the class.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type name of the class.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Creates a fresh, unconfigured instance.
    pub fn instantiate(&self) -> Box<dyn Any> {
        (self.construct)()
    }

    /// Returns `true` if this is the class of `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for ViewClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewClass").field(&self.type_name).finish()
    }
}

impl PartialEq for ViewClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ViewClass {}

/// A reference to a view layout resource (a nib, template or similar file)
/// that the host view knows how to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// The resource name.
    pub name: String,
    /// The bundle or asset directory holding the resource, if not the default.
    pub bundle: Option<String>,
}

impl ResourceRef {
    /// Creates a reference to a resource in the default bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bundle: None,
        }
    }

    /// Sets the bundle the resource lives in.
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }
}

/// Describes a reusable cell or supplementary view and its reuse identifier.
///
/// A descriptor is consumed by one registration call; only its identifier is
/// kept by the factory afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReusableViewDescriptor {
    /// A view class registered under an identifier.
    Class {
        /// The class to instantiate.
        class: ViewClass,
        /// The reuse identifier.
        identifier: String,
    },
    /// A view resource registered under an identifier.
    Resource {
        /// The resource to load.
        resource: ResourceRef,
        /// The reuse identifier.
        identifier: String,
    },
}

impl ReusableViewDescriptor {
    /// Describes the class `T` under `identifier`.
    pub fn class<T: Default + 'static>(identifier: impl Into<String>) -> Self {
        Self::Class {
            class: ViewClass::of::<T>(),
            identifier: identifier.into(),
        }
    }

    /// Describes a resource under `identifier`.
    pub fn resource(resource: ResourceRef, identifier: impl Into<String>) -> Self {
        Self::Resource {
            resource,
            identifier: identifier.into(),
        }
    }

    /// The reuse identifier.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Class { identifier, .. } | Self::Resource { identifier, .. } => identifier,
        }
    }

    /// Registers this descriptor with the reuse pool of `view` as a cell.
    pub fn register_in_view<V: ReusableViewHost + ?Sized>(&self, view: &mut V) {
        view.register_reusable(self, None);
    }

    /// Registers this descriptor with the reuse pool of `view` as a
    /// supplementary view of `kind`.
    pub fn register_in_view_for_kind<V: ReusableViewHost + ?Sized>(
        &self,
        view: &mut V,
        kind: &SupplementaryElementKind,
    ) {
        view.register_reusable(self, Some(kind));
    }
}

/// A view type that declares its own reuse identifier.
///
/// ```
/// use lattice_cells::model::{ReusableView, ReusableViewDescriptor};
///
/// #[derive(Default)]
/// struct EventCell {
///     title: String,
/// }
///
/// impl ReusableView for EventCell {
///     const REUSE_IDENTIFIER: &'static str = "EventCell";
/// }
///
/// assert_eq!(EventCell::descriptor().identifier(), "EventCell");
/// ```
pub trait ReusableView: Default + 'static {
    /// The identifier instances are pooled under.
    const REUSE_IDENTIFIER: &'static str;

    /// A class descriptor for this view type.
    fn descriptor() -> ReusableViewDescriptor {
        ReusableViewDescriptor::class::<Self>(Self::REUSE_IDENTIFIER)
    }
}

/// The reuse pool surface of a host list widget (a table or collection view).
///
/// This is all the factory consumes from the toolkit. Implementations return
/// `None` from the dequeue methods when the identifier cannot be resolved.
pub trait ReusableViewHost {
    /// Binds `descriptor`'s identifier to its class or resource.
    ///
    /// `kind` is `None` for cells and names the element kind for
    /// supplementary views.
    fn register_reusable(
        &mut self,
        descriptor: &ReusableViewDescriptor,
        kind: Option<&SupplementaryElementKind>,
    );

    /// Dequeues a reusable cell for `identifier` at `position`.
    fn dequeue_reusable_cell(
        &mut self,
        identifier: &str,
        position: IndexPath,
    ) -> Option<Box<dyn Any>>;

    /// Dequeues a reusable supplementary view of `kind` for `identifier`
    /// at `position`.
    fn dequeue_reusable_supplementary_view(
        &mut self,
        kind: &SupplementaryElementKind,
        identifier: &str,
        position: IndexPath,
    ) -> Option<Box<dyn Any>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::{RecordingView, TextCell};

    #[test]
    fn test_view_class_instantiates_its_type() {
        let class = ViewClass::of::<TextCell>();
        assert!(class.is::<TextCell>());
        assert!(!class.is::<String>());
        assert!(class.instantiate().downcast::<TextCell>().is_ok());
        assert!(class.type_name().ends_with("TextCell"));
    }

    #[test]
    fn test_descriptor_identifier() {
        let class = ReusableViewDescriptor::class::<TextCell>("Text");
        assert_eq!(class.identifier(), "Text");

        let resource = ReusableViewDescriptor::resource(
            ResourceRef::new("EventCell").with_bundle("Events"),
            "Event",
        );
        assert_eq!(resource.identifier(), "Event");
    }

    #[test]
    fn test_register_in_view() {
        let mut view = RecordingView::new();
        ReusableViewDescriptor::class::<TextCell>("Text").register_in_view(&mut view);
        ReusableViewDescriptor::class::<TextCell>("Banner")
            .register_in_view_for_kind(&mut view, &SupplementaryElementKind::Header);

        assert_eq!(
            view.registrations(),
            &[
                (None, "Text".to_string()),
                (Some(SupplementaryElementKind::Header), "Banner".to_string()),
            ]
        );
    }
}
