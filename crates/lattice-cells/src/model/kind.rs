//! Supplementary element kinds and their registration keys.

use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of a supplementary element: a header, a footer, or a
/// toolkit-specific custom kind such as a section badge.
///
/// Kinds are compared and hashed by their [`as_str`](Self::as_str) name, the
/// string the host toolkit sees, so `Custom("header")` and `Header` are the
/// same registry key.
#[derive(Debug, Clone)]
pub enum SupplementaryElementKind {
    /// A section header.
    Header,
    /// A section footer.
    Footer,
    /// Any other kind, named by the host toolkit.
    Custom(String),
}

impl SupplementaryElementKind {
    /// Creates a kind from its toolkit name, mapping `"header"` and
    /// `"footer"` to the built-in kinds.
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "header" => Self::Header,
            "footer" => Self::Footer,
            _ => Self::Custom(name),
        }
    }

    /// Returns the kind name the host toolkit uses.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for SupplementaryElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for SupplementaryElementKind {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SupplementaryElementKind {}

impl Hash for SupplementaryElementKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for SupplementaryElementKind {
    fn from(name: &str) -> Self {
        Self::custom(name)
    }
}

/// The composite key supplementary views are registered under.
///
/// Several views of the same kind can be registered side by side, told apart
/// by `key`; the factory's supplementary key function picks one per index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SupplementaryElementIndex {
    /// The element kind.
    pub kind: SupplementaryElementKind,
    /// The caller-chosen variant key.
    pub key: String,
}

impl SupplementaryElementIndex {
    /// Creates a composite key.
    pub fn new(kind: SupplementaryElementKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

static_assertions::assert_impl_all!(SupplementaryElementKind: Send, Sync);
