//! Error types for cell and data source operations.

use crate::model::{IndexPath, SupplementaryElementKind};

/// Result type alias for cell and data source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while vending cells or looking up items.
///
/// None of these are fatal: registering the missing key, or fixing the
/// identifier that was registered, makes the next call succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No cell configuration is registered for the derived key.
    #[error("No cell registered for key '{key}'")]
    NoCellRegisteredForKey { key: String },

    /// The host view dequeued nothing, or an instance of the wrong type,
    /// for a registered cell identifier.
    #[error("Invalid cell registered at {position} with identifier '{identifier}'")]
    InvalidCellRegistered {
        identifier: String,
        position: IndexPath,
    },

    /// The host view dequeued an instance of the wrong type for a
    /// registered supplementary view identifier.
    #[error(
        "Invalid {kind} view registered at {position} with identifier '{identifier}'"
    )]
    InvalidSupplementaryViewRegistered {
        kind: SupplementaryElementKind,
        identifier: String,
        position: IndexPath,
    },

    /// The position is beyond the item count of its section.
    #[error("No item at {position}")]
    NoItemAtIndex { position: IndexPath },

    /// A segmented data source was created without any segments.
    #[error("Segmented data source has no segments")]
    NoSegments,
}

impl Error {
    /// Create a missing cell registration error.
    pub fn no_cell_registered(key: impl Into<String>) -> Self {
        Self::NoCellRegisteredForKey { key: key.into() }
    }

    /// Create a cell type-mismatch error.
    pub fn invalid_cell(identifier: impl Into<String>, position: IndexPath) -> Self {
        Self::InvalidCellRegistered {
            identifier: identifier.into(),
            position,
        }
    }

    /// Create a supplementary view type-mismatch error.
    pub fn invalid_supplementary_view(
        kind: SupplementaryElementKind,
        identifier: impl Into<String>,
        position: IndexPath,
    ) -> Self {
        Self::InvalidSupplementaryViewRegistered {
            kind,
            identifier: identifier.into(),
            position,
        }
    }

    /// Create an out-of-range item error.
    pub fn no_item(position: IndexPath) -> Self {
        Self::NoItemAtIndex { position }
    }

    /// Returns `true` if this error means a registration is missing.
    pub fn is_missing_registration(&self) -> bool {
        matches!(self, Self::NoCellRegisteredForKey { .. })
    }
}

static_assertions::assert_impl_all!(Error: Send, Sync);
