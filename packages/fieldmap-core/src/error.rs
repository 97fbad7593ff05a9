//! Mapping engine error types.

use fieldmap_types::ValueError;
use thiserror::Error;

/// Mapping operation errors.
///
/// The engine performs no local recovery: an assignment failure is
/// surfaced for the affected row and error policy stays with the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// A source value could not be assigned to the target property.
    #[error("cannot assign field '{field}' to property '{property}': {source}")]
    Assign {
        /// Record-side property name.
        property: &'static str,
        /// Resolved source field name.
        field: String,
        /// The underlying conversion failure.
        source: ValueError,
    },

    /// A mapping entry references a property missing from the record's
    /// declarations. Unreachable through the public API; kept so dispatch
    /// stays total instead of panicking.
    #[error("property '{property}' is not declared by the record type")]
    PropertyNotFound {
        /// Record-side property name.
        property: &'static str,
    },
}
