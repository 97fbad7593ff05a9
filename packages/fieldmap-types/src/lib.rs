//! Shared data model for the field mapping system.
//!
//! Defines dynamically-typed field values, conversions into record
//! properties, and the declarative mapping descriptors.

pub mod field;
pub mod value;

pub use field::{FieldDescriptor, PrefixDescriptor};
pub use value::{FromValue, Value, ValueError};
