//! Declarative mapping descriptors.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Describes the mapping between a record property and a data source field.
///
/// A property without a descriptor is excluded from mapping entirely; a
/// descriptor built with [`FieldDescriptor::ignored`] excludes it
/// explicitly. The declared default value, if any, is substituted when the
/// source field is null, unset, or missing.
///
/// # TODO: Reject empty field names
/// An empty `name` resolves to the bare type prefix, which never matches a
/// real source field. Consider returning `Result` from [`named`] once
/// callers can handle it.
///
/// [`named`]: FieldDescriptor::named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name in the data source.
    name: String,
    /// True if the property is excluded from mapping.
    ignore: bool,
    /// Value substituted when the source field is null or missing.
    default_if_null: Value,
}

impl FieldDescriptor {
    /// Creates a descriptor binding a property to the named source field.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignore: false,
            default_if_null: Value::Null,
        }
    }

    /// Creates a descriptor that excludes the property from mapping.
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            name: String::new(),
            ignore: true,
            default_if_null: Value::Null,
        }
    }

    /// Sets the value substituted when the source field is null or missing.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default_if_null = default.into();
        self
    }

    /// Returns the field name in the data source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the property is excluded from mapping.
    pub fn ignore(&self) -> bool {
        self.ignore
    }

    /// Returns the declared default value; [`Value::Null`] means none.
    pub fn default_if_null(&self) -> &Value {
        &self.default_if_null
    }
}

/// Specifies a prefix prepended to every field descriptor name declared by
/// a record type, before lookup against the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixDescriptor {
    /// Prefix prepended to the declared field names.
    prefix: String,
}

impl PrefixDescriptor {
    /// Creates a prefix descriptor.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the prefix string.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
