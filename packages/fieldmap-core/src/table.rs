//! Resolved mapping tables.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use fieldmap_types::Value;

use crate::error::MapError;
use crate::record::{Accessor, PropertyDescriptor, Record};

/// One resolved source-field-to-property binding.
///
/// `direct` holds the direct setter used by the fast dispatch path; it is
/// resolved lazily on the first assignment and written at most once.
pub struct MappingEntry<T> {
    /// Resolved source field name (prefix + declared name).
    source_field: String,
    /// Value substituted when the source field is null or missing.
    default_if_null: Value,
    /// Record-side property name.
    property: &'static str,
    /// Direct setter cache for the fast path.
    direct: OnceLock<Accessor<T>>,
}

impl<T> MappingEntry<T> {
    /// Returns the resolved source field name.
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    /// Returns the declared default value; [`Value::Null`] means none.
    pub fn default_if_null(&self) -> &Value {
        &self.default_if_null
    }

    /// Returns the record-side property name.
    pub fn property(&self) -> &'static str {
        self.property
    }
}

impl<T> std::fmt::Debug for MappingEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingEntry")
            .field("source_field", &self.source_field)
            .field("default_if_null", &self.default_if_null)
            .field("property", &self.property)
            .finish_non_exhaustive()
    }
}

/// Resolved, immutable mapping metadata for one record type.
///
/// Built once per type on first use and owned by the cache that built it
/// for the life of the process; only the per-entry direct-setter slots
/// are written after construction, each at most once.
pub struct MappingTable<T> {
    /// Declared properties in declaration order.
    properties: Vec<PropertyDescriptor<T>>,
    /// Mappable entries keyed by resolved source field name.
    entries: HashMap<String, MappingEntry<T>>,
}

impl<T: Record> MappingTable<T> {
    /// Resolves the mapping table from the record type's declarations.
    ///
    /// Ignored properties are excluded; a later property whose resolved
    /// source field name collides with an earlier one overwrites it. A
    /// type with no mappable properties resolves to an empty table.
    pub(crate) fn resolve() -> Self {
        let (prefix, properties) = T::descriptor().into_parts();
        let prefix = prefix.map(|p| p.prefix().to_string()).unwrap_or_default();

        let mut entries: HashMap<String, MappingEntry<T>> = HashMap::new();
        for property in &properties {
            if property.field().ignore() {
                continue;
            }
            let source_field = format!("{}{}", prefix, property.field().name());
            entries.insert(
                source_field.clone(),
                MappingEntry {
                    source_field,
                    default_if_null: property.field().default_if_null().clone(),
                    property: property.property(),
                    direct: OnceLock::new(),
                },
            );
        }

        tracing::debug!(
            "resolved mapping table for {}: {} of {} declared properties mapped",
            std::any::type_name::<T>(),
            entries.len(),
            properties.len()
        );

        Self {
            properties,
            entries,
        }
    }
}

impl<T> MappingTable<T> {
    /// Returns the resolved entries.
    pub fn entries(&self) -> impl Iterator<Item = &MappingEntry<T>> {
        self.entries.values()
    }

    /// Returns the number of mapped fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table maps no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a property declaration by record-side name.
    fn lookup(&self, property: &'static str) -> Result<&PropertyDescriptor<T>, MapError> {
        self.properties
            .iter()
            .find(|p| p.property() == property)
            .ok_or(MapError::PropertyNotFound { property })
    }

    /// Assigns `value` through a per-call, name-keyed accessor lookup.
    ///
    /// Every assignment pays the lookup; this is the baseline dispatch
    /// used as the semantic reference.
    pub(crate) fn assign_by_name(
        &self,
        entry: &MappingEntry<T>,
        record: &mut T,
        value: Value,
    ) -> Result<(), MapError> {
        let property = self.lookup(entry.property)?;
        (property.accessor().as_ref())(record, value).map_err(|source| MapError::Assign {
            property: entry.property,
            field: entry.source_field.clone(),
            source,
        })
    }

    /// Assigns `value` through the entry's direct setter, resolving and
    /// caching it on first use.
    ///
    /// Concurrent first use is safe: the slot is written at most once and
    /// losers observe the winner's setter.
    pub(crate) fn assign_direct(
        &self,
        entry: &MappingEntry<T>,
        record: &mut T,
        value: Value,
    ) -> Result<(), MapError> {
        let accessor = match entry.direct.get() {
            Some(accessor) => accessor,
            None => {
                let property = self.lookup(entry.property)?;
                entry.direct.get_or_init(|| Arc::clone(property.accessor()))
            }
        };
        (accessor.as_ref())(record, value).map_err(|source| MapError::Assign {
            property: entry.property,
            field: entry.source_field.clone(),
            source,
        })
    }
}

impl<T> std::fmt::Debug for MappingTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingTable")
            .field("properties", &self.properties.len())
            .field("entries", &self.entries)
            .finish()
    }
}
