//! Record declarations: the per-type mapping metadata surface.
//!
//! Rust has no attribute reflection, so the declarative metadata the
//! engine consumes is stated once per record type through
//! [`Record::descriptor`], using a builder over explicit descriptors and
//! property accessors.

use std::fmt;
use std::sync::Arc;

use fieldmap_types::{FieldDescriptor, FromValue, PrefixDescriptor, Value, ValueError};

/// Type alias for property setter function signature.
pub type SetterFn<T> = dyn Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync;

/// Shared handle to a property setter.
pub type Accessor<T> = Arc<SetterFn<T>>;

/// A type mappable from a field reader's rows.
///
/// Instances are produced with [`Default`], so every property keeps its
/// zero-value unless a mapped field writes it. The descriptor is resolved
/// into a mapping table once per type and cached; declarations are
/// assumed static for the process lifetime.
pub trait Record: Default + 'static {
    /// Declarative mapping metadata for this record type.
    fn descriptor() -> RecordDescriptor<Self>;
}

/// Wraps a field projection into a property accessor.
///
/// The returned accessor converts the incoming [`Value`] through
/// [`FromValue`] and writes the result into the projected field:
///
/// ```
/// use fieldmap_core::setter;
///
/// #[derive(Default)]
/// struct Person {
///     id: i32,
/// }
///
/// let set_id = setter(|p: &mut Person| &mut p.id);
/// # let _ = set_id;
/// ```
pub fn setter<T, V, F>(project: F) -> Accessor<T>
where
    V: FromValue,
    F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
{
    Arc::new(move |record: &mut T, value: Value| {
        *project(record) = V::from_value(value)?;
        Ok(())
    })
}

/// Declares one mappable property of a record type.
pub struct PropertyDescriptor<T> {
    /// Record-side property name, used for diagnostics and accessor lookup.
    property: &'static str,
    /// Source-side field declaration.
    field: FieldDescriptor,
    /// Setter writing a converted value into the property.
    accessor: Accessor<T>,
}

impl<T> PropertyDescriptor<T> {
    /// Returns the record-side property name.
    pub fn property(&self) -> &'static str {
        self.property
    }

    /// Returns the property's field declaration.
    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    /// Returns the property's setter.
    pub fn accessor(&self) -> &Accessor<T> {
        &self.accessor
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            property: self.property,
            field: self.field.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("property", &self.property)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Complete mapping declaration for a record type: an optional field-name
/// prefix and the flattened property list.
#[derive(Debug)]
pub struct RecordDescriptor<T> {
    prefix: Option<PrefixDescriptor>,
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T> RecordDescriptor<T> {
    /// Starts an empty declaration.
    #[must_use]
    pub fn builder() -> RecordDescriptorBuilder<T> {
        RecordDescriptorBuilder {
            prefix: None,
            properties: Vec::new(),
        }
    }

    /// Returns the declared prefix, if any.
    pub fn prefix(&self) -> Option<&PrefixDescriptor> {
        self.prefix.as_ref()
    }

    /// Returns the declared properties in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor<T>] {
        &self.properties
    }

    pub(crate) fn into_parts(self) -> (Option<PrefixDescriptor>, Vec<PropertyDescriptor<T>>) {
        (self.prefix, self.properties)
    }
}

/// Builder for record descriptors.
#[derive(Debug)]
pub struct RecordDescriptorBuilder<T> {
    prefix: Option<PrefixDescriptor>,
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T> RecordDescriptorBuilder<T> {
    /// Sets the field-name prefix for the whole record type.
    ///
    /// Only one prefix is honored; the first call wins and later calls are
    /// ignored.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        if self.prefix.is_none() {
            self.prefix = Some(PrefixDescriptor::new(prefix));
        }
        self
    }

    /// Declares a mappable property.
    ///
    /// Only one declaration per property name is honored; the first wins
    /// and later re-declarations are dropped.
    #[must_use]
    pub fn property(
        mut self,
        property: &'static str,
        field: FieldDescriptor,
        accessor: Accessor<T>,
    ) -> Self {
        if self.properties.iter().all(|p| p.property != property) {
            self.properties.push(PropertyDescriptor {
                property,
                field,
                accessor,
            });
        }
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> RecordDescriptor<T> {
        RecordDescriptor {
            prefix: self.prefix,
            properties: self.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        id: i32,
        name: String,
    }

    #[test]
    fn test_setter_converts_and_writes() {
        let set_id = setter(|s: &mut Sample| &mut s.id);
        let mut sample = Sample::default();

        (set_id.as_ref())(&mut sample, Value::I32(5)).unwrap();
        assert_eq!(sample.id, 5);

        // Null writes the zero-value.
        (set_id.as_ref())(&mut sample, Value::Null).unwrap();
        assert_eq!(sample.id, 0);

        // Mismatch propagates the conversion error.
        let result = (set_id.as_ref())(&mut sample, Value::Bool(true));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_collects_declarations() {
        let descriptor = RecordDescriptor::<Sample>::builder()
            .prefix("pref.")
            .property(
                "id",
                FieldDescriptor::named("id"),
                setter(|s: &mut Sample| &mut s.id),
            )
            .property(
                "name",
                FieldDescriptor::named("name"),
                setter(|s: &mut Sample| &mut s.name),
            )
            .build();

        assert_eq!(descriptor.prefix().unwrap().prefix(), "pref.");
        assert_eq!(descriptor.properties().len(), 2);
        assert_eq!(descriptor.properties()[0].property(), "id");
        assert_eq!(descriptor.properties()[1].property(), "name");
    }

    #[test]
    fn test_first_prefix_wins() {
        let descriptor = RecordDescriptor::<Sample>::builder()
            .prefix("first.")
            .prefix("second.")
            .build();

        assert_eq!(descriptor.prefix().unwrap().prefix(), "first.");
    }

    #[test]
    fn test_first_property_declaration_wins() {
        let descriptor = RecordDescriptor::<Sample>::builder()
            .property(
                "id",
                FieldDescriptor::named("id"),
                setter(|s: &mut Sample| &mut s.id),
            )
            .property(
                "id",
                FieldDescriptor::named("other"),
                setter(|s: &mut Sample| &mut s.id),
            )
            .build();

        assert_eq!(descriptor.properties().len(), 1);
        assert_eq!(descriptor.properties()[0].field().name(), "id");
    }
}
