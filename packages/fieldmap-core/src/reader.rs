//! Field reader contract and an in-memory implementation.

use std::collections::HashMap;

use fieldmap_types::Value;

/// Sequential cursor over the rows of an external data source.
///
/// Call [`read`] before the first field access and before each subsequent
/// row, then [`get_field_value`] to fetch named values from the current
/// row. Readers are single-consumer; they carry no synchronization of
/// their own and must not be shared between concurrent mapping calls.
///
/// [`read`]: FieldReader::read
/// [`get_field_value`]: FieldReader::get_field_value
pub trait FieldReader {
    /// Advances to the next row.
    ///
    /// # Returns
    /// `true` if a row is available, `false` when the source is exhausted.
    fn read(&mut self) -> bool;

    /// Returns the current row's value for `field_name`.
    ///
    /// Returns `default_if_null` when the field is absent from the source
    /// schema or its value is the source's null marker. Lookup is
    /// exact-string and case-sensitive; an unknown field name is not an
    /// error.
    fn get_field_value(&self, field_name: &str, default_if_null: Value) -> Value;
}

/// In-memory [`FieldReader`] over a fixed column list and owned rows.
///
/// Serves as the reference adapter for cursor integrations and as the
/// test data source. [`Value::Null`] is the null marker. The
/// name-to-index map is built once, on the first [`read`] call.
///
/// [`read`]: FieldReader::read
#[derive(Debug, Default)]
pub struct MemoryReader {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    row: Option<usize>,
    index: Option<HashMap<String, usize>>,
}

impl MemoryReader {
    /// Creates a reader with the given column names and no rows.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            row: None,
            index: None,
        }
    }

    /// Appends a row of values, one per column in declaration order.
    ///
    /// A row shorter than the column list reads as [`Value::Null`] for the
    /// missing trailing columns.
    pub fn push_row<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.rows.push(values.into_iter().collect());
    }

    /// Builder-style [`push_row`].
    ///
    /// [`push_row`]: MemoryReader::push_row
    #[must_use]
    pub fn with_row<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.push_row(values);
        self
    }

    /// Returns the number of rows loaded.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl FieldReader for MemoryReader {
    fn read(&mut self) -> bool {
        let next = self.row.map_or(0, |row| row + 1);
        if next >= self.rows.len() {
            return false;
        }
        if self.index.is_none() {
            // Field lookup is by name; build the name-to-index map once.
            self.index = Some(
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), i))
                    .collect(),
            );
        }
        self.row = Some(next);
        true
    }

    fn get_field_value(&self, field_name: &str, default_if_null: Value) -> Value {
        let row = match self.row.and_then(|row| self.rows.get(row)) {
            Some(row) => row,
            None => return default_if_null,
        };
        let index = match self.index.as_ref().and_then(|index| index.get(field_name)) {
            Some(index) => *index,
            None => return default_if_null,
        };
        match row.get(index) {
            Some(value) if !value.is_null() => value.clone(),
            _ => default_if_null,
        }
    }
}
