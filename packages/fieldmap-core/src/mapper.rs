//! Mapping engines: the baseline and fast dispatch strategies.

use std::sync::Arc;

use crate::cache::MetadataCache;
use crate::error::MapError;
use crate::reader::FieldReader;
use crate::record::Record;
use crate::table::MappingTable;

/// Maps field reader rows into typed records.
///
/// Implemented by both dispatch strategies with identical semantics;
/// callers pick one explicitly.
pub trait FieldMapper {
    /// Lazily maps the reader's rows into records.
    ///
    /// The returned iterator is single-pass and forward-only: it advances
    /// the reader one row per pulled element and ends exactly when the
    /// reader is exhausted. Dropping it without pulling leaves the reader
    /// untouched.
    fn map<T, R>(&self, reader: R) -> Rows<T, R>
    where
        T: Record,
        R: FieldReader;
}

/// Dispatch mode selected by the mapper that produced a [`Rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    /// Accessor resolved by property name on every assignment.
    ByName,
    /// Direct setter resolved once per property and cached.
    Direct,
}

/// Lazy iterator of mapped records.
///
/// Yields one `Result` per source row, in source order, with no buffering
/// beyond the in-flight record; ownership of each record transfers to the
/// caller on yield. An `Err` element reports a failed assignment for that
/// row and iteration continues with the next row. Once the reader reports
/// exhaustion the iterator is terminal.
pub struct Rows<T, R> {
    reader: R,
    table: Arc<MappingTable<T>>,
    dispatch: Dispatch,
    done: bool,
}

impl<T, R> Iterator for Rows<T, R>
where
    T: Record,
    R: FieldReader,
{
    type Item = Result<T, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.reader.read() {
            self.done = true;
            return None;
        }

        let mut record = T::default();
        for entry in self.table.entries() {
            let value = self
                .reader
                .get_field_value(entry.source_field(), entry.default_if_null().clone());
            let assigned = match self.dispatch {
                Dispatch::ByName => self.table.assign_by_name(entry, &mut record, value),
                Dispatch::Direct => self.table.assign_direct(entry, &mut record, value),
            };
            if let Err(error) = assigned {
                return Some(Err(error));
            }
        }
        Some(Ok(record))
    }
}

/// Baseline mapper: every assignment resolves the property accessor by
/// name. Intentionally simple; serves as the semantic reference for the
/// fast path.
#[derive(Debug, Default)]
pub struct Mapper {
    cache: Arc<MetadataCache>,
}

impl Mapper {
    /// Creates a mapper with its own metadata cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Arc::new(MetadataCache::new()),
        }
    }

    /// Creates a mapper sharing an existing metadata cache.
    #[must_use]
    pub fn with_cache(cache: Arc<MetadataCache>) -> Self {
        Self { cache }
    }

    /// Returns the mapper's metadata cache.
    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }
}

impl FieldMapper for Mapper {
    fn map<T, R>(&self, reader: R) -> Rows<T, R>
    where
        T: Record,
        R: FieldReader,
    {
        Rows {
            reader,
            table: self.cache.get_or_resolve::<T>(),
            dispatch: Dispatch::ByName,
            done: false,
        }
    }
}

/// Fast mapper: resolves each property's direct setter once, on its first
/// assignment, and caches it in the mapping entry; later assignments call
/// the cached setter directly. Behavior-identical to [`Mapper`] for all
/// inputs; only throughput differs.
#[derive(Debug, Default)]
pub struct FastMapper {
    cache: Arc<MetadataCache>,
}

impl FastMapper {
    /// Creates a mapper with its own metadata cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Arc::new(MetadataCache::new()),
        }
    }

    /// Creates a mapper sharing an existing metadata cache.
    #[must_use]
    pub fn with_cache(cache: Arc<MetadataCache>) -> Self {
        Self { cache }
    }

    /// Returns the mapper's metadata cache.
    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }
}

impl FieldMapper for FastMapper {
    fn map<T, R>(&self, reader: R) -> Rows<T, R>
    where
        T: Record,
        R: FieldReader,
    {
        Rows {
            reader,
            table: self.cache.get_or_resolve::<T>(),
            dispatch: Dispatch::Direct,
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::MemoryReader;
    use crate::record::{setter, RecordDescriptor};
    use fieldmap_types::{FieldDescriptor, Value};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Item {
        id: i32,
        label: String,
    }

    impl Record for Item {
        fn descriptor() -> RecordDescriptor<Self> {
            RecordDescriptor::builder()
                .property(
                    "id",
                    FieldDescriptor::named("id"),
                    setter(|i: &mut Self| &mut i.id),
                )
                .property(
                    "label",
                    FieldDescriptor::named("label"),
                    setter(|i: &mut Self| &mut i.label),
                )
                .build()
        }
    }

    fn reader() -> MemoryReader {
        MemoryReader::new(["id", "label"])
            .with_row([Value::I32(1), Value::from("one")])
            .with_row([Value::I32(2), Value::from("two")])
    }

    #[test]
    fn test_map_yields_rows_in_order() {
        let mapper = Mapper::new();
        let items: Vec<Item> = mapper
            .map(reader())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            items,
            vec![
                Item {
                    id: 1,
                    label: "one".to_string(),
                },
                Item {
                    id: 2,
                    label: "two".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_rows_is_terminal_after_exhaustion() {
        let mapper = FastMapper::new();
        let mut rows = mapper.map::<Item, _>(reader());
        assert!(rows.next().is_some());
        assert!(rows.next().is_some());
        assert!(rows.next().is_none());
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_map_is_lazy() {
        let mapper = Mapper::new();
        // Building the iterator resolves metadata but pulls no rows.
        let rows = mapper.map::<Item, _>(reader());
        assert_eq!(mapper.cache().len(), 1);
        drop(rows);
    }

    #[test]
    fn test_strategies_share_a_cache() {
        let cache = Arc::new(MetadataCache::new());
        let mapper = Mapper::with_cache(Arc::clone(&cache));
        let fast = FastMapper::with_cache(Arc::clone(&cache));

        let _ = mapper.map::<Item, _>(reader()).count();
        let _ = fast.map::<Item, _>(reader()).count();
        assert_eq!(cache.len(), 1);
    }
}
