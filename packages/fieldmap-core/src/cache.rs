//! Process-wide mapping metadata cache.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::record::Record;
use crate::table::MappingTable;

/// Cache of resolved mapping tables, keyed by record type identity.
///
/// Reads are lock-free: an atomic load of the current map plus a hash
/// lookup. Population is copy-on-write; the resolver runs outside any
/// critical section and the first table published for a type wins, so a
/// racing resolver's table is discarded and every caller converges on the
/// published one. Readers never observe a partially built table. Entries
/// live for the life of the cache; there is no eviction or invalidation,
/// as record declarations are assumed static for the process lifetime.
///
/// The cache is an explicit component: each mapper owns one by default,
/// and sharing one `Arc<MetadataCache>` across mappers restores the
/// process-wide resolve-once behavior.
pub struct MetadataCache {
    tables: ArcSwap<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("tables", &self.len())
            .finish()
    }
}

impl MetadataCache {
    /// Creates a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Returns the number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.load().len()
    }

    /// Returns `true` if no tables are cached.
    pub fn is_empty(&self) -> bool {
        self.tables.load().is_empty()
    }

    /// Returns `true` if a table for `T` is cached.
    pub fn contains<T: Record>(&self) -> bool {
        self.tables.load().contains_key(&TypeId::of::<T>())
    }

    /// Returns the cached table for `T`, resolving it on first use.
    pub(crate) fn get_or_resolve<T: Record>(&self) -> Arc<MappingTable<T>> {
        let key = TypeId::of::<T>();
        if let Some(table) = self.tables.load().get(&key) {
            return Self::downcast::<T>(table);
        }

        // Slow path: resolve outside the swap loop. A concurrent resolver
        // may publish first; its table wins and ours is dropped.
        let resolved: Arc<MappingTable<T>> = Arc::new(MappingTable::resolve());
        self.tables.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.entry(key)
                .or_insert_with(|| resolved.clone() as Arc<dyn Any + Send + Sync>);
            next
        });
        tracing::debug!(
            "mapping table cached for {} ({} tables total)",
            std::any::type_name::<T>(),
            self.len()
        );

        match self.tables.load().get(&key) {
            Some(table) => Self::downcast::<T>(table),
            // The rcu above inserted the key; it cannot be absent.
            None => resolved,
        }
    }

    fn downcast<T: Record>(table: &Arc<dyn Any + Send + Sync>) -> Arc<MappingTable<T>> {
        // Keyed by TypeId, so the stored table is always a MappingTable<T>.
        Arc::downcast(Arc::clone(table)).unwrap_or_else(|_| Arc::new(MappingTable::resolve()))
    }
}
