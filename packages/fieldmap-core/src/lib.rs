//! Declarative field-to-record mapping engine.
//!
//! Converts rows produced by a sequential [`FieldReader`] into typed
//! records. Record types declare per-property mapping metadata once; the
//! engine resolves it into a cached mapping table and drives the row loop
//! through one of two interchangeable dispatch strategies: [`Mapper`]
//! resolves each property accessor by name on every assignment, while
//! [`FastMapper`] resolves a direct setter once per property and reuses
//! it.
//!
//! ```
//! use fieldmap_core::{setter, FastMapper, FieldMapper, MemoryReader, Record, RecordDescriptor};
//! use fieldmap_types::{FieldDescriptor, Value};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl Record for User {
//!     fn descriptor() -> RecordDescriptor<Self> {
//!         RecordDescriptor::builder()
//!             .property("id", FieldDescriptor::named("id"), setter(|u: &mut Self| &mut u.id))
//!             .property("name", FieldDescriptor::named("name"), setter(|u: &mut Self| &mut u.name))
//!             .build()
//!     }
//! }
//!
//! let mut reader = MemoryReader::new(["id", "name"]);
//! reader.push_row([Value::from(1), Value::from("first")]);
//!
//! let users: Vec<User> = FastMapper::new()
//!     .map(reader)
//!     .collect::<Result<_, _>>()
//!     .expect("rows map cleanly");
//! assert_eq!(
//!     users,
//!     vec![User {
//!         id: 1,
//!         name: "first".to_string(),
//!     }]
//! );
//! ```

pub mod cache;
pub mod error;
pub mod mapper;
pub mod reader;
pub mod record;
pub mod table;

pub use cache::MetadataCache;
pub use error::MapError;
pub use mapper::{FastMapper, FieldMapper, Mapper, Rows};
pub use reader::{FieldReader, MemoryReader};
pub use record::{setter, Accessor, Record, RecordDescriptor, RecordDescriptorBuilder, SetterFn};
pub use table::{MappingEntry, MappingTable};
