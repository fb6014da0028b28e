//! Lazily resolving views over linked JSON documents.
//!
//! A [`Polymorph`] wraps a raw JSON value that may be, or may contain, links
//! of the form `{"/":"<address>"}`. Accessors treat links and literal values
//! the same way: reading a field returns the eventual value no matter how
//! many links sit between it and the root. Links are fetched from a
//! [`ContentStore`] only when an accessor needs them, and every fetched value
//! is memoized in a [`ResolutionCache`] shared by the whole document tree.
//!
//! ```no_run
//! use std::sync::Arc;
//! use polylink::{InMemoryContentStore, Polymorph, Resolver};
//!
//! let store = Arc::new(InMemoryContentStore::new());
//! let mut doc = Polymorph::new(Resolver::new(store));
//! doc.ingest(r#"{"foo":{"bar":"red"}}"#);
//! assert_eq!(doc.get_string("foo/bar").unwrap(), "red");
//! ```

pub mod config;
pub mod error;
pub mod polymorph;

pub use config::{CacheConfig, PolymorphConfig, StoreConfig};
pub use error::{ConfigError, PolymorphError, PolymorphResult};
pub use polymorph::{Polymorph, PolymorphSeed, PATH_SEPARATOR};

// Re-export key types
pub use polylink_cache::{BoundedCache, InMemoryCache, NoopCache, ResolutionCache};
pub use polylink_resolver::{compute_address, resolve_reference, ResolveError, Resolver};
pub use polylink_store::{ContentStore, FsContentStore, InMemoryContentStore, StoreError};
pub use polylink_types::{assert_link, is_link, link_json, Address, LinkError, Node, RawJson, LINK_KEY};
