//! Content store interface for polylink.
//!
//! The resolver never talks to a network or a disk directly. It goes through
//! the [`ContentStore`] trait, which takes an [`Address`] and returns raw
//! bytes, or accepts raw bytes and returns a fresh address.
//!
//! # Backends
//!
//! - [`InMemoryContentStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsContentStore`] -- one file per object under a root directory
//!
//! Both bundled backends address content by the hex-encoded BLAKE3 hash of
//! its bytes. That is a property of these backends only: callers must treat
//! addresses as opaque.
//!
//! # Design Rules
//!
//! 1. The same address always yields the same bytes.
//! 2. The store never interprets object contents.
//! 3. Timeouts, retries and cancellation belong to the backend.
//! 4. All I/O errors are propagated, never silently ignored.
//!
//! [`Address`]: polylink_types::Address

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use memory::InMemoryContentStore;
pub use traits::{content_address, ContentStore};
