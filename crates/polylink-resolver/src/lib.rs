//! Link resolution for polylink.
//!
//! Resolution turns a link `{"/":"<address>"}` into the raw value stored
//! under that address. The cache is always consulted first; the content store
//! is reached only on a miss, and only successful fetches are cached.
//!
//! - [`resolve_reference`] and [`compute_address`] are the free-standing read
//!   and write paths.
//! - [`Resolver`] bundles a store handle and a cache handle so a whole
//!   document tree can share them.

pub mod error;
pub mod resolver;

pub use error::{ResolveError, ResolveResult};
pub use resolver::{compute_address, resolve_reference, Resolver};
