//! Resolution caches for polylink.
//!
//! A resolution cache memoizes the raw value fetched for each address so that
//! a link resolved once is never fetched again for the lifetime of the cache.
//! Content addressing makes this safe: an address always maps to the same
//! bytes, so a cached entry can never go stale.
//!
//! # Modules
//!
//! - [`traits`] — The [`ResolutionCache`] capability trait
//! - [`memory`] — [`InMemoryCache`], unbounded, the default
//! - [`bounded`] — [`BoundedCache`], least-recently-used eviction
//! - [`noop`] — [`NoopCache`], stores nothing

pub mod bounded;
pub mod memory;
pub mod noop;
pub mod traits;

pub use bounded::BoundedCache;
pub use memory::InMemoryCache;
pub use noop::NoopCache;
pub use traits::ResolutionCache;
