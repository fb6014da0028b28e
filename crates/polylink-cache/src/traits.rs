//! The [`ResolutionCache`] trait.

use std::sync::Arc;

use polylink_types::{Address, RawJson};

/// Memo of resolved links, keyed by address.
///
/// Implementations are shared by every document in a tree and may be called
/// from several threads at once, so they must be `Send + Sync` and tolerate
/// concurrent `get`/`set`.
pub trait ResolutionCache: Send + Sync {
    /// The cached value for `address`, or `None` if it is not cached.
    fn get(&self, address: &Address) -> Option<RawJson>;

    /// Record the resolved value for `address`. A later call for the same
    /// address replaces the earlier value.
    fn set(&self, address: &Address, value: RawJson);
}

impl<C: ResolutionCache + ?Sized> ResolutionCache for Arc<C> {
    fn get(&self, address: &Address) -> Option<RawJson> {
        (**self).get(address)
    }

    fn set(&self, address: &Address, value: RawJson) {
        (**self).set(address, value)
    }
}
