use polylink_types::{Address, RawJson};

use crate::traits::ResolutionCache;

/// A cache that remembers nothing. Every resolution reaches the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl ResolutionCache for NoopCache {
    fn get(&self, _address: &Address) -> Option<RawJson> {
        None
    }

    fn set(&self, _address: &Address, _value: RawJson) {}
}
