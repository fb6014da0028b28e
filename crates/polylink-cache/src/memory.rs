//! Unbounded in-memory resolution cache.
//!
//! [`InMemoryCache`] keeps every entry for its whole lifetime. It is the
//! default cache for new documents.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use polylink_types::{Address, RawJson};

use crate::traits::ResolutionCache;

/// `HashMap` behind a `RwLock`. No eviction.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<Address, RawJson>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(address)
    }
}

impl ResolutionCache for InMemoryCache {
    fn get(&self, address: &Address) -> Option<RawJson> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
    }

    fn set(&self, address: &Address, value: RawJson) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.clone(), value);
    }
}
