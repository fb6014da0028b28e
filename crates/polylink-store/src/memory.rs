use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;
use polylink_types::Address;

use crate::error::{StoreError, StoreResult};
use crate::traits::{content_address, ContentStore};

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. Content is held behind a `RwLock` for
/// safe concurrent access. The store counts calls to `fetch` and `put` so
/// tests can assert how often the remote side was reached.
pub struct InMemoryContentStore {
    objects: RwLock<HashMap<Address, Bytes>>,
    fetches: AtomicUsize,
    puts: AtomicUsize,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
        }
    }

    /// Store `data` under an explicit address, bypassing content addressing.
    ///
    /// Lets tests publish documents under readable names such as `foo-addr`.
    pub fn insert(&self, address: impl Into<Address>, data: impl Into<Bytes>) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), data.into());
    }

    /// Remove the content stored under `address`. Returns `true` if it existed.
    pub fn remove(&self, address: &Address) -> bool {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(address)
            .is_some()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `fetch` calls served so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `put` calls served so far.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn fetch(&self, address: &Address) -> StoreResult<Bytes> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let map = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        map.get(address)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(address.clone()))
    }

    fn put(&self, data: &[u8]) -> StoreResult<Address> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let address = content_address(data);
        let mut map = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        // Same address, same content: keep the first copy.
        map.entry(address.clone())
            .or_insert_with(|| Bytes::copy_from_slice(data));
        Ok(address)
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("object_count", &self.len())
            .field("fetches", &self.fetch_count())
            .field("puts", &self.put_count())
            .finish()
    }
}
