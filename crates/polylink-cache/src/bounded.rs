//! Capacity-bounded resolution cache with least-recently-used eviction.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use polylink_types::{Address, RawJson};

use crate::traits::ResolutionCache;

/// A cache holding at most `capacity` entries.
///
/// Both `get` and `set` mark an entry as recently used. When an insert would
/// exceed the capacity, the least recently used entry is dropped. A capacity
/// of zero caches nothing.
#[derive(Debug)]
pub struct BoundedCache {
    capacity: usize,
    inner: Mutex<Lru>,
}

#[derive(Debug, Default)]
struct Lru {
    entries: HashMap<Address, (RawJson, u64)>,
    recency: BTreeMap<u64, Address>,
    tick: u64,
}

impl Lru {
    fn touch(&mut self, address: &Address) -> Option<RawJson> {
        self.tick += 1;
        let tick = self.tick;
        let (value, last) = self.entries.get_mut(address)?;
        let previous = std::mem::replace(last, tick);
        self.recency.remove(&previous);
        self.recency.insert(tick, address.clone());
        Some(value.clone())
    }

    fn evict_oldest(&mut self) {
        if let Some((_, address)) = self.recency.pop_first() {
            self.entries.remove(&address);
        }
    }
}

impl BoundedCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Lru::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResolutionCache for BoundedCache {
    fn get(&self, address: &Address) -> Option<RawJson> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .touch(address)
    }

    fn set(&self, address: &Address, value: RawJson) {
        if self.capacity == 0 {
            return;
        }
        let mut lru = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((existing, _)) = lru.entries.get_mut(address) {
            *existing = value;
            lru.touch(address);
            return;
        }

        while lru.entries.len() >= self.capacity {
            lru.evict_oldest();
        }
        lru.tick += 1;
        let tick = lru.tick;
        lru.entries.insert(address.clone(), (value, tick));
        lru.recency.insert(tick, address.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::from(s)
    }

    #[test]
    fn holds_up_to_capacity() {
        let cache = BoundedCache::new(2);
        cache.set(&addr("a"), RawJson::from("1"));
        cache.set(&addr("b"), RawJson::from("2"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);

        cache.set(&addr("c"), RawJson::from("3"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&addr("a")).is_none());
        assert!(cache.get(&addr("b")).is_some());
        assert!(cache.get(&addr("c")).is_some());
    }

    #[test]
    fn get_refreshes_recency() {
        let cache = BoundedCache::new(2);
        cache.set(&addr("a"), RawJson::from("1"));
        cache.set(&addr("b"), RawJson::from("2"));
        assert!(cache.get(&addr("a")).is_some());

        cache.set(&addr("c"), RawJson::from("3"));
        assert!(cache.get(&addr("a")).is_some());
        assert!(cache.get(&addr("b")).is_none());
    }

    #[test]
    fn overwrite_does_not_grow() {
        let cache = BoundedCache::new(2);
        cache.set(&addr("a"), RawJson::from("1"));
        cache.set(&addr("a"), RawJson::from("2"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&addr("a")), Some(RawJson::from("2")));
    }

    #[test]
    fn zero_capacity_caches_nothing() {
        let cache = BoundedCache::new(0);
        cache.set(&addr("a"), RawJson::from("1"));
        assert!(cache.is_empty());
        assert!(cache.get(&addr("a")).is_none());
    }
}
