use std::fmt;
use std::sync::Arc;

use polylink_cache::{InMemoryCache, ResolutionCache};
use polylink_store::ContentStore;
use polylink_types::{assert_link, Address, Node, RawJson};
use tracing::{debug, warn};

use crate::error::{ResolveError, ResolveResult};

/// Resolve the link in `raw` to the value stored under its address.
///
/// A cache hit returns immediately without touching the store. On a miss the
/// value is fetched, cached, and returned. Failed fetches leave the cache
/// untouched.
pub fn resolve_reference(
    store: &dyn ContentStore,
    raw: &RawJson,
    cache: &dyn ResolutionCache,
) -> ResolveResult<RawJson> {
    if raw.is_empty() {
        return Err(ResolveError::InvalidInput("cannot resolve an empty value"));
    }
    let address = assert_link(raw.as_bytes())?;
    fetch_through(store, cache, &address)
}

/// The address `raw` can be fetched from, writing it to the store if needed.
///
/// A link already names its address, so no store round-trip happens for one.
pub fn compute_address(store: &dyn ContentStore, raw: &RawJson) -> ResolveResult<Address> {
    if raw.is_empty() {
        return Err(ResolveError::InvalidInput("cannot store an empty value"));
    }
    if let Some(address) = raw.link_address() {
        return Ok(address);
    }

    let address = store.put(raw.as_bytes()).map_err(ResolveError::PutFailed)?;
    debug!(%address, len = raw.len(), "stored value");
    Ok(address)
}

fn fetch_through(
    store: &dyn ContentStore,
    cache: &dyn ResolutionCache,
    address: &Address,
) -> ResolveResult<RawJson> {
    if let Some(value) = cache.get(address) {
        debug!(%address, "link resolved from cache");
        return Ok(value);
    }

    debug!(%address, "fetching linked value");
    let value = match store.fetch(address) {
        Ok(bytes) => RawJson::from(bytes),
        Err(source) => {
            warn!(%address, error = %source, "fetch failed");
            return Err(ResolveError::FetchFailed {
                address: address.clone(),
                source,
            });
        }
    };

    cache.set(address, value.clone());
    Ok(value)
}

/// A content store handle paired with the cache that fronts it.
///
/// Cloning is cheap and shares both handles, which is how every document in
/// a tree ends up resolving through the same cache.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn ContentStore>,
    cache: Arc<dyn ResolutionCache>,
}

impl Resolver {
    /// Resolve through `store` with a fresh unbounded in-memory cache.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self::with_cache(store, Arc::new(InMemoryCache::new()))
    }

    pub fn with_cache(store: Arc<dyn ContentStore>, cache: Arc<dyn ResolutionCache>) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn ResolutionCache> {
        &self.cache
    }

    /// Resolve `raw`, which must be a link.
    pub fn resolve(&self, raw: &RawJson) -> ResolveResult<RawJson> {
        resolve_reference(self.store.as_ref(), raw, self.cache.as_ref())
    }

    /// Resolve the value stored under `address`.
    pub fn resolve_address(&self, address: &Address) -> ResolveResult<RawJson> {
        fetch_through(self.store.as_ref(), self.cache.as_ref(), address)
    }

    /// Literals pass through unchanged; links are resolved.
    pub fn resolve_node(&self, node: Node) -> ResolveResult<RawJson> {
        match node {
            Node::Literal(raw) => Ok(raw),
            Node::Link(address) => self.resolve_address(&address),
        }
    }

    /// Resolve `raw` if it is a link, otherwise return it as-is.
    pub fn resolve_if_link(&self, raw: &RawJson) -> ResolveResult<RawJson> {
        self.resolve_node(raw.classify())
    }

    pub fn compute_address(&self, raw: &RawJson) -> ResolveResult<Address> {
        compute_address(self.store.as_ref(), raw)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use polylink_cache::NoopCache;
    use polylink_store::{InMemoryContentStore, StoreError, StoreResult};
    use polylink_types::LinkError;

    fn link(address: &str) -> RawJson {
        RawJson::from(format!(r#"{{"/":"{address}"}}"#))
    }

    /// A store that is unreachable.
    struct OfflineStore;

    impl ContentStore for OfflineStore {
        fn fetch(&self, address: &Address) -> StoreResult<Bytes> {
            Err(StoreError::NotFound(address.clone()))
        }

        fn put(&self, _data: &[u8]) -> StoreResult<Address> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "offline",
            )))
        }
    }

    #[test]
    fn resolves_link() {
        let store = InMemoryContentStore::new();
        store.insert("foo", &b"\"bar\""[..]);
        let cache = InMemoryCache::new();

        let value = resolve_reference(&store, &link("foo"), &cache).unwrap();
        let bar: String = value.to_value().unwrap();
        assert_eq!(bar, "bar");
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn second_resolution_is_served_from_cache() {
        let store = InMemoryContentStore::new();
        store.insert("foo", &b"\"bar\""[..]);
        let cache = InMemoryCache::new();

        resolve_reference(&store, &link("foo"), &cache).unwrap();
        store.remove(&Address::from("foo"));

        let value = resolve_reference(&store, &link("foo"), &cache).unwrap();
        assert_eq!(value, RawJson::from("\"bar\""));
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn empty_input_is_invalid() {
        let store = InMemoryContentStore::new();
        let err = resolve_reference(&store, &RawJson::default(), &NoopCache).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidInput(_)));
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn non_link_is_rejected_without_fetching() {
        let store = InMemoryContentStore::new();
        let err =
            resolve_reference(&store, &RawJson::from(r#"{"bar":"foo"}"#), &NoopCache).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::NotAReference(LinkError::MissingLinkKey)
        ));
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn missing_remote_value_fails_and_is_not_cached() {
        let store = InMemoryContentStore::new();
        let cache = InMemoryCache::new();

        let err = resolve_reference(&store, &link("foo"), &cache).unwrap_err();
        match err {
            ResolveError::FetchFailed { address, source } => {
                assert_eq!(address.as_str(), "foo");
                assert!(matches!(source, StoreError::NotFound(_)));
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        assert!(cache.is_empty());

        store.insert("foo", &b"1"[..]);
        assert!(resolve_reference(&store, &link("foo"), &cache).is_ok());
    }

    #[test]
    fn fetch_failure_names_address_once() {
        use std::error::Error as _;

        let store = InMemoryContentStore::new();
        let err = resolve_reference(&store, &link("foo"), &NoopCache).unwrap_err();
        assert_eq!(err.to_string(), "failed to fetch foo");

        let source = err.source().expect("store error is the source");
        assert_eq!(source.to_string(), "object not found: foo");
    }

    #[test]
    fn noop_cache_fetches_every_time() {
        let store = InMemoryContentStore::new();
        store.insert("foo", &b"1"[..]);
        resolve_reference(&store, &link("foo"), &NoopCache).unwrap();
        resolve_reference(&store, &link("foo"), &NoopCache).unwrap();
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn compute_address_of_link_skips_store() {
        let store = InMemoryContentStore::new();
        let address = compute_address(&store, &link("already")).unwrap();
        assert_eq!(address.as_str(), "already");
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn compute_address_writes_literal() {
        let store = InMemoryContentStore::new();
        let raw = RawJson::from(r#"{"foo":"bar"}"#);
        let address = compute_address(&store, &raw).unwrap();
        assert_eq!(store.put_count(), 1);
        assert_eq!(&store.fetch(&address).unwrap()[..], raw.as_bytes());
    }

    #[test]
    fn compute_address_propagates_put_failure() {
        let err = compute_address(&OfflineStore, &RawJson::from("1")).unwrap_err();
        assert!(matches!(err, ResolveError::PutFailed(StoreError::Io(_))));
        assert!(matches!(
            compute_address(&OfflineStore, &RawJson::default()),
            Err(ResolveError::InvalidInput(_))
        ));
    }

    #[test]
    fn resolver_shares_cache_across_clones() {
        let store = Arc::new(InMemoryContentStore::new());
        store.insert("foo", &b"true"[..]);
        let resolver = Resolver::new(store.clone());
        let clone = resolver.clone();

        resolver.resolve(&link("foo")).unwrap();
        clone.resolve(&link("foo")).unwrap();
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn resolve_if_link_passes_literals_through() {
        let store = Arc::new(InMemoryContentStore::new());
        let resolver = Resolver::new(store.clone());
        let literal = RawJson::from(r#"{"/":3}"#);
        assert_eq!(resolver.resolve_if_link(&literal).unwrap(), literal);
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn resolver_compute_address() {
        let store = Arc::new(InMemoryContentStore::new());
        let resolver = Resolver::with_cache(store.clone(), Arc::new(NoopCache));
        let address = resolver.compute_address(&RawJson::from("\"red\"")).unwrap();
        let value = resolver.resolve_address(&address).unwrap();
        assert_eq!(value, RawJson::from("\"red\""));
    }
}
