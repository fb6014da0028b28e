//! Configuration for building a [`Resolver`].
//!
//! The content store and the cache are chosen explicitly, per root document.
//! Nothing is read from the environment and there is no process-wide default
//! store.
//!
//! ```toml
//! [store]
//! kind = "fs"
//! root = "/var/lib/polylink/objects"
//!
//! [cache]
//! kind = "bounded"
//! capacity = 4096
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use polylink_cache::{BoundedCache, InMemoryCache, NoopCache, ResolutionCache};
use polylink_resolver::Resolver;
use polylink_store::{ContentStore, FsContentStore, InMemoryContentStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolymorphConfig {
    pub store: StoreConfig,
    pub cache: CacheConfig,
}

/// Which content store backend to resolve links against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A fresh, empty in-memory store.
    #[default]
    Memory,
    /// A directory with one file per object.
    Fs { root: PathBuf },
}

/// Which resolution cache fronts the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CacheConfig {
    /// Unbounded, keeps every resolved link.
    #[default]
    Memory,
    /// Caches nothing.
    #[serde(rename = "none")]
    Disabled,
    /// Keeps at most `capacity` links, evicting the least recently used.
    Bounded { capacity: usize },
}

impl PolymorphConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn build_resolver(&self) -> Result<Resolver, ConfigError> {
        debug!(store = ?self.store, cache = ?self.cache, "building resolver");
        Ok(Resolver::with_cache(
            self.store.build()?,
            self.cache.build(),
        ))
    }
}

impl StoreConfig {
    pub fn build(&self) -> Result<Arc<dyn ContentStore>, ConfigError> {
        Ok(match self {
            StoreConfig::Memory => Arc::new(InMemoryContentStore::new()),
            StoreConfig::Fs { root } => Arc::new(FsContentStore::open(root)?),
        })
    }
}

impl CacheConfig {
    pub fn build(&self) -> Arc<dyn ResolutionCache> {
        match self {
            CacheConfig::Memory => Arc::new(InMemoryCache::new()),
            CacheConfig::Disabled => Arc::new(NoopCache),
            CacheConfig::Bounded { capacity } => Arc::new(BoundedCache::new(*capacity)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Polymorph;
    use polylink_store::StoreError;

    #[test]
    fn default_config() {
        let c = PolymorphConfig::default();
        assert_eq!(c.store, StoreConfig::Memory);
        assert_eq!(c.cache, CacheConfig::Memory);
        assert_eq!(PolymorphConfig::from_toml_str("").unwrap(), c);
    }

    #[test]
    fn parses_fs_store_and_bounded_cache() {
        let c = PolymorphConfig::from_toml_str(
            r#"
            [store]
            kind = "fs"
            root = "/tmp/objects"

            [cache]
            kind = "bounded"
            capacity = 16
            "#,
        )
        .unwrap();
        assert_eq!(
            c.store,
            StoreConfig::Fs {
                root: PathBuf::from("/tmp/objects")
            }
        );
        assert_eq!(c.cache, CacheConfig::Bounded { capacity: 16 });
    }

    #[test]
    fn parses_disabled_cache() {
        let c = PolymorphConfig::from_toml_str("[cache]\nkind = \"none\"\n").unwrap();
        assert_eq!(c.cache, CacheConfig::Disabled);
        assert_eq!(c.store, StoreConfig::Memory);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = PolymorphConfig::from_toml_str("[store]\nkind = \"s3\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file() {
        let err = PolymorphConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn fs_root_that_is_a_file_is_a_store_error() {
        use std::error::Error as _;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let config = PolymorphConfig {
            store: StoreConfig::Fs { root: file },
            cache: CacheConfig::Memory,
        };
        let err = config.build_resolver().unwrap_err();
        assert!(matches!(err, ConfigError::Store(StoreError::Io(_))));
        assert_eq!(err.to_string(), "failed to open content store");
        assert!(err.source().is_some());
    }

    #[test]
    fn load_and_build_fs_resolver() {
        let dir = tempfile::tempdir().unwrap();
        let objects = dir.path().join("objects");
        let config_path = dir.path().join("polylink.toml");
        let config = PolymorphConfig {
            store: StoreConfig::Fs {
                root: objects.clone(),
            },
            cache: CacheConfig::Bounded { capacity: 8 },
        };
        std::fs::write(&config_path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = PolymorphConfig::load(&config_path).unwrap();
        assert_eq!(loaded, config);

        let resolver = loaded.build_resolver().unwrap();
        let address = Polymorph::from_value(resolver.clone(), &serde_json::json!({"a": true}))
            .unwrap()
            .compute_address()
            .unwrap();
        assert!(objects.join(address.as_str()).exists());

        let doc = Polymorph::from_address(resolver, address);
        assert!(doc.get_bool("a").unwrap());
    }
}
