use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use polylink_types::Address;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{content_address, ContentStore};

/// Filesystem content store: one file per object, named by its address.
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so readers never observe a partially written object. Reads
/// re-hash the content and reject files whose bytes no longer match their
/// address.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, address: &Address) -> StoreResult<PathBuf> {
        let name = address.as_str();
        if name.len() != 64 || !name.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidAddress {
                address: address.clone(),
                reason: "expected 64 hex characters".into(),
            });
        }
        Ok(self.root.join(name))
    }
}

impl ContentStore for FsContentStore {
    fn fetch(&self, address: &Address) -> StoreResult<Bytes> {
        let path = self.object_path(address)?;
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(address.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if content_address(&data) != *address {
            return Err(StoreError::Malformed {
                address: address.clone(),
                reason: "content hash does not match address".into(),
            });
        }
        Ok(Bytes::from(data))
    }

    fn put(&self, data: &[u8]) -> StoreResult<Address> {
        let address = content_address(data);
        let path = self.object_path(&address)?;
        if path.exists() {
            return Ok(address);
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(%address, len = data.len(), "object written");
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).unwrap();

        let address = store.put(br#"{"foo":"bar"}"#).unwrap();
        assert!(dir.path().join(address.as_str()).exists());

        let data = store.fetch(&address).unwrap();
        assert_eq!(&data[..], br#"{"foo":"bar"}"#);
    }

    #[test]
    fn put_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).unwrap();
        let a = store.put(b"1").unwrap();
        let b = store.put(b"1").unwrap();
        assert_eq!(a, b);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn open_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("objects");
        let store = FsContentStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).unwrap();
        let err = store.fetch(&content_address(b"never written")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn rejects_path_like_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).unwrap();
        let err = store.fetch(&Address::from("../etc/passwd")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAddress { .. }));
    }

    #[test]
    fn detects_tampered_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsContentStore::open(dir.path()).unwrap();
        let address = store.put(b"\"original\"").unwrap();
        std::fs::write(dir.path().join(address.as_str()), b"\"tampered\"").unwrap();

        let err = store.fetch(&address).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }
}
