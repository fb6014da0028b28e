use bytes::Bytes;
use polylink_types::Address;

use crate::error::StoreResult;

/// A content-addressed store of raw bytes.
///
/// Implementations must satisfy these invariants:
/// - Content is immutable once written: the same address always yields the
///   same bytes.
/// - `fetch` of an unknown address returns [`StoreError::NotFound`].
/// - The store never interprets object contents.
/// - Implementations are shared across threads, so they must be `Send + Sync`.
///
/// [`StoreError::NotFound`]: crate::StoreError::NotFound
pub trait ContentStore: Send + Sync {
    /// Retrieve the bytes stored under `address`.
    fn fetch(&self, address: &Address) -> StoreResult<Bytes>;

    /// Store `data` and return the address it can be fetched from.
    ///
    /// Writing content that already exists is a no-op returning the same
    /// address.
    fn put(&self, data: &[u8]) -> StoreResult<Address>;
}

/// The address the bundled backends assign to `data`: hex-encoded BLAKE3.
pub fn content_address(data: &[u8]) -> Address {
    Address::from(hex::encode(blake3::hash(data).as_bytes()))
}
