use polylink_types::Address;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No content is stored under the address.
    #[error("object not found: {0}")]
    NotFound(Address),

    /// The address is not one this backend could have produced.
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: Address, reason: String },

    /// The remote side answered with something that is not content.
    #[error("malformed response for {address}: {reason}")]
    Malformed { address: Address, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
