use polylink_store::StoreError;
use polylink_types::{Address, LinkError};
use thiserror::Error;

/// Errors from resolving links or writing values to the content store.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An empty raw value was passed where a value was required.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The value does not have the link shape.
    #[error("not a link")]
    NotAReference(#[from] LinkError),

    /// The content store could not deliver the linked value.
    #[error("failed to fetch {address}")]
    FetchFailed {
        address: Address,
        #[source]
        source: StoreError,
    },

    /// The content store refused a write.
    #[error("failed to store value")]
    PutFailed(#[source] StoreError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
