use std::path::PathBuf;

use polylink_resolver::ResolveError;
use polylink_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolymorphError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(r#"no value found at path "{path}""#)]
    PathNotFound { path: String },

    #[error("failed to decode {context}")]
    DecodingFailed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value")]
    EncodingFailed(#[source] serde_json::Error),

    #[error("no value has been ingested")]
    EmptyValue,
}

pub type PolymorphResult<T> = Result<T, PolymorphError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    Parse(#[from] toml::de::Error),

    #[error("failed to open content store")]
    Store(#[from] StoreError),
}
