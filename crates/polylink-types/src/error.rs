use thiserror::Error;

/// Reasons a raw value failed the link shape check.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("a link cannot be empty")]
    Empty,

    #[error("invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("a link may have only one key, found: {found}")]
    TooManyKeys { found: usize },

    #[error(r#"a link must have the key "/", it was not found"#)]
    MissingLinkKey,

    #[error("link address must be a JSON string")]
    AddressNotString(#[source] serde_json::Error),
}
