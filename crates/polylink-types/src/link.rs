//! The link model: detection, address extraction and encoding.
//!
//! Every component that needs to know whether a value is a link asks this
//! module, either through [`is_link`]/[`assert_link`] or through the
//! [`Node`] verdict.

use std::collections::HashMap;

use serde_json::value::RawValue;

use crate::address::Address;
use crate::error::LinkError;
use crate::raw::RawJson;

/// The only key a link object may carry.
pub const LINK_KEY: &str = "/";

/// A raw value classified as either literal data or a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Literal(RawJson),
    Link(Address),
}

impl Node {
    pub fn is_link(&self) -> bool {
        matches!(self, Node::Link(_))
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Node::Link(address) => Some(address),
            Node::Literal(_) => None,
        }
    }
}

/// Verify that `raw` is a link and return its address.
///
/// A link is a JSON object with exactly one key, `"/"`, whose value is a JSON
/// string.
pub fn assert_link(raw: &[u8]) -> Result<Address, LinkError> {
    if raw.is_empty() {
        return Err(LinkError::Empty);
    }

    let fields: HashMap<String, Box<RawValue>> =
        serde_json::from_slice(raw).map_err(LinkError::InvalidJson)?;
    if fields.len() > 1 {
        return Err(LinkError::TooManyKeys {
            found: fields.len(),
        });
    }

    let address = fields.get(LINK_KEY).ok_or(LinkError::MissingLinkKey)?;
    let address: String =
        serde_json::from_str(address.get()).map_err(LinkError::AddressNotString)?;
    Ok(Address::from(address))
}

/// Returns `true` if `raw` has the link shape. Never errors.
pub fn is_link(raw: &[u8]) -> bool {
    assert_link(raw).is_ok()
}

/// Encode `address` as a link object: `{"/":"<address>"}`.
pub fn link_json(address: &Address) -> RawJson {
    RawJson::from(serde_json::json!({ LINK_KEY: address.as_str() }).to_string())
}

impl RawJson {
    /// Classify this value as a literal or a link.
    pub fn classify(&self) -> Node {
        match assert_link(self.as_bytes()) {
            Ok(address) => Node::Link(address),
            Err(_) => Node::Literal(self.clone()),
        }
    }

    pub fn is_link(&self) -> bool {
        is_link(self.as_bytes())
    }

    /// The link address, or `None` if this value is not a link.
    pub fn link_address(&self) -> Option<Address> {
        assert_link(self.as_bytes()).ok()
    }
}

impl From<&Address> for RawJson {
    fn from(address: &Address) -> Self {
        link_json(address)
    }
}
