//! Foundation types for polylink.
//!
//! This crate provides the value and identity types every other polylink
//! crate depends on, and owns the single structural definition of a link.
//!
//! # Key Types
//!
//! - [`Address`] — Opaque content-store address
//! - [`RawJson`] — Immutable, unparsed JSON bytes
//! - [`Node`] — Tagged verdict: literal value or link to an address
//! - [`LinkError`] — Why a value is not a link
//!
//! # Links
//!
//! A link is a JSON object with exactly one key, `"/"`, whose value is a JSON
//! string: `{"/":"<address>"}`. Anything else is an ordinary literal. The
//! check is purely structural and never performs I/O.

pub mod address;
pub mod error;
pub mod link;
pub mod raw;

pub use address::Address;
pub use error::LinkError;
pub use link::{assert_link, is_link, link_json, Node, LINK_KEY};
pub use raw::RawJson;
