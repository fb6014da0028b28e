//! The [`Polymorph`] document wrapper.
//!
//! A `Polymorph` goes through two phases. Ingesting bytes stores them
//! verbatim and cannot fail. Materializing (the `as_*` and `get_*` accessors)
//! parses, resolves links through the shared [`Resolver`], and reports any
//! problem as a [`PolymorphError`].
//!
//! # Paths
//!
//! Paths are field names joined by [`PATH_SEPARATOR`], e.g. `"foo/bar"`.
//! There is no escaping: a field name that itself contains `/` cannot be
//! addressed.

use std::collections::HashMap;
use std::fmt;

use serde::de::{DeserializeOwned, DeserializeSeed};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use polylink_resolver::Resolver;
use polylink_types::{link_json, Address, RawJson};

use crate::error::{PolymorphError, PolymorphResult};

/// Separates field names in a traversal path.
pub const PATH_SEPARATOR: char = '/';

/// How far a path walk resolves its final segment.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Terminal {
    Resolve,
    Keep,
}

/// A JSON value that treats links and literals the same.
///
/// Links are resolved lazily, only when an accessor needs the value behind
/// them, and the result is memoized in the resolver's cache. Children
/// returned by the `get_*` methods share this value's resolver, so a link
/// fetched anywhere in the tree is never fetched again.
#[derive(Clone)]
pub struct Polymorph {
    resolver: Resolver,
    raw: Option<RawJson>,
}

impl Polymorph {
    /// An empty value bound to `resolver`. Call [`ingest`](Self::ingest)
    /// before reading from it.
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver, raw: None }
    }

    /// A value that is a link to `address`, resolved on first access.
    pub fn from_address(resolver: Resolver, address: impl Into<Address>) -> Self {
        Self::from_raw(resolver, link_json(&address.into()))
    }

    /// A value holding the JSON serialization of `value`.
    pub fn from_value<T: Serialize + ?Sized>(resolver: Resolver, value: &T) -> PolymorphResult<Self> {
        let raw = RawJson::from_value(value).map_err(PolymorphError::EncodingFailed)?;
        Ok(Self::from_raw(resolver, raw))
    }

    pub fn from_raw(resolver: Resolver, raw: impl Into<RawJson>) -> Self {
        Self {
            resolver,
            raw: Some(raw.into()),
        }
    }

    /// Store `bytes` as this value's raw JSON, replacing any previous value.
    ///
    /// Nothing is parsed or fetched here; malformed input surfaces later from
    /// whichever accessor first needs to read it.
    pub fn ingest(&mut self, bytes: impl Into<RawJson>) {
        self.raw = Some(bytes.into());
    }

    pub fn raw(&self) -> Option<&RawJson> {
        self.raw.as_ref()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The bytes last ingested, exactly as given. Links are returned as the
    /// link object, not the value behind it.
    pub fn encode(&self) -> PolymorphResult<RawJson> {
        self.current().cloned()
    }

    /// Structural check only; never fetches. An empty value is not a link.
    pub fn is_link(&self) -> bool {
        self.raw.as_ref().is_some_and(RawJson::is_link)
    }

    /// The link address if this value is a link, `None` otherwise.
    pub fn as_link_address(&self) -> Option<Address> {
        self.raw.as_ref().and_then(RawJson::link_address)
    }

    /// The address this value can be fetched from.
    ///
    /// A link answers with its own address. Any other value is written to the
    /// content store.
    pub fn compute_address(&self) -> PolymorphResult<Address> {
        Ok(self.resolver.compute_address(self.current()?)?)
    }

    /// The raw value, resolved if it is a link.
    pub fn as_raw(&self) -> PolymorphResult<RawJson> {
        Ok(self.resolver.resolve_if_link(self.current()?)?)
    }

    pub fn as_bool(&self) -> PolymorphResult<bool> {
        self.as_type()
    }

    pub fn as_string(&self) -> PolymorphResult<String> {
        self.as_type()
    }

    /// Resolve if needed, then decode into `T`.
    pub fn as_type<T: DeserializeOwned>(&self) -> PolymorphResult<T> {
        let raw = self.as_raw()?;
        raw.to_value().map_err(|source| PolymorphError::DecodingFailed {
            context: format!("value as {}", std::any::type_name::<T>()),
            source,
        })
    }

    /// The raw value at `path`, resolving every link along the way including
    /// the one at the end.
    pub fn get_raw(&self, path: &str) -> PolymorphResult<RawJson> {
        self.walk(path, Terminal::Resolve)
    }

    /// Like [`get_raw`](Self::get_raw), but a link at the final segment is
    /// returned as the link itself.
    pub fn get_unresolved_raw(&self, path: &str) -> PolymorphResult<RawJson> {
        self.walk(path, Terminal::Keep)
    }

    pub fn get_polymorph(&self, path: &str) -> PolymorphResult<Polymorph> {
        let raw = self.get_raw(path)?;
        Ok(self.child(raw))
    }

    pub fn get_unresolved_polymorph(&self, path: &str) -> PolymorphResult<Polymorph> {
        let raw = self.get_unresolved_raw(path)?;
        Ok(self.child(raw))
    }

    pub fn get_bool(&self, path: &str) -> PolymorphResult<bool> {
        self.get_polymorph(path)?.as_bool()
    }

    pub fn get_string(&self, path: &str) -> PolymorphResult<String> {
        self.get_polymorph(path)?.as_string()
    }

    pub fn get_type<T: DeserializeOwned>(&self, path: &str) -> PolymorphResult<T> {
        self.get_polymorph(path)?.as_type()
    }

    fn current(&self) -> PolymorphResult<&RawJson> {
        self.raw.as_ref().ok_or(PolymorphError::EmptyValue)
    }

    fn child(&self, raw: RawJson) -> Polymorph {
        Self::from_raw(self.resolver.clone(), raw)
    }

    fn walk(&self, path: &str, terminal: Terminal) -> PolymorphResult<RawJson> {
        let mut current = self.resolver.resolve_if_link(self.current()?)?;

        let mut segments = path.split(PATH_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let mut fields: HashMap<String, Box<RawValue>> =
                serde_json::from_slice(current.as_bytes()).map_err(|source| {
                    PolymorphError::DecodingFailed {
                        context: format!(r#"object at "{segment}" in path "{path}""#),
                        source,
                    }
                })?;

            let field = fields
                .remove(segment)
                .ok_or_else(|| PolymorphError::PathNotFound {
                    path: path.to_string(),
                })?;
            let raw = RawJson::from(String::from(field.get()));

            current = if terminal == Terminal::Keep && segments.peek().is_none() {
                raw
            } else {
                self.resolver.resolve_if_link(&raw)?
            };
        }
        Ok(current)
    }
}

impl fmt::Debug for Polymorph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polymorph").field("raw", &self.raw).finish()
    }
}

/// Embeds the ingested bytes verbatim; links stay unresolved.
impl Serialize for Polymorph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            Some(raw) => raw.serialize(serializer),
            None => Err(S::Error::custom(PolymorphError::EmptyValue)),
        }
    }
}

/// Deserializes a [`Polymorph`] bound to a resolver.
///
/// `Polymorph` has no plain `Deserialize` impl because every value needs a
/// store to resolve against. The seed supplies one; the captured bytes are
/// kept verbatim, so links inside stay lazy.
///
/// ```
/// use std::sync::Arc;
/// use polylink::{InMemoryContentStore, PolymorphSeed, Resolver};
/// use serde::de::DeserializeSeed;
///
/// let resolver = Resolver::new(Arc::new(InMemoryContentStore::new()));
/// let mut de = serde_json::Deserializer::from_str(r#"{"a": true}"#);
/// let doc = PolymorphSeed::new(resolver).deserialize(&mut de).unwrap();
/// assert!(doc.get_bool("a").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct PolymorphSeed {
    resolver: Resolver,
}

impl PolymorphSeed {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl<'de> DeserializeSeed<'de> for PolymorphSeed {
    type Value = Polymorph;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Polymorph, D::Error> {
        let raw = RawJson::deserialize(deserializer)?;
        Ok(Polymorph::from_raw(self.resolver, raw))
    }
}
