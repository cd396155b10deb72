//! Resource identifiers and the `"<collection>/<id>"` naming convention.
//!
//! A [`ResourceId`] is a random v4 UUID generated once per creation. The
//! externally visible handle is a [`ResourceName`], which pairs the id with
//! the [`Collection`] it belongs to. Names are also used as page tokens.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Unique identifier for a stored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Create a new random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A named grouping of resources, the first segment of a resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collection {
    name: &'static str,
    entity: &'static str,
}

impl Collection {
    /// Usage events: `events/<id>`.
    pub const EVENTS: Collection = Collection::new("events", "event");
    /// Uploaded images: `images/<id>`.
    pub const IMAGES: Collection = Collection::new("images", "image");

    /// Define a collection from its plural name segment and singular entity
    /// label (used in error messages).
    pub const fn new(name: &'static str, entity: &'static str) -> Self {
        Self { name, entity }
    }

    /// The collection segment, e.g. `"events"`.
    pub fn as_str(&self) -> &'static str {
        self.name
    }

    /// Singular label for a member of this collection, e.g. `"event"`.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Generate a fresh, unique name in this collection.
    pub fn generate_name(&self) -> ResourceName {
        ResourceName {
            collection: *self,
            id: ResourceId::new().to_string(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Formatted resource identifier of the form `"<collection>/<id>"`.
///
/// Names are derived once from the generated id and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    collection: Collection,
    id: String,
}

impl ResourceName {
    /// Parse `name` as a member of `collection`.
    ///
    /// The id segment is not required to be a UUID: a well-formed but unknown
    /// token is left for the store lookup to reject with `NotFound`.
    pub fn parse(collection: Collection, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_argument("name is required"));
        }

        let invalid = || {
            Error::invalid_argument(format!(
                "invalid {} name format: {name}",
                collection.entity()
            ))
        };

        let id = name
            .strip_prefix(collection.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(invalid)?;

        if id.is_empty() || id.contains('/') || id.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            collection,
            id: id.to_string(),
        })
    }

    /// The collection this name belongs to.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// The id segment.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl Serialize for ResourceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn ids_are_unique() {
        let a = ResourceId::new();
        let b = ResourceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_v4() {
        let id = ResourceId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn display_and_from_str() {
        let id = ResourceId::new();
        let parsed: ResourceId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_from_str() {
        assert!(ResourceId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn generated_name_format() {
        let name = Collection::EVENTS.generate_name();
        let s = name.to_string();
        assert!(s.starts_with("events/"));
        assert!(ResourceId::from_str(name.id()).is_ok());
        assert_eq!(s.len(), "events/".len() + 36);
    }

    #[test]
    fn parse_roundtrip() {
        let name = Collection::IMAGES.generate_name();
        let parsed = ResourceName::parse(Collection::IMAGES, &name.to_string()).unwrap();
        assert_eq!(parsed, name);
        assert_eq!(parsed.collection(), Collection::IMAGES);
    }

    #[test]
    fn parse_accepts_unknown_token() {
        let parsed = ResourceName::parse(Collection::EVENTS, "events/does-not-exist").unwrap();
        assert_eq!(parsed.id(), "does-not-exist");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = ResourceName::parse(Collection::EVENTS, "").unwrap_err();
        assert_eq!(err, Error::invalid_argument("name is required"));
    }

    #[test]
    fn parse_rejects_wrong_collection() {
        let err = ResourceName::parse(Collection::EVENTS, "images/abc").unwrap_err();
        assert_matches!(err, Error::InvalidArgument(msg) if msg.contains("invalid event name format"));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            "events",
            "events/",
            "eventsabc",
            "events/a/b",
            "events/a b",
            "/events/abc",
            "xevents/abc",
        ] {
            assert_matches!(
                ResourceName::parse(Collection::EVENTS, bad),
                Err(Error::InvalidArgument(_)),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn serializes_as_string() {
        let name = ResourceName::parse(Collection::EVENTS, "events/abc").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"events/abc\"");
    }
}
