//! The HAL resource object and its relation accessors.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::{Link, Rel};
use crate::Error;

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";

/// A relation's value: a single item or an ordered list of items.
///
/// HAL lets a relation hold either shape; which one is decided solely by
/// whether the document used a JSON array. A one-element array is still
/// `Many`.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    /// A single item (a JSON object in the document).
    One(T),
    /// An ordered list of items (a JSON array in the document).
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns `true` for the single-item shape.
    pub fn is_one(&self) -> bool {
        matches!(self, OneOrMany::One(_))
    }

    /// Borrows the items regardless of shape.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }

    fn map_document(&self, f: impl Fn(&T) -> Value) -> Value {
        match self {
            OneOrMany::One(item) => f(item),
            OneOrMany::Many(items) => Value::Array(items.iter().map(f).collect()),
        }
    }
}

/// A HAL resource object ([HAL §4]).
///
/// A resource is immutable: its state (every top-level property except
/// `_links` and `_embedded`), its links, and its embedded resources. Refreshing
/// a resource produces a new `Resource`.
///
/// ```rust
/// use hapi_client::{CustomRel, RegisteredRel, Resource};
///
/// let resource = Resource::from_json(r#"{
///     "_links": { "next": { "href": "/p2" } },
///     "_embedded": { "items": [ { "id": 1 }, { "id": 2 } ] }
/// }"#)?;
///
/// assert!(resource.state().is_empty());
/// assert_eq!(resource.link(RegisteredRel::Next)?.href(), "/p2");
/// assert_eq!(resource.embedded_resources(CustomRel::new("items")?)?.len(), 2);
/// # Ok::<(), hapi_client::Error>(())
/// ```
///
/// [HAL §4]: https://tools.ietf.org/html/draft-kelly-json-hal-07#section-4
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    state: Map<String, Value>,
    links: HashMap<Rel, OneOrMany<Link>>,
    embedded: HashMap<Rel, OneOrMany<Resource>>,
}

impl Resource {
    /// Creates a resource from its parts.
    ///
    /// `_links` and `_embedded` keys are dropped from `state`: they are never
    /// part of a resource's state.
    pub fn new(
        mut state: Map<String, Value>,
        links: HashMap<Rel, OneOrMany<Link>>,
        embedded: HashMap<Rel, OneOrMany<Resource>>,
    ) -> Self {
        state.shift_remove(LINKS_KEY);
        state.shift_remove(EMBEDDED_KEY);
        Self { state, links, embedded }
    }

    /// Parses a resource from a HAL JSON string.
    ///
    /// A blank string parses as `{}`, and so does any JSON value that is not
    /// an object. Error bodies are parsed with this tolerant rule, so an empty
    /// error response yields an empty resource rather than a parse failure.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnparsableDocument`](crate::ErrorKind::UnparsableDocument)
    /// for malformed JSON, plus any error of [`Resource::from_value`].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Builds a resource from a parsed HAL document.
    ///
    /// Relation keys are resolved with [`Rel::parse`]. For each relation a
    /// JSON array yields [`OneOrMany::Many`], anything else
    /// [`OneOrMany::One`]. A top-level value that is not an object yields an
    /// empty resource.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::UnparsableDocument`](crate::ErrorKind::UnparsableDocument)
    ///   when `_links`/`_embedded` are not objects or an embedded resource is
    ///   not an object.
    /// - [`ErrorKind::InvalidLink`](crate::ErrorKind::InvalidLink) for a
    ///   malformed link.
    /// - [`ErrorKind::InvalidRelation`](crate::ErrorKind::InvalidRelation) for
    ///   a blank relation key.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(mut object) = value else {
            return Ok(Self::default());
        };

        let links = match object.shift_remove(LINKS_KEY) {
            Some(links) => extract(LINKS_KEY, links, Link::from_value)?,
            None => HashMap::new(),
        };

        let embedded = match object.shift_remove(EMBEDDED_KEY) {
            Some(embedded) => extract(EMBEDDED_KEY, embedded, |value| {
                if !value.is_object() {
                    return Err(Error::unparsable(format!(
                        "an embedded resource must be an object, got {value}"
                    )));
                }
                Resource::from_value(value.clone())
            })?,
            None => HashMap::new(),
        };

        Ok(Self { state: object, links, embedded })
    }

    /// The resource's properties, in document order.
    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    /// Every link relation of the resource. No ordering is guaranteed.
    pub fn all_links(&self) -> &HashMap<Rel, OneOrMany<Link>> {
        &self.links
    }

    /// Every embedded relation of the resource. No ordering is guaranteed.
    pub fn all_embedded(&self) -> &HashMap<Rel, OneOrMany<Resource>> {
        &self.embedded
    }

    /// Finds the single link of a relation.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RelationNotFound`](crate::ErrorKind::RelationNotFound)
    ///   if the relation is absent, listing the link relations available.
    /// - [`ErrorKind::RelationNotUnique`](crate::ErrorKind::RelationNotUnique)
    ///   if it holds a list.
    pub fn link(&self, rel: impl Into<Rel>) -> Result<&Link, Error> {
        match lookup(&self.links, rel.into())? {
            (_, OneOrMany::One(link)) => Ok(link),
            (rel, OneOrMany::Many(_)) => Err(Error::relation_not_unique(rel)),
        }
    }

    /// Finds the list of links of a relation.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RelationNotFound`](crate::ErrorKind::RelationNotFound)
    ///   if the relation is absent.
    /// - [`ErrorKind::RelationIsUnique`](crate::ErrorKind::RelationIsUnique)
    ///   if it holds a single link.
    pub fn links(&self, rel: impl Into<Rel>) -> Result<&[Link], Error> {
        match lookup(&self.links, rel.into())? {
            (_, OneOrMany::Many(links)) => Ok(links),
            (rel, OneOrMany::One(_)) => Err(Error::relation_is_unique(rel)),
        }
    }

    /// Finds the single embedded resource of a relation.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::link`], over the embedded relations.
    pub fn embedded_resource(&self, rel: impl Into<Rel>) -> Result<&Resource, Error> {
        match lookup(&self.embedded, rel.into())? {
            (_, OneOrMany::One(resource)) => Ok(resource),
            (rel, OneOrMany::Many(_)) => Err(Error::relation_not_unique(rel)),
        }
    }

    /// Finds the list of embedded resources of a relation.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::links`], over the embedded relations.
    pub fn embedded_resources(&self, rel: impl Into<Rel>) -> Result<&[Resource], Error> {
        match lookup(&self.embedded, rel.into())? {
            (_, OneOrMany::Many(resources)) => Ok(resources),
            (rel, OneOrMany::One(_)) => Err(Error::relation_is_unique(rel)),
        }
    }

    /// Serializes the resource back to a HAL document.
    ///
    /// State keys come first, then `_links` and `_embedded`, each omitted when
    /// empty. Relation keys within them are sorted by name.
    pub fn to_document(&self) -> Value {
        let mut object = self.state.clone();

        if !self.links.is_empty() {
            let links = sorted(&self.links)
                .into_iter()
                .map(|(rel, value)| (rel.name().to_string(), value.map_document(Link::to_document)))
                .collect();
            object.insert(LINKS_KEY.to_string(), Value::Object(links));
        }

        if !self.embedded.is_empty() {
            let embedded = sorted(&self.embedded)
                .into_iter()
                .map(|(rel, value)| {
                    (rel.name().to_string(), value.map_document(Resource::to_document))
                })
                .collect();
            object.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
        }

        Value::Object(object)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

fn lookup<T>(map: &HashMap<Rel, OneOrMany<T>>, rel: Rel) -> Result<(Rel, &OneOrMany<T>), Error> {
    match map.get(&rel) {
        Some(value) => Ok((rel, value)),
        None => Err(Error::relation_not_found(rel, map.keys().cloned())),
    }
}

fn extract<T>(
    key: &str,
    value: Value,
    parse: impl Fn(&Value) -> Result<T, Error>,
) -> Result<HashMap<Rel, OneOrMany<T>>, Error> {
    let Value::Object(entries) = value else {
        return Err(Error::unparsable(format!("{key} must be an object, got {value}")));
    };

    let mut map = HashMap::with_capacity(entries.len());
    for (name, value) in &entries {
        let rel = Rel::parse(name)?;
        let parsed = match value {
            Value::Array(items) => {
                OneOrMany::Many(items.iter().map(&parse).collect::<Result<Vec<_>, _>>()?)
            },
            single => OneOrMany::One(parse(single)?),
        };
        map.insert(rel, parsed);
    }
    Ok(map)
}

fn sorted<T>(map: &HashMap<Rel, T>) -> Vec<(&Rel, &T)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()));
    entries
}
