//! Relation types naming links and embedded resources.

use std::fmt;
use std::hash::{Hash, Hasher};

use url::Url;

use super::RegisteredRel;
use crate::Error;

/// The relation type of a link or an embedded resource.
///
/// A relation is either one of the [`RegisteredRel`] entries or a free-form
/// [`CustomRel`] extension. Relations compare case-insensitively by name,
/// across both variants, as extension relation types must be
/// ([RFC 5988 §4.2]).
///
/// ```rust
/// use hapi_client::{CustomRel, Rel, RegisteredRel};
///
/// let next = Rel::parse("next")?;
/// assert_eq!(next, Rel::Registered(RegisteredRel::Next));
///
/// let orders = Rel::parse("https://api.example.com/alps#get-orders")?;
/// assert!(orders.is_custom());
///
/// assert_eq!(Rel::from(CustomRel::new("Find")?), Rel::from(CustomRel::new("find")?));
/// # Ok::<(), hapi_client::Error>(())
/// ```
///
/// [RFC 5988 §4.2]: https://tools.ietf.org/html/rfc5988#section-4.2
#[derive(Debug, Clone)]
pub enum Rel {
    /// A relation from the IANA registry.
    Registered(RegisteredRel),
    /// An extension relation.
    Custom(CustomRel),
}

impl Rel {
    /// Resolves a relation name as it appears in a HAL document.
    ///
    /// Registered names are looked up first (exact match); anything else
    /// becomes a [`CustomRel`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRelation`](crate::ErrorKind::InvalidRelation)
    /// if the name is blank.
    pub fn parse(name: &str) -> Result<Self, Error> {
        match RegisteredRel::from_name(name) {
            Some(registered) => Ok(Rel::Registered(registered)),
            None => CustomRel::new(name).map(Rel::Custom),
        }
    }

    /// Returns the relation name.
    pub fn name(&self) -> &str {
        match self {
            Rel::Registered(registered) => registered.name(),
            Rel::Custom(custom) => custom.name(),
        }
    }

    /// Returns `true` for registered relations.
    pub fn is_registered(&self) -> bool {
        matches!(self, Rel::Registered(_))
    }

    /// Returns `true` for extension relations.
    pub fn is_custom(&self) -> bool {
        matches!(self, Rel::Custom(_))
    }
}

impl PartialEq for Rel {
    fn eq(&self, other: &Self) -> bool {
        fold_case(self.name()).eq(fold_case(other.name()))
    }
}

impl Eq for Rel {}

impl Hash for Rel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(self.name(), state);
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<RegisteredRel> for Rel {
    fn from(registered: RegisteredRel) -> Self {
        Rel::Registered(registered)
    }
}

impl From<CustomRel> for Rel {
    fn from(custom: CustomRel) -> Self {
        Rel::Custom(custom)
    }
}

impl From<&Rel> for Rel {
    fn from(rel: &Rel) -> Self {
        rel.clone()
    }
}

/// An extension relation type ([HAL §8.2], [RFC 5988 §4]).
///
/// Extension relations SHOULD be URIs, but any non-blank string is accepted.
/// The CURIE form `prefix:reference` is supported through
/// [`CustomRel::curie`]; the resource's `curies` links are expected to define
/// the prefix.
///
/// [HAL §8.2]: https://tools.ietf.org/html/draft-kelly-json-hal-07#section-8.2
/// [RFC 5988 §4]: https://tools.ietf.org/html/rfc5988#section-4
#[derive(Debug, Clone)]
pub struct CustomRel {
    name: String,
}

impl CustomRel {
    /// Creates an extension relation from a raw name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRelation`](crate::ErrorKind::InvalidRelation)
    /// if the trimmed name is empty.
    pub fn new(name: impl AsRef<str>) -> Result<Self, Error> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::invalid_relation("the relation name can't be empty"));
        }
        Ok(Self { name: name.to_string() })
    }

    /// Creates an extension relation from a CURIE.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hapi_client::CustomRel;
    ///
    /// let rel = CustomRel::curie("acme", " get-orders ")?;
    /// assert_eq!(rel.name(), "acme:get-orders");
    /// # Ok::<(), hapi_client::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRelation`](crate::ErrorKind::InvalidRelation)
    /// if either part is blank.
    pub fn curie(prefix: impl AsRef<str>, reference: impl AsRef<str>) -> Result<Self, Error> {
        let prefix = prefix.as_ref().trim();
        let reference = reference.as_ref().trim();
        if prefix.is_empty() {
            return Err(Error::invalid_relation("the CURIE prefix can't be empty"));
        }
        if reference.is_empty() {
            return Err(Error::invalid_relation("the CURIE reference can't be empty"));
        }
        Ok(Self { name: format!("{prefix}:{reference}") })
    }

    /// Creates an extension relation from a URI.
    pub fn from_uri(uri: &Url) -> Result<Self, Error> {
        Self::new(uri.as_str())
    }

    /// Returns the relation name, as given (case preserved).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for CustomRel {
    fn eq(&self, other: &Self) -> bool {
        fold_case(&self.name).eq(fold_case(&other.name))
    }
}

impl Eq for CustomRel {}

impl Hash for CustomRel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.name, state);
    }
}

impl fmt::Display for CustomRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Unicode lowercase, char by char.
fn fold_case(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

fn hash_ignore_case<H: Hasher>(name: &str, state: &mut H) {
    for c in fold_case(name) {
        state.write_u32(u32::from(c));
    }
    state.write_u8(0xff);
}
