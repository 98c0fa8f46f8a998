//! The HAL link object.

use std::fmt;

use serde_json::{Map, Value};

use crate::Error;

/// A HAL link object ([HAL §5]).
///
/// Links are immutable. `href` is mandatory; every other attribute is
/// optional and `templated` defaults to `false` when absent.
///
/// ```rust
/// use hapi_client::Link;
///
/// let link = Link::new("/orders{?page}")?.with_templated(true).with_title("Orders");
/// assert!(link.is_templated());
/// assert_eq!(link.title(), Some("Orders"));
/// # Ok::<(), hapi_client::Error>(())
/// ```
///
/// [HAL §5]: https://tools.ietf.org/html/draft-kelly-json-hal-07#section-5
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    href: String,
    templated: Option<bool>,
    media_type: Option<String>,
    deprecation: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    title: Option<String>,
    hreflang: Option<String>,
}

impl Link {
    /// Creates a link with only an `href`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidLink`](crate::ErrorKind::InvalidLink) if
    /// `href` is empty.
    pub fn new(href: impl Into<String>) -> Result<Self, Error> {
        let href = href.into();
        if href.is_empty() {
            return Err(Error::invalid_link("the href property is mandatory"));
        }
        Ok(Self {
            href,
            templated: None,
            media_type: None,
            deprecation: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
        })
    }

    /// Sets the `templated` flag.
    #[must_use]
    pub fn with_templated(mut self, templated: bool) -> Self {
        self.templated = Some(templated);
        self
    }

    /// Sets the `type` hint.
    #[must_use]
    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Sets the `deprecation` URL.
    #[must_use]
    pub fn with_deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.deprecation = Some(deprecation.into());
        self
    }

    /// Sets the `name` used to tell links with the same relation apart.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `profile` URI.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Sets the human-readable `title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the `hreflang` language tag.
    #[must_use]
    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    /// The target URI, or URI template when [`is_templated`](Self::is_templated).
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Whether `href` is a URI template. `false` when absent.
    pub fn is_templated(&self) -> bool {
        self.templated.unwrap_or(false)
    }

    /// The media type hint (`type` in the document).
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// The deprecation notice URL.
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    /// The secondary key for links sharing a relation.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The profile URI of the target resource.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// The human-readable title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The language of the target resource.
    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// Builds a link from its JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidLink`](crate::ErrorKind::InvalidLink) when
    /// the value is not an object, `href` is missing, empty or not a string,
    /// or an attribute has the wrong JSON type.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_link(format!("a link must be an object, got {value}")))?;

        let href = match object.get("href") {
            Some(Value::String(href)) => href.clone(),
            Some(other) => {
                return Err(Error::invalid_link(format!("href must be a string, got {other}")));
            },
            None => return Err(Error::invalid_link("the href property is mandatory")),
        };

        let templated = match object.get("templated") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(templated)) => Some(*templated),
            Some(other) => {
                return Err(Error::invalid_link(format!(
                    "templated must be a boolean, got {other}"
                )));
            },
        };

        let mut link = Link::new(href)?;
        link.templated = templated;
        link.media_type = optional_string(object, "type")?;
        link.deprecation = optional_string(object, "deprecation")?;
        link.name = optional_string(object, "name")?;
        link.profile = optional_string(object, "profile")?;
        link.title = optional_string(object, "title")?;
        link.hreflang = optional_string(object, "hreflang")?;
        Ok(link)
    }

    /// Serializes the link back to its JSON object.
    ///
    /// Only attributes that are set are written.
    pub fn to_document(&self) -> Value {
        let mut object = Map::new();
        object.insert("href".to_string(), Value::String(self.href.clone()));
        if let Some(templated) = self.templated {
            object.insert("templated".to_string(), Value::Bool(templated));
        }
        let attributes = [
            ("type", &self.media_type),
            ("deprecation", &self.deprecation),
            ("name", &self.name),
            ("profile", &self.profile),
            ("title", &self.title),
            ("hreflang", &self.hreflang),
        ];
        for (key, value) in attributes {
            if let Some(value) = value {
                object.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        Value::Object(object)
    }
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Result<Option<String>, Error> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(Error::invalid_link(format!("{key} must be a string, got {other}"))),
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}
