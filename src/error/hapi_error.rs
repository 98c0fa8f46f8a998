//! Main error type for the HAL client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;
use crate::transport::HttpRequest;
use crate::types::{Rel, Resource};

/// The primary error type for client operations.
///
/// `Error` provides rich context for debugging and error handling:
/// - [`kind()`](Error::kind): Categorization for `match` statements
/// - [`missing_relation()`](Error::missing_relation) /
///   [`available_relations()`](Error::available_relations): lookup diagnostics
/// - [`status()`](Error::status) / [`response_body()`](Error::response_body):
///   HTTP status failures
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── relation: Option         (missing + available relations)
/// ├── response: Option         (request, status, reason, body)
/// └── source: Option           (underlying cause)
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// Relation lookup context.
    relation: Option<Box<RelationDetails>>,

    /// HTTP exchange context.
    response: Option<Box<ResponseDetails>>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

#[derive(Debug)]
struct RelationDetails {
    missing: Rel,
    available: Vec<Rel>,
}

#[derive(Debug)]
struct ResponseDetails {
    request: HttpRequest,
    status: u16,
    reason: Option<String>,
    body: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hapi_client::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidRequest, "URL is mandatory");
    /// assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            relation: None,
            response: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the relation that could not be resolved, for lookup errors.
    pub fn missing_relation(&self) -> Option<&Rel> {
        self.relation.as_ref().map(|details| &details.missing)
    }

    /// Returns every relation present in the queried map, for
    /// [`ErrorKind::RelationNotFound`].
    ///
    /// Empty for any other kind of error.
    pub fn available_relations(&self) -> &[Rel] {
        self.relation
            .as_ref()
            .map(|details| details.available.as_slice())
            .unwrap_or_default()
    }

    /// Returns the request that produced a non-2xx response.
    pub fn request(&self) -> Option<&HttpRequest> {
        self.response.as_ref().map(|details| &details.request)
    }

    /// Returns the HTTP status code for status errors.
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|details| details.status)
    }

    /// Returns the HTTP reason phrase, when the transport reported one.
    pub fn reason(&self) -> Option<&str> {
        self.response.as_ref().and_then(|details| details.reason.as_deref())
    }

    /// Returns the response body of a status error.
    ///
    /// The body is best effort: `None` when the response had none or when it
    /// could not be decoded as UTF-8 text.
    pub fn response_body(&self) -> Option<&str> {
        self.response.as_ref().and_then(|details| details.body.as_deref())
    }

    /// Parses the response body of a status error as a HAL resource.
    ///
    /// Many APIs describe failures with a HAL document (`code`, `message`,
    /// links to documentation). Returns `None` when there is no body or it is
    /// not JSON; a blank body parses as an empty resource.
    pub fn response_resource(&self) -> Option<Resource> {
        self.response_body()
            .and_then(|body| Resource::from_json(body).ok())
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// Creates an invalid relation error.
    pub fn invalid_relation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidRelation, message)
    }

    /// Creates an invalid link error.
    pub fn invalid_link(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidLink, message)
    }

    /// Creates a relation-not-found error listing the relations on offer.
    pub fn relation_not_found(missing: Rel, available: impl IntoIterator<Item = Rel>) -> Self {
        let mut available: Vec<Rel> = available.into_iter().collect();
        available.sort_by(|a, b| a.name().cmp(b.name()));
        let listed = available.iter().map(Rel::name).collect::<Vec<_>>().join(", ");
        let mut err = Self::new(
            ErrorKind::RelationNotFound,
            format!("rel not found: {missing}. Relation types available: [{listed}]"),
        );
        err.relation = Some(Box::new(RelationDetails { missing, available }));
        err
    }

    /// Creates an error for a single-value lookup on a multi-valued relation.
    pub fn relation_not_unique(rel: Rel) -> Self {
        let mut err = Self::new(
            ErrorKind::RelationNotUnique,
            format!("relation {rel} holds a list, not a single value"),
        );
        err.relation = Some(Box::new(RelationDetails { missing: rel, available: Vec::new() }));
        err
    }

    /// Creates an error for a list lookup on a single-valued relation.
    pub fn relation_is_unique(rel: Rel) -> Self {
        let mut err = Self::new(
            ErrorKind::RelationIsUnique,
            format!("relation {rel} holds a single value, not a list"),
        );
        err.relation = Some(Box::new(RelationDetails { missing: rel, available: Vec::new() }));
        err
    }

    /// Creates the status error for a non-2xx response.
    ///
    /// The kind is derived from the status with
    /// [`ErrorKind::from_http_status`].
    pub fn http_status(
        request: HttpRequest,
        status: u16,
        reason: Option<String>,
        body: Option<String>,
    ) -> Self {
        let message = match reason.as_deref() {
            Some(reason) => format!("{status} {reason}"),
            None => status.to_string(),
        };
        let mut err = Self::new(ErrorKind::from_http_status(status), message);
        err.response = Some(Box::new(ResponseDetails { request, status, reason, body }));
        err
    }

    /// Creates an unparsable document error.
    pub fn unparsable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnparsableDocument, message)
    }

    /// Creates a malformed token response error.
    pub fn malformed_token_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::MalformedTokenResponse, message)
    }

    /// Creates an empty follow chain error.
    pub fn empty_follow_chain() -> Self {
        Self::new(ErrorKind::EmptyFollowChain, "the follow chain is empty")
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a generic transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref response) = self.response {
            write!(f, " ({} {})", response.request.method, response.request.url)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::unparsable(format!("JSON error: {}", err)).with_source(err)
    }
}
