//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes.
///
/// ## Families
///
/// | Family          | Kinds                                                        | Raised by                 |
/// |-----------------|--------------------------------------------------------------|---------------------------|
/// | Construction    | `InvalidRelation`, `InvalidLink`                             | relation / link builders  |
/// | Lookup          | `RelationNotFound`, `RelationNotUnique`, `RelationIsUnique` | `Resource` accessors      |
/// | HTTP status     | `Redirection`, `ClientError`, `ServerError`, `HttpFailure`   | response classification   |
/// | Parsing         | `UnparsableDocument`                                         | HAL parsing               |
/// | Credentials     | `MalformedTokenResponse`                                     | OAuth2 token exchange     |
/// | Caller misuse   | `EmptyFollowChain`, `InvalidRequest`, `Configuration`        | client entry points       |
/// | Transport       | `Connection`, `Timeout`, `Transport`                         | the HTTP transport        |
///
/// None of these are retried by the client. The only retry it performs is the
/// single re-authorization after a `401 Unauthorized` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A relation type could not be built (blank name, prefix or reference).
    #[error("invalid relation")]
    InvalidRelation,

    /// A link object is malformed (missing or empty `href`, wrong attribute types).
    #[error("invalid link")]
    InvalidLink,

    /// The requested relation is absent from the queried map.
    ///
    /// Use [`Error::available_relations()`](crate::Error::available_relations)
    /// to list what the resource does offer.
    #[error("relation not found")]
    RelationNotFound,

    /// A single value was requested but the relation holds a list.
    #[error("relation not unique")]
    RelationNotUnique,

    /// A list was requested but the relation holds a single value.
    #[error("relation is unique")]
    RelationIsUnique,

    /// A body could not be decoded as text or parsed as a HAL document.
    #[error("unparsable document")]
    UnparsableDocument,

    /// The server answered with a 3xx status.
    ///
    /// Redirects are never followed.
    #[error("redirection")]
    Redirection,

    /// The server answered with a 4xx status.
    #[error("client error")]
    ClientError,

    /// The server answered with a 5xx status.
    #[error("server error")]
    ServerError,

    /// The server answered with a status outside the 2xx-5xx ranges.
    #[error("http failure")]
    HttpFailure,

    /// The token endpoint answered without `access_token` or `expires_in`.
    ///
    /// This is a configuration problem on one side or the other and is
    /// never retried.
    #[error("malformed token response")]
    MalformedTokenResponse,

    /// A chained follow was requested with no follows at all.
    #[error("empty follow chain")]
    EmptyFollowChain,

    /// The request itself is unusable (blank URL, invalid header value).
    #[error("invalid request")]
    InvalidRequest,

    /// Configuration error (invalid URL, missing transport).
    #[error("configuration error")]
    Configuration,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// The transport gave up waiting for the server.
    #[error("timeout")]
    Timeout,

    /// Any other transport-level failure.
    #[error("transport error")]
    Transport,
}

impl ErrorKind {
    /// Returns `true` for the relation lookup failures.
    ///
    /// Lookup failures are recoverable: the navigation engine itself treats a
    /// missing embedded relation as "go to the network instead".
    #[inline]
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            ErrorKind::RelationNotFound | ErrorKind::RelationNotUnique | ErrorKind::RelationIsUnique
        )
    }

    /// Returns `true` if the error classifies a non-2xx HTTP response.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hapi_client::ErrorKind;
    ///
    /// assert!(ErrorKind::ClientError.is_http_status());
    /// assert!(!ErrorKind::Connection.is_http_status());
    /// ```
    #[inline]
    pub fn is_http_status(&self) -> bool {
        matches!(
            self,
            ErrorKind::Redirection
                | ErrorKind::ClientError
                | ErrorKind::ServerError
                | ErrorKind::HttpFailure
        )
    }

    /// Returns `true` if the failure happened below HTTP, in the transport.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport)
    }

    /// Classifies a non-success HTTP status code.
    ///
    /// `2xx` codes are not errors and map to `HttpFailure` like any other
    /// out-of-range code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            300..=399 => ErrorKind::Redirection,
            400..=499 => ErrorKind::ClientError,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::HttpFailure,
        }
    }
}
