//! The HTTP transport abstraction.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::BoxFuture;

use crate::request::{Headers, Method};
use crate::Error;

/// A type alias for the boxed future returned by transports.
pub type TransportFuture<'a> = BoxFuture<'a, Result<HttpResponse, Error>>;

/// A concrete HTTP request, ready to be sent.
///
/// The `Debug` output redacts the `Authorization` header.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// The request method.
    pub method: Method,
    /// The absolute URL.
    pub url: String,
    /// Header fields, in sending order.
    pub headers: Headers,
    /// The encoded body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }
}

/// An HTTP response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The status code.
    pub status: u16,
    /// The reason phrase, if known.
    pub reason: Option<String>,
    /// Header fields.
    pub headers: Headers,
    /// The body, `None` if it could not be read.
    pub body: Option<Bytes>,
}

impl HttpResponse {
    /// Creates a response with an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            reason: None,
            headers: Headers::new(),
            body: Some(Bytes::new()),
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body and its `Content-Type`.
    #[must_use]
    pub fn with_json(self, document: &serde_json::Value) -> Self {
        self.with_header("Content-Type", "application/hal+json")
            .with_body(document.to_string())
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    /// Sets the reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Decodes the body as UTF-8 text.
    ///
    /// Returns `None` when the body is missing or is not valid UTF-8.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .and_then(|body| std::str::from_utf8(body).ok())
            .map(str::to_string)
    }
}

/// Sends HTTP requests on behalf of the client.
///
/// The client never retries at this level: a transport error is returned to
/// the caller as-is. Timeouts and connection pooling belong to the transport.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn HttpTransport>`.
///
/// ## Example
///
/// ```rust
/// use hapi_client::transport::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};
///
/// #[derive(Debug)]
/// struct Teapot;
///
/// impl HttpTransport for Teapot {
///     fn execute(&self, _request: HttpRequest) -> TransportFuture<'_> {
///         Box::pin(async { Ok(HttpResponse::new(418)) })
///     }
/// }
/// ```
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Connection`](crate::ErrorKind::Connection),
    /// [`ErrorKind::Timeout`](crate::ErrorKind::Timeout) or
    /// [`ErrorKind::Transport`](crate::ErrorKind::Transport) when no response
    /// was received.
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        (**self).execute(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        (**self).execute(request)
    }
}
