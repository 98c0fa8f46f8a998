//! Navigation requests.
//!
//! A [`Request`] targets an explicit URL, a [`Follow`] targets the link of a
//! relation on a resource. Both share the same options: method, URL template
//! variables, body and extra headers.
//!
//! ```rust
//! use hapi_client::request::{Follow, MessageBody, Method, Request};
//! use hapi_client::CustomRel;
//! use serde_json::json;
//!
//! let request = Request::new("/orders/{id}").with_url_variable("id", 42);
//!
//! let follow = Follow::new(CustomRel::new("https://api.example.com/alps#create-order")?)
//!     .with_method(Method::Post)
//!     .with_body(MessageBody::Json(json!({ "reference": "ORD-1" })))
//!     .with_header("X-Request-Id", "5b1c");
//! # Ok::<(), hapi_client::Error>(())
//! ```

mod body;
mod headers;
mod method;
pub(crate) mod template;

pub use body::{MessageBody, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use headers::Headers;
pub use method::Method;
use serde_json::{Map, Value};

use crate::types::Rel;

#[derive(Debug, Clone, Default, PartialEq)]
struct RequestOptions {
    method: Method,
    url_variables: Map<String, Value>,
    body: Option<MessageBody>,
    headers: Headers,
}

macro_rules! request_options {
    ($ty:ident) => {
        impl $ty {
            /// Sets the HTTP method. Defaults to `GET`.
            #[must_use]
            pub fn with_method(mut self, method: Method) -> Self {
                self.options.method = method;
                self
            }

            /// Sets one URL template variable, replacing any previous value.
            ///
            /// Variables are only used when the target URL is a template.
            #[must_use]
            pub fn with_url_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
                self.options.url_variables.insert(name.into(), value.into());
                self
            }

            /// Merges URL template variables into the ones already set.
            #[must_use]
            pub fn with_url_variables(mut self, variables: Map<String, Value>) -> Self {
                self.options.url_variables.extend(variables);
                self
            }

            /// Sets the request body. Only sent for `POST`, `PUT` and `PATCH`.
            #[must_use]
            pub fn with_body(mut self, body: MessageBody) -> Self {
                self.options.body = Some(body);
                self
            }

            /// Adds a header, sent after the `Accept` header.
            #[must_use]
            pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                self.options.headers.add(name, value);
                self
            }

            /// Adds every header of `headers`.
            #[must_use]
            pub fn with_headers(mut self, headers: &Headers) -> Self {
                self.options.headers.extend(headers);
                self
            }

            /// The HTTP method.
            pub fn method(&self) -> Method {
                self.options.method
            }

            /// The URL template variables.
            pub fn url_variables(&self) -> &Map<String, Value> {
                &self.options.url_variables
            }

            /// The request body, if any.
            pub fn body(&self) -> Option<&MessageBody> {
                self.options.body.as_ref()
            }

            /// The caller-supplied headers.
            pub fn headers(&self) -> &Headers {
                &self.options.headers
            }
        }
    };
}

/// A request to an explicit URL.
///
/// A URL starting with `/` is resolved against the client's API URL; any
/// other URL is used as-is, so requests can reach other servers.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    url: String,
    options: RequestOptions,
}

impl Request {
    /// Creates a `GET` request. The URL is trimmed.
    ///
    /// A blank URL is accepted here and rejected when the request is sent.
    pub fn new(url: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().trim().to_string(),
            options: RequestOptions::default(),
        }
    }

    /// The target URL or URI template.
    pub fn url(&self) -> &str {
        &self.url
    }
}

request_options!(Request);

/// A request following the link of a relation.
///
/// When the source resource embeds a resource under the same relation, the
/// embedded one is returned and no request is made.
#[derive(Debug, Clone, PartialEq)]
pub struct Follow {
    rel: Rel,
    options: RequestOptions,
}

impl Follow {
    /// Creates a `GET` follow of `rel`.
    pub fn new(rel: impl Into<Rel>) -> Self {
        Self {
            rel: rel.into(),
            options: RequestOptions::default(),
        }
    }

    /// The relation to follow.
    pub fn rel(&self) -> &Rel {
        &self.rel
    }

    /// Turns this follow into a request to `url`, keeping every option.
    pub(crate) fn into_request(self, url: &str) -> Request {
        Request {
            url: url.trim().to_string(),
            options: self.options,
        }
    }
}

request_options!(Follow);

impl From<Rel> for Follow {
    fn from(rel: Rel) -> Self {
        Follow::new(rel)
    }
}
