//! HTTP transport layer.
//!
//! The client talks to the network only through the [`HttpTransport`] trait:
//!
//! - [`RestTransport`] (feature `rest`, default): reqwest with connection pooling
//! - [`MockTransport`](crate::testing::MockTransport): scripted in-memory responses for tests
//!
//! Redirects are never followed: a 3xx response reaches the client, which
//! reports it as an error.

pub(crate) mod mock;
mod traits;

#[cfg(feature = "rest")]
mod rest;

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
pub use traits::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};
