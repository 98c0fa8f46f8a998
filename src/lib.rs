//! # hapi-client
//!
//! A client for hypermedia APIs speaking HAL (Hypertext Application Language).
//!
//! Instead of building URLs, callers start from an entry point and follow
//! relations from resource to resource. Embedded resources are served without
//! a request, OAuth 2.0 client credentials are exchanged and cached
//! transparently, and every failure reports what went wrong: the missing
//! relation and its alternatives, or the rejected request with its status and
//! body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hapi_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = HapiClient::builder()
//!         .api_url("https://api.example.com")
//!         .profile("https://api.example.com/alps/v1")
//!         .authentication(Oauth2BasicAuthentication::new(
//!             Oauth2Config::builder()
//!                 .token_endpoint_url("/oauth/token")
//!                 .userid("my-client")
//!                 .password("my-secret")
//!                 .build(),
//!         ))
//!         .build()?;
//!
//!     let orders = client
//!         .follow(Follow::new(CustomRel::curie("acme", "search-orders")?).with_url_variable("page", 1))
//!         .await?;
//!
//!     for order in orders.embedded_resources(CustomRel::curie("acme", "orders")?)? {
//!         println!("{}", order.state()["reference"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Hypertext cache**: following a relation returns the embedded resource
//!   when there is one, and only requests the link otherwise
//! - **Entry point**: fetched once per client and shared by its clones
//! - **Authentication**: a `401 Unauthorized` is retried exactly once with
//!   fresh credentials
//! - **Redirects**: never followed, reported as [`ErrorKind::Redirection`]
//!
//! ## Features
//!
//! - `rest` (default): Built-in HTTP transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod types;

// Transport layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg(feature = "rest")]
mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{HapiClient, HapiClientBuilder};
pub use config::{PoolConfig, TlsConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::{Follow, Request};
pub use types::{CustomRel, Link, OneOrMany, RegisteredRel, Rel, Resource};
