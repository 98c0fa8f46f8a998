//! Prelude module for convenient imports.
//!
//! ```rust
//! use hapi_client::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its builder
//! - Error types
//! - Authentication types
//! - The HAL data model and navigation requests

pub use crate::{
    auth::{AuthenticationMethod, Oauth2BasicAuthentication, Oauth2Config},
    client::{HapiClient, HapiClientBuilder},
    config::{PoolConfig, TlsConfig},
    error::{Error, ErrorKind, Result},
    request::{Follow, Headers, MessageBody, Method, Request},
    types::{CustomRel, Link, OneOrMany, RegisteredRel, Rel, Resource},
};
