//! Authentication for HAL API calls.
//!
//! - [`AuthenticationMethod`]: trait for adding credentials to requests
//! - [`Oauth2BasicAuthentication`]: OAuth 2.0 client credentials with a cached bearer token
//! - [`Oauth2Config`]: its configuration
//! - [`ExpirableToken`] and [`Clock`]: the cached token and the time source checking it
//!
//! ## Client Credentials
//!
//! ```rust,no_run
//! use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
//! use hapi_client::HapiClient;
//!
//! let client = HapiClient::builder()
//!     .api_url("https://api.example.com")
//!     .authentication(Oauth2BasicAuthentication::new(
//!         Oauth2Config::builder()
//!             .token_endpoint_url("/oauth/token")
//!             .userid("client-id")
//!             .password("client-secret")
//!             .build(),
//!     ))
//!     .build()?;
//! # Ok::<(), hapi_client::Error>(())
//! ```

mod credentials;
mod oauth2;
mod provider;
mod token;

pub use credentials::Oauth2Config;
pub use oauth2::Oauth2BasicAuthentication;
pub use provider::{AuthenticationMethod, AuthorizeFuture};
pub use token::{Clock, ExpirableToken, SystemClock};
