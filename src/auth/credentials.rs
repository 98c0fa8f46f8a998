//! OAuth 2.0 client credentials configuration.

use std::fmt;

/// OAuth 2.0 client credentials configuration.
///
/// Tokens are requested from `token_endpoint_url` with HTTP Basic
/// authentication (`userid:password`) and a form body carrying `grant_type`
/// and `scope`. A relative endpoint URL is resolved against the client's API
/// URL.
///
/// ## Example
///
/// ```rust
/// use hapi_client::auth::Oauth2Config;
///
/// let config = Oauth2Config::builder()
///     .token_endpoint_url("/oauth/token")
///     .userid("democreditor01")
///     .password("demosecret01")
///     .build();
///
/// assert_eq!(config.grant_type, "client_credentials");
/// assert_eq!(config.scope, "api");
/// ```
#[derive(Clone, bon::Builder)]
pub struct Oauth2Config {
    /// The token endpoint.
    #[builder(into)]
    pub token_endpoint_url: String,

    /// The client identifier.
    #[builder(into)]
    pub userid: String,

    /// The client secret.
    #[builder(into)]
    pub password: String,

    /// The OAuth 2.0 grant type.
    #[builder(into, default = String::from("client_credentials"))]
    pub grant_type: String,

    /// The requested scope.
    #[builder(into, default = String::from("api"))]
    pub scope: String,
}

impl fmt::Debug for Oauth2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oauth2Config")
            .field("token_endpoint_url", &self.token_endpoint_url)
            .field("userid", &self.userid)
            .field("password", &"[REDACTED]")
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .finish()
    }
}
