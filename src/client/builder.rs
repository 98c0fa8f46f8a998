//! Client builder.

use std::{sync::Arc, time::Duration};

use tokio::sync::OnceCell;

use super::{HapiClient, inner::ClientInner};
use crate::{
    Error,
    auth::AuthenticationMethod,
    config::{PoolConfig, TlsConfig},
    transport::HttpTransport,
};

/// Builder for creating [`HapiClient`] instances.
///
/// Every setting is optional. A client without an API URL only accepts
/// absolute URLs.
///
/// ## Configuration
///
/// - `api_url()`: Prefix of every URL starting with `/`
/// - `entry_point_url()`: Where the entry point lives (default `/`)
/// - `profile()`: Profile advertised in the `Accept` header
/// - `authentication()`: How requests are authorized
/// - `transport()`: A custom [`HttpTransport`]
///
/// The remaining settings configure the built-in HTTP transport and are
/// ignored when a custom transport is given:
///
/// - `tls_config()`: Trusted CAs and certificate verification
/// - `pool_config()`: Connection pooling
/// - `timeout()`: Per-request timeout (default 30s)
/// - `user_agent()`: `User-Agent` header
///
/// ## Example
///
/// ```rust,no_run
/// use hapi_client::HapiClient;
/// use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), hapi_client::Error> {
/// let client = HapiClient::builder()
///     .api_url("https://api.example.com")
///     .profile("https://api.example.com/alps/v1")
///     .authentication(Oauth2BasicAuthentication::new(
///         Oauth2Config::builder()
///             .token_endpoint_url("/oauth/token")
///             .userid("my-client")
///             .password("my-secret")
///             .build(),
///     ))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HapiClientBuilder {
    api_url: Option<String>,
    entry_point_url: Option<String>,
    profile: Option<String>,
    authentication: Option<Arc<dyn AuthenticationMethod>>,
    transport: Option<Arc<dyn HttpTransport>>,
    tls_config: TlsConfig,
    pool_config: PoolConfig,
    timeout: Duration,
    user_agent: Option<String>,
}

impl HapiClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            api_url: None,
            entry_point_url: None,
            profile: None,
            authentication: None,
            transport: None,
            tls_config: TlsConfig::default(),
            pool_config: PoolConfig::default(),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    /// Sets the API URL, prefixed to every URL starting with `/`.
    ///
    /// The prefix is a plain string concatenation: use
    /// `https://api.example.com`, not `https://api.example.com/`.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the URL of the entry point. Defaults to `/`.
    #[must_use]
    pub fn entry_point_url(mut self, url: impl Into<String>) -> Self {
        self.entry_point_url = Some(url.into());
        self
    }

    /// Sets the profile.
    ///
    /// With a profile, requests accept `application/hal+json;
    /// profile="<profile>"` instead of `application/json`.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Sets the authentication method.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hapi_client::HapiClient;
    /// use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
    ///
    /// let builder = HapiClient::builder().authentication(Oauth2BasicAuthentication::new(
    ///     Oauth2Config::builder()
    ///         .token_endpoint_url("https://auth.example.com/token")
    ///         .userid("client")
    ///         .password("secret")
    ///         .build(),
    /// ));
    /// ```
    #[must_use]
    pub fn authentication(mut self, authentication: impl AuthenticationMethod + 'static) -> Self {
        self.authentication = Some(Arc::new(authentication));
        self
    }

    /// Sets a custom transport instead of the built-in HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the TLS configuration of the built-in transport.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used for local development.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.tls_config.skip_verification = true;
        self
    }

    /// Sets the connection pool configuration of the built-in transport.
    #[must_use]
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Sets the per-request timeout of the built-in transport.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header of the built-in transport.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the client.
    ///
    /// No request is sent: the entry point is fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`](crate::ErrorKind::Configuration) if:
    /// - The API URL is not a valid absolute URL
    /// - The built-in transport can't be created (for example an unreadable CA file)
    /// - No transport is given and the `rest` feature is disabled
    pub fn build(self) -> Result<HapiClient, Error> {
        let api_url = non_blank(self.api_url);
        if let Some(api_url) = api_url.as_deref() {
            url::Url::parse(api_url).map_err(|e| {
                Error::configuration(format!("invalid API URL {api_url}: {e}")).with_source(e)
            })?;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(
                &self.tls_config,
                &self.pool_config,
                self.timeout,
                self.user_agent.as_deref(),
            )?,
        };

        let inner = ClientInner {
            api_url,
            entry_point_url: non_blank(self.entry_point_url).unwrap_or_else(|| "/".to_string()),
            profile: non_blank(self.profile),
            authentication: self.authentication,
            transport,
            entry_point: OnceCell::new(),
        };
        tracing::debug!(client = ?inner, "client built");

        Ok(HapiClient { inner: Arc::new(inner) })
    }
}

impl Default for HapiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(feature = "rest")]
fn default_transport(
    tls_config: &TlsConfig,
    pool_config: &PoolConfig,
    timeout: Duration,
    user_agent: Option<&str>,
) -> Result<Arc<dyn HttpTransport>, Error> {
    let transport =
        crate::transport::RestTransport::new(tls_config, pool_config, timeout, user_agent)?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "rest"))]
fn default_transport(
    _tls_config: &TlsConfig,
    _pool_config: &PoolConfig,
    _timeout: Duration,
    _user_agent: Option<&str>,
) -> Result<Arc<dyn HttpTransport>, Error> {
    Err(Error::configuration(
        "no transport given and the 'rest' feature is not enabled",
    ))
}
