//! OAuth 2.0 client credentials with a renewable bearer token.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::TimeDelta;
use serde_json::Value;
use tokio::sync::Mutex;

use super::credentials::Oauth2Config;
use super::provider::{AuthenticationMethod, AuthorizeFuture};
use super::token::{Clock, ExpirableToken, SystemClock};
use crate::client::HapiClient;
use crate::request::{Headers, MessageBody, Method, Request};
use crate::transport::HttpRequest;
use crate::Error;

const AUTHORIZATION: &str = "Authorization";

/// Bearer token authentication backed by an OAuth 2.0 token endpoint.
///
/// The last token is cached and reused until it expires. Renewal happens
/// under a lock held for the whole exchange, so concurrent requests never
/// trigger more than one token request. Requests that already carry a
/// `Basic` or `Bearer` `Authorization` header are sent unchanged.
///
/// ```rust,no_run
/// use hapi_client::auth::{Oauth2BasicAuthentication, Oauth2Config};
/// use hapi_client::HapiClient;
///
/// let auth = Oauth2BasicAuthentication::new(
///     Oauth2Config::builder()
///         .token_endpoint_url("/oauth/token")
///         .userid("democreditor01")
///         .password("demosecret01")
///         .build(),
/// );
///
/// let client = HapiClient::builder()
///     .api_url("https://api.example.com")
///     .profile("https://api.example.com/alps/v1")
///     .authentication(auth)
///     .build()?;
/// # Ok::<(), hapi_client::Error>(())
/// ```
pub struct Oauth2BasicAuthentication {
    config: Oauth2Config,
    clock: Arc<dyn Clock>,
    token: Mutex<Option<ExpirableToken>>,
}

impl Oauth2BasicAuthentication {
    /// Creates the method with no token; the first request obtains one.
    pub fn new(config: Oauth2Config) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            token: Mutex::new(None),
        }
    }

    /// Seeds the cache with a previously issued token.
    ///
    /// An expired token is simply renewed on first use.
    #[must_use]
    pub fn with_token(mut self, token: ExpirableToken) -> Self {
        *self.token.get_mut() = Some(token);
        self
    }

    /// Replaces the time source used to issue and check tokens.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &Oauth2Config {
        &self.config
    }

    /// The cached token, valid or not.
    pub async fn token(&self) -> Option<ExpirableToken> {
        self.token.lock().await.clone()
    }

    async fn valid_token(&self, client: &HapiClient) -> Result<String, Error> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|token| token.is_valid_until(self.clock.now())) {
            return Ok(token.value().to_string());
        }

        let token = self.request_token(client).await?;
        tracing::debug!(expires_at = %token.expires_at(), "access token renewed");
        let value = token.value().to_string();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self, client: &HapiClient) -> Result<ExpirableToken, Error> {
        let credentials = BASE64.encode(format!("{}:{}", self.config.userid, self.config.password));
        let request = Request::new(&self.config.token_endpoint_url)
            .with_method(Method::Post)
            .with_header(AUTHORIZATION, format!("Basic {credentials}"))
            .with_body(MessageBody::form([
                ("grant_type", self.config.grant_type.as_str()),
                ("scope", self.config.scope.as_str()),
            ]));

        let response = client.send(request).await?;
        let state = response.state();

        let access_token = match state.get("access_token") {
            Some(Value::String(token)) => token.clone(),
            Some(other) => {
                return Err(Error::malformed_token_response(format!(
                    "access_token must be a string, got {other}"
                )));
            },
            None => {
                return Err(Error::malformed_token_response(
                    "access_token is missing from the token response",
                ));
            },
        };

        let expires_in = match state.get("expires_in") {
            Some(Value::Number(seconds)) => seconds
                .as_i64()
                .or_else(|| seconds.as_f64().filter(|s| s.fract() == 0.0).map(|s| s as i64)),
            Some(Value::String(seconds)) => seconds.trim().parse().ok(),
            Some(_) => None,
            None => {
                return Err(Error::malformed_token_response(
                    "expires_in is missing from the token response",
                ));
            },
        }
        .ok_or_else(|| Error::malformed_token_response("expires_in must be a whole number of seconds"))?;

        let expires_at = TimeDelta::try_seconds(expires_in)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| Error::malformed_token_response(format!("expires_in out of range: {expires_in}")))?;

        Ok(ExpirableToken::new(access_token, expires_at))
    }
}

fn has_credentials(headers: &Headers) -> bool {
    headers.get_all(AUTHORIZATION).any(|value| is_bearer(value) || has_scheme(value, "Basic"))
}

fn is_bearer(value: &str) -> bool {
    has_scheme(value, "Bearer")
}

fn has_scheme(value: &str, scheme: &str) -> bool {
    value.split_whitespace().next().is_some_and(|s| s.eq_ignore_ascii_case(scheme))
}

impl AuthenticationMethod for Oauth2BasicAuthentication {
    fn authorize<'a>(
        &'a self,
        client: &'a HapiClient,
        request: &'a mut HttpRequest,
    ) -> AuthorizeFuture<'a> {
        Box::pin(async move {
            if has_credentials(&request.headers) {
                return Ok(());
            }

            let token = self.valid_token(client).await?;
            request.headers.remove_all(AUTHORIZATION);
            request.headers.add(AUTHORIZATION, format!("Bearer {token}"));
            Ok(())
        })
    }

    fn invalidate<'a>(&'a self, rejected: &'a HttpRequest) -> AuthorizeFuture<'a> {
        Box::pin(async move {
            // Token requests carry Basic credentials and run under the lock.
            if !rejected.headers.get_all(AUTHORIZATION).any(is_bearer) {
                return Ok(());
            }

            let mut cached = self.token.lock().await;
            let rejected_cached = cached.as_ref().is_some_and(|token| {
                let bearer = format!("Bearer {}", token.value());
                rejected.headers.get_all(AUTHORIZATION).any(|value| value == bearer)
            });
            // Caller-supplied credentials were rejected, not ours.
            if rejected_cached {
                *cached = None;
            }
            Ok(())
        })
    }
}

impl fmt::Debug for Oauth2BasicAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oauth2BasicAuthentication")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
