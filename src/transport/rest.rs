//! HTTP transport implementation using reqwest.

use std::time::Duration;

use crate::config::{PoolConfig, TlsConfig};
use crate::error::ErrorKind;
use crate::request::Method;
use crate::transport::traits::{HttpRequest, HttpResponse, HttpTransport, TransportFuture};
use crate::user_agent;
use crate::Error;

/// HTTP transport using reqwest.
///
/// Connections are pooled; clones share the pool.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport").finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Configuration`] if a CA certificate can't be
    /// loaded or the HTTP client can't be created.
    pub fn new(
        tls_config: &TlsConfig,
        pool_config: &PoolConfig,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(pool_config.connect_timeout)
            .pool_max_idle_per_host(pool_config.max_idle_per_host)
            .pool_idle_timeout(pool_config.idle_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent.unwrap_or(user_agent::user_agent()));

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref ca_cert_file) = tls_config.ca_cert_file {
            let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("failed to read certificate {}: {e}", ca_cert_file.display()),
                )
            })?;
            let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                Error::new(
                    ErrorKind::Configuration,
                    format!("invalid certificate {}: {e}", ca_cert_file.display()),
                )
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        if let Some(ref ca_cert_pem) = tls_config.ca_cert_pem {
            let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
                Error::new(ErrorKind::Configuration, format!("invalid CA certificate PEM: {e}"))
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        let client = client_builder.build().map_err(|e| {
            Error::new(ErrorKind::Configuration, format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client })
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let mut headers = crate::request::Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.add(name.as_str(), value);
            }
        }

        // An unreadable body is reported as absent; the client decides
        // whether that is fatal.
        let body = match response.bytes().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read response body");
                None
            },
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            headers,
            body,
        })
    }
}

impl HttpTransport for RestTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(self.send(request))
    }
}

/// Builder for [`RestTransport`].
#[derive(Debug)]
pub struct RestTransportBuilder {
    tls_config: TlsConfig,
    pool_config: PoolConfig,
    timeout: Duration,
    user_agent: Option<String>,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            tls_config: TlsConfig::default(),
            pool_config: PoolConfig::default(),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the connection pool configuration.
    #[must_use]
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Sets the overall request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        RestTransport::new(
            &self.tls_config,
            &self.pool_config,
            self.timeout,
            self.user_agent.as_deref(),
        )
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Maps reqwest errors to client errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("request timed out: {e}")).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("connection failed: {e}")).with_source(e)
    } else if e.is_builder() {
        Error::invalid_request(format!("invalid request: {e}")).with_source(e)
    } else {
        Error::transport(format!("HTTP error: {e}")).with_source(e)
    }
}
