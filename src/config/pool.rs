//! Connection pool settings.

use std::time::Duration;

/// Connection pool settings for the built-in HTTP transport.
///
/// ```rust
/// use std::time::Duration;
/// use hapi_client::PoolConfig;
///
/// let config = PoolConfig::builder()
///     .max_idle_per_host(10)
///     .idle_timeout(Duration::from_secs(30))
///     .build();
/// assert_eq!(config.max_idle_per_host, 10);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct PoolConfig {
    /// Maximum idle connections kept per host.
    #[builder(default = 5)]
    pub max_idle_per_host: usize,

    /// How long an idle connection is kept before being closed.
    #[builder(default = Duration::from_secs(90))]
    pub idle_timeout: Duration,

    /// Timeout for establishing a connection.
    #[builder(default = Duration::from_secs(10))]
    pub connect_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.max_idle_per_host, 5);
        assert_eq!(config.idle_timeout, Duration::from_secs(90));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }
}
