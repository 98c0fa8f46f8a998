//! TLS settings for the HTTP transport.

use std::path::PathBuf;

/// TLS settings for the built-in HTTP transport.
///
/// By default the system root certificates are trusted and server
/// certificates are verified. Private APIs behind an internal CA can add it
/// here.
///
/// ## Example: Custom CA
///
/// ```rust
/// use hapi_client::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/ssl/private-ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Extra CA certificate to trust, as a PEM file path.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Extra CA certificate to trust, as PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to skip certificate verification.
    ///
    /// **WARNING**: This is insecure and should only be used against local
    /// sandboxes with self-signed certificates.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that skips certificate verification.
    ///
    /// **WARNING**: Connections become open to man-in-the-middle attacks.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if an extra CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TlsConfig::default();
        assert!(config.ca_cert_file.is_none());
        assert!(!config.skip_verification);
        assert!(!config.has_custom_ca());
    }

    #[test]
    fn test_ca_cert_pem() {
        let config = TlsConfig::builder()
            .ca_cert_pem("-----BEGIN CERTIFICATE-----")
            .build();
        assert!(config.has_custom_ca());
        assert_eq!(config.ca_cert_file, None);
    }

    #[test]
    fn test_insecure() {
        assert!(TlsConfig::insecure().skip_verification);
    }
}
