//! Connection configuration types.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default port for SMTP over implicit TLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Default EHLO hostname.
const DEFAULT_CLIENT_HOSTNAME: &str = "localhost";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(60);

/// SMTP connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server hostname, also used as the TLS server name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Accept any server certificate. **Insecure: test servers only.**
    pub accept_invalid_certs: bool,
    /// Hostname announced in EHLO.
    pub client_hostname: String,
    /// Timeout for TCP connect plus TLS handshake.
    pub connect_timeout: Duration,
    /// Timeout for each read or write.
    pub io_timeout: Duration,
}

impl ServerConfig {
    /// Creates a configuration with certificate verification enabled.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::builder(host).port(port).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> ServerConfigBuilder {
        ServerConfigBuilder::new(host)
    }

    /// Returns the `host:port` address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Checks the settings that end up on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHostname`] if the EHLO hostname is empty or
    /// contains whitespace or control characters.
    pub fn validate(&self) -> Result<()> {
        check_client_hostname(&self.client_hostname)
    }
}

/// Rejects EHLO arguments that would add words or lines to the command.
pub(crate) fn check_client_hostname(hostname: &str) -> Result<()> {
    if hostname.is_empty()
        || hostname
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(Error::InvalidHostname(hostname.to_string()));
    }
    Ok(())
}

/// Builder for connection configuration.
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    host: String,
    port: u16,
    accept_invalid_certs: bool,
    client_hostname: String,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl ServerConfigBuilder {
    /// Creates a new builder for the given hostname on port 465.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: IMPLICIT_TLS_PORT,
            accept_invalid_certs: false,
            client_hostname: DEFAULT_CLIENT_HOSTNAME.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Disables server certificate verification when `accept` is true.
    ///
    /// Any certificate, including self-signed, expired or issued for another
    /// host, is then accepted. Only use this against test servers.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets the hostname announced in EHLO.
    #[must_use]
    pub fn client_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.client_hostname = hostname.into();
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the I/O timeout.
    #[must_use]
    pub const fn io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            accept_invalid_certs: self.accept_invalid_certs,
            client_hostname: self.client_hostname,
            connect_timeout: self.connect_timeout,
            io_timeout: self.io_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = ServerConfig::new("smtp.example.com", 2465);
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 2465);
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.client_hostname, "localhost");
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.io_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_addr() {
        assert_eq!(
            ServerConfig::new("smtp.example.com", 465).addr(),
            "smtp.example.com:465"
        );
    }

    #[test]
    fn test_validate_default() {
        assert!(ServerConfig::new("smtp.example.com", 465).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_line_breaks_in_client_hostname() {
        for hostname in ["mailer\r\nRSET", "mailer\n", "mailer\r", "two words", ""] {
            let config = ServerConfig::builder("smtp.example.com")
                .client_hostname(hostname)
                .build();
            assert!(
                matches!(config.validate(), Err(Error::InvalidHostname(h)) if h == hostname),
                "accepted {hostname:?}"
            );
        }
    }

    #[test]
    fn test_builder_default_port() {
        let config = ServerConfig::builder("smtp.example.com").build();
        assert_eq!(config.port, IMPLICIT_TLS_PORT);
    }

    #[test]
    fn test_builder() {
        let config = ServerConfig::builder("localhost")
            .port(10465)
            .accept_invalid_certs(true)
            .client_hostname("mailer.example.com")
            .connect_timeout(Duration::from_secs(5))
            .io_timeout(Duration::from_secs(10))
            .build();

        assert_eq!(config.port, 10465);
        assert!(config.accept_invalid_certs);
        assert_eq!(config.client_hostname, "mailer.example.com");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.io_timeout, Duration::from_secs(10));
    }
}
