//! High-level sending over implicit TLS.
//!
//! [`Server`] ties a [`ServerConfig`] to a pair of [`Credentials`] and runs
//! one complete SMTP transaction per [`Message`]: greeting, EHLO,
//! AUTH PLAIN, MAIL FROM (the login), one RCPT TO per recipient, DATA, QUIT.
//! The first failing step aborts the send and its error is returned.

use crate::config::ServerConfig;
use crate::connection::{Client, SmtpStream, connect_tls};
use crate::error::{Error, Result};
use crate::types::Address;
use smtps_mime::Message;
use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite};

/// Login and password for AUTH PLAIN.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login name, also used as the envelope sender.
    pub login: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// SMTP server to send messages through.
#[derive(Debug, Clone)]
pub struct Server {
    config: ServerConfig,
    credentials: Credentials,
}

/// Envelope addresses, checked before any I/O happens.
struct Envelope {
    from: Address,
    first: Address,
    rest: Vec<Address>,
}

impl Envelope {
    fn new(login: &str, message: &Message) -> Result<Self> {
        let from = Address::new(login)?;
        let mut recipients = message
            .recipients
            .iter()
            .map(|r| Address::new(r.as_str()))
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let first = recipients.next().ok_or(Error::NoRecipients)?;
        Ok(Self {
            from,
            first,
            rest: recipients.collect(),
        })
    }
}

impl Server {
    /// Creates a server with default settings and certificate verification.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, credentials: Credentials) -> Self {
        Self::with_config(ServerConfig::new(host, port), credentials)
    }

    /// Creates a server from an explicit configuration.
    #[must_use]
    pub const fn with_config(config: ServerConfig, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Returns the `host:port` address.
    #[must_use]
    pub fn addr(&self) -> String {
        self.config.addr()
    }

    /// Returns the connection configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Opens a TLS connection and sends one message.
    ///
    /// The message is checked first: an unusable EHLO hostname, a header
    /// containing a line break, an empty recipient list or an unusable
    /// envelope address fails without connecting.
    ///
    /// # Errors
    ///
    /// Returns the first error hit: validation, connect, TLS handshake,
    /// timeout, or any command the server rejects.
    pub async fn send(&self, message: &Message) -> Result<()> {
        let envelope = self.prepare(message)?;
        let stream = connect_tls(&self.config).await?;
        self.transact(stream, envelope, message).await
    }

    /// Sends one message over an already-established transport.
    ///
    /// The transport must be positioned before the server greeting. The
    /// configured I/O timeout applies; the connect timeout does not.
    ///
    /// # Errors
    ///
    /// Same as [`Server::send`], minus connection setup.
    pub async fn deliver<S>(&self, transport: S, message: &Message) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let envelope = self.prepare(message)?;
        let stream = SmtpStream::new(transport).with_io_timeout(self.config.io_timeout);
        self.transact(stream, envelope, message).await
    }

    fn prepare(&self, message: &Message) -> Result<Envelope> {
        self.config.validate()?;
        message.check_headers()?;
        Envelope::new(&self.credentials.login, message)
    }

    async fn transact<S>(
        &self,
        stream: SmtpStream<S>,
        envelope: Envelope,
        message: &Message,
    ) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let recipient_count = 1 + envelope.rest.len();
        tracing::debug!(server = %self.addr(), recipient_count, "Sending message");

        let client = Client::from_stream(stream).await?;
        let client = client.ehlo(&self.config.client_hostname).await?;
        let client = client
            .auth_plain(&self.credentials.login, &self.credentials.password)
            .await?;

        let client = client.mail_from(envelope.from).await?;
        let mut client = client.rcpt_to(envelope.first).await?;
        for to in envelope.rest {
            client = client.rcpt_to(to).await?;
        }

        let client = client.data().await?;
        let client = client.send_message(message.render().as_bytes()).await?;
        client.quit().await?;

        tracing::info!(server = %self.addr(), recipient_count, "Message sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    fn server() -> Server {
        Server::new("smtp.example.com", 465, Credentials::new("bot@example.com", "secret"))
    }

    #[test]
    fn test_addr() {
        assert_eq!(server().addr(), "smtp.example.com:465");
    }

    #[test]
    fn test_new_verifies_certificates() {
        assert!(!server().config().accept_invalid_certs);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("bot@example.com", "hunter2"));
        assert!(debug.contains("bot@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_no_recipients_fails_before_io() {
        // An empty script: any read or write would be a test failure
        let mock = Builder::new().build();
        let message = Message::new().sender("Bot", "bot@example.com").body("hi");

        let err = server().deliver(mock, &message).await.unwrap_err();
        assert!(matches!(err, Error::NoRecipients));
    }

    #[tokio::test]
    async fn test_header_injection_fails_before_io() {
        let mock = Builder::new().build();
        let message = Message::new()
            .recipients(["u@example.com"])
            .subject("Hi\r\nBcc: everyone@example.com");

        let err = server().deliver(mock, &message).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Message(smtps_mime::Error::HeaderInjection { name: "Subject" })
        ));
    }

    #[tokio::test]
    async fn test_bad_recipient_fails_before_io() {
        let mock = Builder::new().build();
        let message = Message::new().recipients(["good@x.com", ""]);

        let err = server().deliver(mock, &message).await.unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_client_hostname_injection_fails_before_io() {
        let mock = Builder::new().build();
        let config = ServerConfig::builder("smtp.example.com")
            .client_hostname("localhost\r\nRSET")
            .build();
        let server = Server::with_config(config, Credentials::new("bot@example.com", "secret"));
        let message = Message::new().recipients(["u@example.com"]);

        let err = server.deliver(mock, &message).await.unwrap_err();
        assert!(matches!(err, Error::InvalidHostname(_)));
    }

    #[tokio::test]
    async fn test_send_checks_before_connecting() {
        // Unresolvable host: reaching the network would give a different error
        let server = Server::new("invalid.invalid", 465, Credentials::new("bot", "secret"));
        let err = server.send(&Message::new()).await.unwrap_err();
        assert!(matches!(err, Error::NoRecipients));
    }
}
