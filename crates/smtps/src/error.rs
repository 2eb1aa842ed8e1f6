//! Error types for SMTP operations.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error, including failed TCP connects and TLS handshakes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS configuration error.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Host cannot be used as a TLS server name or EHLO argument.
    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    /// Connect, read or write did not finish in time.
    #[error("Operation timed out")]
    Timeout,

    /// Server returned error response.
    #[error("SMTP error {code}: {message}")]
    SmtpError {
        /// Reply code (e.g., 550).
        code: u16,
        /// Error message from server.
        message: String,
    },

    /// Protocol error (unexpected or malformed response).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid envelope address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Message has no recipients to deliver to.
    #[error("No recipients specified")]
    NoRecipients,

    /// Message failed validation before sending.
    #[error("Invalid message: {0}")]
    Message(#[from] smtps_mime::Error),
}

impl Error {
    /// Creates an SMTP error from a reply code and message.
    #[must_use]
    pub fn smtp_error(code: u16, message: impl Into<String>) -> Self {
        Self::SmtpError {
            code,
            message: message.into(),
        }
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::SmtpError { code, .. } if *code >= 500 && *code < 600)
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::SmtpError { code, .. } if *code >= 400 && *code < 500)
    }

    /// Returns the server reply code, if the server rejected a command.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::SmtpError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reply_codes() {
        let err = Error::smtp_error(550, "No such user");
        assert!(err.is_permanent());
        assert!(!err.is_transient());
        assert_eq!(err.code(), Some(550));

        let err = Error::smtp_error(451, "Try again later");
        assert!(err.is_transient());
        assert!(!err.is_permanent());
    }

    #[test]
    fn non_smtp_errors_have_no_code() {
        assert_eq!(Error::Timeout.code(), None);
        assert!(!Error::NoRecipients.is_permanent());
    }

    #[test]
    fn display() {
        assert_eq!(
            Error::smtp_error(535, "Authentication failed").to_string(),
            "SMTP error 535: Authentication failed"
        );
        let err = Error::from(smtps_mime::Error::HeaderInjection { name: "Subject" });
        assert_eq!(
            err.to_string(),
            "Invalid message: Header Subject contains a line break"
        );
    }
}
