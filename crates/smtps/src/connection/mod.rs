//! SMTP connection management with type-state pattern.

mod client;
mod stream;
mod tls;

pub use client::{Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded};
pub use stream::SmtpStream;
pub use tls::{TlsSmtpStream, connect_tls};

use crate::types::Extension;

/// Server capabilities from the greeting and EHLO response.
#[derive(Debug, Clone, Default)]
pub struct ServerInfo {
    /// Server hostname from greeting.
    pub hostname: String,
    /// Supported extensions, in the order the server listed them.
    pub extensions: Vec<Extension>,
}

impl ServerInfo {
    /// Checks if the server supports an extension.
    #[must_use]
    pub fn supports(&self, ext: &Extension) -> bool {
        self.extensions.contains(ext)
    }

    /// Checks if the server advertised a SASL mechanism (case-insensitive).
    #[must_use]
    pub fn supports_auth(&self, mechanism: &str) -> bool {
        self.extensions.iter().any(|ext| {
            matches!(ext, Extension::Auth(mechanisms)
                if mechanisms.iter().any(|m| m.eq_ignore_ascii_case(mechanism)))
        })
    }

    /// Returns the maximum message size, if advertised.
    #[must_use]
    pub fn max_message_size(&self) -> Option<usize> {
        self.extensions.iter().find_map(|ext| match ext {
            Extension::Size(size) => *size,
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(lines: &[&str]) -> ServerInfo {
        ServerInfo {
            hostname: "smtp.example.com".to_string(),
            extensions: lines.iter().map(|l| Extension::parse(l)).collect(),
        }
    }

    #[test]
    fn supports_auth_is_case_insensitive() {
        let info = info(&["AUTH LOGIN PLAIN"]);
        assert!(info.supports_auth("plain"));
        assert!(!info.supports_auth("XOAUTH2"));
    }

    #[test]
    fn no_extensions() {
        let info = ServerInfo::default();
        assert!(!info.supports_auth("PLAIN"));
        assert!(!info.supports(&Extension::EightBitMime));
        assert_eq!(info.max_message_size(), None);
    }

    #[test]
    fn max_message_size() {
        assert_eq!(info(&["SIZE 35882577"]).max_message_size(), Some(35_882_577));
        assert_eq!(info(&["SIZE"]).max_message_size(), None);
    }
}
