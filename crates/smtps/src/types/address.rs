//! Envelope address type.

use crate::error::{Error, Result};

/// Address used in `MAIL FROM` and `RCPT TO`.
///
/// Only checks what would corrupt the command line itself. Whether the
/// mailbox exists, or is even syntactically a mailbox, is left to the server:
/// the envelope sender is the login name, which need not contain an `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new address from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty or contains characters that
    /// cannot appear inside `<...>` on a command line.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        Self::validate(&addr)?;
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(addr: &str) -> Result<()> {
        if addr.is_empty() {
            return Err(Error::InvalidAddress("Address cannot be empty".into()));
        }

        if addr.contains(['\r', '\n']) {
            return Err(Error::InvalidAddress(format!(
                "Address contains a line break: {addr:?}"
            )));
        }

        if addr.contains(['<', '>']) {
            return Err(Error::InvalidAddress(format!(
                "Address contains angle brackets: {addr}"
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
