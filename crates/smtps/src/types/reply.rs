//! SMTP reply types.

/// SMTP reply from server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code (e.g., 250).
    pub code: ReplyCode,
    /// Reply message lines.
    pub message: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, message: Vec<String>) -> Self {
        Self { code, message }
    }

    /// Returns true if this is a success reply (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the full message as a single string.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.message.join("\n")
    }

    /// Turns anything but a 2xx reply into an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SmtpError`] carrying the code and text.
    pub fn into_success(self) -> crate::Result<Self> {
        self.require(ReplyCode::is_success)
    }

    /// Turns the reply into an error unless `accept` holds for its code.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SmtpError`] carrying the code and text.
    pub fn require(self, accept: impl FnOnce(ReplyCode) -> bool) -> crate::Result<Self> {
        if accept(self.code) {
            Ok(self)
        } else {
            Err(crate::Error::smtp_error(
                self.code.as_u16(),
                self.message_text(),
            ))
        }
    }
}

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a success code (2xx).
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is an intermediate reply (3xx).
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Codes the send transaction checks for
impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 235 Authentication succeeded
    pub const AUTH_SUCCEEDED: Self = Self(235);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);
    /// 421 Service not available, closing transmission channel
    pub const SERVICE_UNAVAILABLE: Self = Self(421);
    /// 450 Mailbox unavailable (busy)
    pub const MAILBOX_BUSY: Self = Self(450);
    /// 503 Bad sequence of commands
    pub const BAD_SEQUENCE: Self = Self(503);
    /// 535 Authentication credentials invalid
    pub const AUTH_FAILED: Self = Self(535);
    /// 550 Mailbox unavailable (not found, access denied)
    pub const MAILBOX_UNAVAILABLE: Self = Self(550);
    /// 554 Transaction failed
    pub const TRANSACTION_FAILED: Self = Self(554);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod reply_code_tests {
        use super::*;

        #[test]
        fn classes() {
            assert!(ReplyCode::OK.is_success());
            assert!(ReplyCode::CLOSING.is_success());
            assert!(ReplyCode::AUTH_SUCCEEDED.is_success());
            assert!(ReplyCode::START_DATA.is_intermediate());
            assert!(ReplyCode::MAILBOX_BUSY.is_transient());
            assert!(ReplyCode::SERVICE_UNAVAILABLE.is_transient());
            assert!(ReplyCode::AUTH_FAILED.is_permanent());
            assert!(ReplyCode::TRANSACTION_FAILED.is_permanent());
        }

        #[test]
        fn classes_are_exclusive() {
            let code = ReplyCode::new(250);
            assert!(!code.is_intermediate());
            assert!(!code.is_transient());
            assert!(!code.is_permanent());
        }

        #[test]
        fn display() {
            assert_eq!(ReplyCode::MAILBOX_UNAVAILABLE.to_string(), "550");
        }
    }

    mod reply_tests {
        use super::*;
        use crate::Error;

        #[test]
        fn message_text_joins_lines() {
            let reply = Reply::new(
                ReplyCode::OK,
                vec!["smtp.example.com".to_string(), "AUTH PLAIN".to_string()],
            );
            assert_eq!(reply.message_text(), "smtp.example.com\nAUTH PLAIN");
        }

        #[test]
        fn into_success_passes_2xx() {
            let reply = Reply::new(ReplyCode::OK, vec!["OK".to_string()]);
            assert_eq!(reply.clone().into_success().unwrap(), reply);
        }

        #[test]
        fn into_success_rejects_5xx() {
            let reply = Reply::new(
                ReplyCode::MAILBOX_UNAVAILABLE,
                vec!["No such user".to_string()],
            );
            match reply.into_success() {
                Err(Error::SmtpError { code, message }) => {
                    assert_eq!(code, 550);
                    assert_eq!(message, "No such user");
                }
                other => panic!("Expected SmtpError, got {other:?}"),
            }
        }

        #[test]
        fn require_specific_code() {
            let reply = Reply::new(ReplyCode::OK, vec!["OK".to_string()]);
            assert!(reply.require(|c| c == ReplyCode::START_DATA).is_err());

            let reply = Reply::new(ReplyCode::START_DATA, vec!["Go ahead".to_string()]);
            assert!(reply.require(|c| c == ReplyCode::START_DATA).is_ok());
        }
    }
}
