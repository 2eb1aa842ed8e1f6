//! HTML message builder and renderer.

use crate::error::{Error, Result};
use crate::header::Headers;
use std::fmt;

/// MIME version header value, trailing semicolon included.
const MIME_VERSION: &str = "1.0;";

/// Content type header value for the HTML body.
const CONTENT_TYPE: &str = "text/html; charset=\"UTF-8\";";

/// Separator between recipients in the `To` header.
const RECIPIENT_SEPARATOR: &str = ";";

/// Single-part HTML email message.
///
/// Setters consume and return the message so calls can be chained. None of
/// them validate their input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Sender as `Name<address>`.
    pub sender: String,
    /// Recipient addresses, in delivery order.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: String,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender display name and address.
    #[must_use]
    pub fn sender(mut self, name: impl AsRef<str>, address: impl AsRef<str>) -> Self {
        self.sender = format!("{}<{}>", name.as_ref(), address.as_ref());
        self
    }

    /// Replaces the recipient list.
    #[must_use]
    pub fn recipients<I, T>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.recipients = recipients.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a single recipient.
    #[must_use]
    pub fn recipient(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(address.into());
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the header block in wire order.
    ///
    /// `To` is left out entirely when there are no recipients.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.add("MIME-version", MIME_VERSION);
        headers.add("Content-Type", CONTENT_TYPE);
        headers.add("From", self.sender.as_str());
        if !self.recipients.is_empty() {
            headers.add("To", self.recipients.join(RECIPIENT_SEPARATOR));
        }
        headers.add("Subject", self.subject.as_str());
        headers
    }

    /// Renders the message as MIME text with CRLF line endings.
    ///
    /// The body is appended as-is after the blank separator line.
    #[must_use]
    pub fn render(&self) -> String {
        let headers = self.headers().to_string();

        let mut message = String::with_capacity(headers.len() + 2 + self.body.len());
        message.push_str(&headers);
        message.push_str("\r\n");
        message.push_str(&self.body);
        message
    }

    /// Checks that no header value can inject additional header lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderInjection`] naming the first header whose value
    /// contains a carriage return or line feed.
    pub fn check_headers(&self) -> Result<()> {
        if has_line_break(&self.sender) {
            return Err(Error::HeaderInjection { name: "From" });
        }
        if self.recipients.iter().any(|r| has_line_break(r)) {
            return Err(Error::HeaderInjection { name: "To" });
        }
        if has_line_break(&self.subject) {
            return Err(Error::HeaderInjection { name: "Subject" });
        }
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n'])
}
