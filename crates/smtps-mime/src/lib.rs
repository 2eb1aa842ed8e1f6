//! # smtps-mime
//!
//! MIME message builder for the `smtps` email helper.
//!
//! A [`Message`] collects a sender, an ordered recipient list, a subject and
//! an HTML body, then renders them as a single-part `text/html` MIME payload
//! ready for the SMTP DATA phase.
//!
//! ## Quick Start
//!
//! ```
//! use smtps_mime::Message;
//!
//! let message = Message::new()
//!     .sender("Bot", "bot@example.com")
//!     .recipients(["u@example.com"])
//!     .subject("Hi")
//!     .body("<p>hello</p>");
//!
//! assert_eq!(
//!     message.render(),
//!     "MIME-version: 1.0;\r\n\
//!      Content-Type: text/html; charset=\"UTF-8\";\r\n\
//!      From: Bot<bot@example.com>\r\n\
//!      To: u@example.com\r\n\
//!      Subject: Hi\r\n\
//!      \r\n\
//!      <p>hello</p>"
//! );
//! ```
//!
//! ## Header values
//!
//! Header values are written verbatim: nothing is folded, escaped or RFC 2047
//! encoded. Use [`Message::check_headers`] to reject values that would break
//! out of their header line.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod header;
mod message;

pub use error::{Error, Result};
pub use header::Headers;
pub use message::Message;
