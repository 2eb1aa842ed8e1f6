//! # smtps
//!
//! Minimal email sending over implicit-TLS SMTP with password authentication.
//!
//! ## Features
//!
//! - **Fluent message builder**: sender, recipients, subject and HTML body
//!   rendered as a `text/html` MIME payload (see [`Message`])
//! - **Implicit TLS**: the TLS session is up before the first SMTP command
//! - **AUTH PLAIN** with the configured login and password
//! - **Type-state client**: the SMTP command order is enforced at compile time
//! - **Fail fast**: the first failing step aborts the send and is returned
//!
//! ## Quick Start
//!
//! ```ignore
//! use smtps::{Credentials, Message, Server};
//!
//! #[tokio::main]
//! async fn main() -> smtps::Result<()> {
//!     let server = Server::new(
//!         "smtp.example.com",
//!         465,
//!         Credentials::new("bot@example.com", "password"),
//!     );
//!
//!     let message = Message::new()
//!         .sender("Bot", "bot@example.com")
//!         .recipients(["user@example.com"])
//!         .subject("Hi")
//!         .body("<p>hello</p>");
//!
//!     server.send(&message).await
//! }
//! ```
//!
//! ## Certificate verification
//!
//! Server certificates are verified against the webpki roots unless the
//! caller opts out explicitly:
//!
//! ```ignore
//! use smtps::{Credentials, Server, ServerConfig};
//!
//! let config = ServerConfig::builder("localhost")
//!     .port(10465)
//!     .accept_invalid_certs(true)
//!     .build();
//! let server = Server::with_config(config, Credentials::new("test", "test"));
//! ```
//!
//! ## Connection States
//!
//! ```text
//! ┌──────────────┐
//! │  Connected   │ ─── ehlo() ─── auth_plain() ───→ Authenticated
//! └──────────────┘
//!                                                        │
//!        ┌───────── mail_from() ─────────────────────────┘
//!        ↓
//! MailTransaction ── rcpt_to() ──→ RecipientAdded ── data() ──→ Data
//!                                                                 │
//! Connected ←────────────────── send_message() ───────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command builders
//! - [`config`]: Connection configuration
//! - [`connection`]: TLS connection setup and type-state client
//! - [`parser`]: Response parser
//! - [`server`]: One-call sending
//! - [`types`]: Core SMTP types (addresses, extensions, replies)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod connection;
mod error;
pub mod parser;
pub mod server;
pub mod types;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use connection::{
    Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded, ServerInfo,
    SmtpStream,
};
pub use error::{Error, Result};
pub use server::{Credentials, Server};
pub use smtps_mime::Message;
pub use types::{Address, Extension, Reply, ReplyCode};
