//! Type-state SMTP client.

use super::{ServerInfo, SmtpStream};
use crate::command::Command;
use crate::config::check_client_hostname;
use crate::error::Result;
use crate::parser::ReplyAccumulator;
use crate::types::{Address, Extension, Reply, ReplyCode};
use base64::Engine;
use std::marker::PhantomData;
use tokio::io::{AsyncRead, AsyncWrite};

/// Type-state marker for connected state.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker for authenticated state.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker for mail transaction started.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker for recipient added.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker for data mode.
#[derive(Debug)]
pub struct Data;

/// SMTP client with type-state pattern.
///
/// Dropping a client in any state closes the underlying connection.
#[derive(Debug)]
pub struct Client<S, State> {
    stream: SmtpStream<S>,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

impl<S, State> Client<S, State> {
    /// Returns the server information.
    pub const fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    fn transition<Next>(self) -> Client<S, Next> {
        Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        }
    }
}

impl<S> Client<S, Connected>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or if the server returns an error.
    pub async fn from_stream(mut stream: SmtpStream<S>) -> Result<Self> {
        let greeting = read_reply(&mut stream).await?.into_success()?;

        // Extract hostname from greeting (first word after code)
        let hostname = greeting
            .message
            .first()
            .and_then(|msg| msg.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();
        tracing::debug!(%hostname, "Server greeting received");

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                extensions: Vec::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and discovers server capabilities.
    ///
    /// If the server rejects EHLO, falls back to HELO and continues with no
    /// extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname is unusable, or if both EHLO and
    /// HELO fail.
    pub async fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        check_client_hostname(client_hostname)?;

        let cmd = Command::Ehlo {
            hostname: client_hostname.to_string(),
        };
        let reply = self.send_command(cmd).await?;

        if !reply.is_success() {
            tracing::debug!(code = %reply.code, "EHLO rejected, falling back to HELO");
            let cmd = Command::Helo {
                hostname: client_hostname.to_string(),
            };
            self.send_command(cmd).await?.into_success()?;
            self.server_info.extensions = Vec::new();
            return Ok(self);
        }

        // First line is the server's greeting, the rest are extensions
        self.server_info.extensions = reply
            .message
            .iter()
            .skip(1)
            .map(|line| Extension::parse(line))
            .collect();

        Ok(self)
    }

    /// Authenticates using the PLAIN mechanism with an initial response.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub async fn auth_plain(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<S, Authenticated>> {
        if !self.server_info.supports_auth("PLAIN") {
            tracing::debug!("Server did not advertise AUTH PLAIN, trying anyway");
        }

        // PLAIN response: \0username\0password
        let credentials = format!("\0{username}\0{password}");
        let initial_response =
            base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());

        let cmd = Command::AuthPlain { initial_response };
        self.send_command(cmd).await?.into_success()?;

        Ok(self.transition())
    }
}

impl<S> Client<S, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Starts a mail transaction.
    ///
    /// Declares an 8-bit body when the server advertises 8BITMIME.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(mut self, from: Address) -> Result<Client<S, MailTransaction>> {
        let body = self
            .server_info
            .supports(&Extension::EightBitMime)
            .then_some("8BITMIME");

        let cmd = Command::MailFrom { from, body };
        self.send_command(cmd).await?.into_success()?;

        Ok(self.transition())
    }
}

impl<S> Client<S, MailTransaction>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Adds the first recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Client<S, RecipientAdded>> {
        self.send_command(Command::RcptTo { to }).await?.into_success()?;
        Ok(self.transition())
    }
}

impl<S> Client<S, RecipientAdded>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Adds another recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Self> {
        self.send_command(Command::RcptTo { to }).await?.into_success()?;
        Ok(self)
    }

    /// Begins sending message data.
    ///
    /// # Errors
    ///
    /// Returns an error if the DATA command fails.
    pub async fn data(mut self) -> Result<Client<S, Data>> {
        self.send_command(Command::Data)
            .await?
            .require(|code| code == ReplyCode::START_DATA)?;
        Ok(self.transition())
    }
}

impl<S> Client<S, Data>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Sends the message content and completes the transaction.
    ///
    /// Line endings are normalized to CRLF, lines starting with `.` are
    /// dot-stuffed, and the terminating `.` line is added.
    ///
    /// # Errors
    ///
    /// Returns an error if sending the message fails or server rejects it.
    pub async fn send_message(mut self, message: &[u8]) -> Result<Client<S, Connected>> {
        self.stream.write_all(&encode_data(message)).await?;

        let reply = read_reply(&mut self.stream).await?.into_success()?;
        tracing::debug!(code = %reply.code, "Message accepted");

        Ok(self.transition())
    }
}

// Common implementation for all states
impl<S, State> Client<S, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn send_command(&mut self, cmd: Command) -> Result<Reply> {
        self.stream.write_all(&cmd.serialize()).await?;
        let reply = read_reply(&mut self.stream).await?;
        tracing::debug!(command = cmd.verb(), code = %reply.code, "SMTP reply");
        Ok(reply)
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub async fn quit(mut self) -> Result<()> {
        self.send_command(Command::Quit)
            .await?
            .require(|code| code.is_success() || code == ReplyCode::CLOSING)?;
        Ok(())
    }
}

async fn read_reply<S>(stream: &mut SmtpStream<S>) -> Result<Reply>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut accumulator = ReplyAccumulator::new();
    loop {
        let line = stream.read_line().await?;
        if line.is_empty() {
            continue;
        }
        if let Some(reply) = accumulator.push(&line)? {
            return Ok(reply);
        }
    }
}

/// Encodes a message for the DATA phase.
///
/// Bare LF and CRLF both become CRLF, leading dots are doubled, and the
/// `.` terminator line follows. A trailing line break in the message does
/// not produce an extra empty line.
fn encode_data(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + message.len() / 64 + 5);

    let body = message.strip_suffix(b"\n").unwrap_or(message);
    let body = body.strip_suffix(b"\r").unwrap_or(body);

    if !message.is_empty() {
        for line in body.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.first() == Some(&b'.') {
                out.push(b'.');
            }
            out.extend_from_slice(line);
            out.extend_from_slice(b"\r\n");
        }
    }

    out.extend_from_slice(b".\r\n");
    out
}
