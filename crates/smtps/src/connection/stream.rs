//! Low-level SMTP stream handling.

use crate::error::{Error, Result};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};

/// Maximum reply line length, well above the 512 octets RFC 5321 allows.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Line-oriented SMTP stream over any transport.
///
/// Reads are buffered; every write is flushed immediately. When an I/O
/// timeout is set, each read or write must finish within it.
#[derive(Debug)]
pub struct SmtpStream<S> {
    reader: BufReader<S>,
    io_timeout: Option<Duration>,
}

impl<S> SmtpStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a transport without any I/O timeout.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::new(stream),
            io_timeout: None,
        }
    }

    /// Sets the per-operation I/O timeout.
    #[must_use]
    pub const fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    /// Reads a line from the stream, without the line terminator.
    ///
    /// At most 64 KiB are buffered per line, terminator included.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or times out, if the peer closed
    /// the connection before a complete line, or if the line is too long.
    pub async fn read_line(&mut self) -> Result<String> {
        let timeout = self.io_timeout;
        let reader = &mut self.reader;

        let raw = with_timeout(timeout, async move {
            let mut raw = Vec::new();
            (&mut *reader)
                .take(MAX_LINE_LENGTH as u64 + 1)
                .read_until(b'\n', &mut raw)
                .await?;
            Ok::<_, Error>(raw)
        })
        .await?;

        if raw.len() > MAX_LINE_LENGTH {
            return Err(Error::Protocol("Reply line too long".into()));
        }
        if raw.last() != Some(&b'\n') {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed by server",
            )));
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Writes data to the stream and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or times out.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let timeout = self.io_timeout;
        let stream = self.reader.get_mut();

        with_timeout(timeout, async move {
            stream.write_all(data).await?;
            stream.flush().await?;
            Ok::<_, Error>(())
        })
        .await
    }

    /// Returns the underlying transport.
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}

async fn with_timeout<T>(
    timeout: Option<Duration>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await?,
        None => fut.await,
    }
}
