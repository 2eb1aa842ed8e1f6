//! SMTP response parser.
//!
//! SMTP replies can be single-line or multi-line:
//! - Single: `250 OK\r\n`
//! - Multi: `250-First line\r\n250-Second line\r\n250 Last line\r\n`

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// One line of a reply, with the line terminator already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyLine<'a> {
    /// Three-digit reply code.
    pub code: ReplyCode,
    /// True for the final line (`250 ...`), false for continuations (`250-...`).
    pub is_last: bool,
    /// Text after the separator.
    pub text: &'a str,
}

/// Parses one reply line.
///
/// # Errors
///
/// Returns an error if the line does not start with a three-digit code
/// followed by end of line, a space or a hyphen.
pub fn parse_line(line: &str) -> Result<ReplyLine<'_>> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(Error::Protocol(format!("Invalid reply line: {line}")));
    }

    let code = line[..3]
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("Invalid reply code: {line}")))?;

    let (is_last, text) = match bytes.get(3) {
        None => (true, ""),
        Some(b' ') => (true, &line[4..]),
        Some(b'-') => (false, &line[4..]),
        Some(_) => {
            return Err(Error::Protocol(format!("Malformed reply line: {line}")));
        }
    };

    Ok(ReplyLine {
        code: ReplyCode::new(code),
        is_last,
        text,
    })
}

/// Accumulates reply lines until the final one arrives.
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    code: Option<ReplyCode>,
    message: Vec<String>,
}

impl ReplyAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line; returns the finished reply after the last line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is malformed or its code differs from
    /// the code of the earlier lines.
    pub fn push(&mut self, line: &str) -> Result<Option<Reply>> {
        let parsed = parse_line(line)?;

        match self.code {
            Some(code) if code != parsed.code => {
                return Err(Error::Protocol(format!(
                    "Reply code changed mid-reply: {code} then {}",
                    parsed.code
                )));
            }
            Some(_) => {}
            None => self.code = Some(parsed.code),
        }

        self.message.push(parsed.text.to_string());

        if parsed.is_last {
            let message = std::mem::take(&mut self.message);
            self.code = None;
            Ok(Some(Reply::new(parsed.code, message)))
        } else {
            Ok(None)
        }
    }
}

/// Parses a complete reply from its lines.
///
/// # Errors
///
/// Returns an error if the reply is empty, malformed, or does not end with
/// a final line.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let mut accumulator = ReplyAccumulator::new();
    let mut lines = lines.iter();

    while let Some(line) = lines.next() {
        if let Some(reply) = accumulator.push(line)? {
            if lines.next().is_some() {
                return Err(Error::Protocol("Trailing lines after final reply line".into()));
            }
            return Ok(reply);
        }
    }

    Err(Error::Protocol("Incomplete reply".into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_single_line_reply() {
        let reply = parse_reply(&lines(&["250 OK"])).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.message, vec!["OK"]);
        assert!(reply.is_success());
    }

    #[test]
    fn test_parse_multi_line_reply() {
        let reply = parse_reply(&lines(&[
            "250-smtp.example.com",
            "250-AUTH PLAIN LOGIN",
            "250 8BITMIME",
        ]))
        .unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(
            reply.message,
            vec!["smtp.example.com", "AUTH PLAIN LOGIN", "8BITMIME"]
        );
    }

    #[test]
    fn test_parse_code_only() {
        let reply = parse_reply(&lines(&["354"])).unwrap();
        assert_eq!(reply.code, ReplyCode::START_DATA);
        assert_eq!(reply.message, vec![""]);
    }

    #[test]
    fn test_parse_line_continuation_flag() {
        let line = parse_line("220-greeting").unwrap();
        assert!(!line.is_last);
        assert_eq!(line.text, "greeting");
        assert!(parse_line("220 ready").unwrap().is_last);
    }

    #[test]
    fn test_parse_error_empty() {
        assert!(parse_reply(&[]).is_err());
    }

    #[test]
    fn test_parse_error_too_short() {
        assert!(parse_reply(&lines(&["25"])).is_err());
    }

    #[test]
    fn test_parse_error_invalid_code() {
        assert!(parse_reply(&lines(&["ABC OK"])).is_err());
        assert!(parse_reply(&lines(&["+25 OK"])).is_err());
    }

    #[test]
    fn test_parse_error_bad_separator() {
        assert!(parse_reply(&lines(&["250_OK"])).is_err());
    }

    #[test]
    fn test_parse_error_incomplete() {
        assert!(parse_reply(&lines(&["250-First", "250-Second"])).is_err());
    }

    #[test]
    fn test_parse_error_code_mismatch() {
        let err = parse_reply(&lines(&["250-First", "550 Second"])).unwrap_err();
        assert!(err.to_string().contains("changed mid-reply"));
    }

    #[test]
    fn test_parse_error_trailing_lines() {
        assert!(parse_reply(&lines(&["250 OK", "250 Again"])).is_err());
    }

    #[test]
    fn test_accumulator_reusable() {
        let mut acc = ReplyAccumulator::new();
        assert!(acc.push("250-one").unwrap().is_none());
        let first = acc.push("250 two").unwrap().unwrap();
        assert_eq!(first.message, vec!["one", "two"]);

        let second = acc.push("221 bye").unwrap().unwrap();
        assert_eq!(second.code, ReplyCode::CLOSING);
        assert_eq!(second.message, vec!["bye"]);
    }
}
