//! Raw line transport with escaping and single-line lookahead.

use std::io::{Read, Write};

use bytes::BytesMut;

use crate::error::{ProtocolError, ProtocolResult};

/// Maximum physical line size (1MB)
const MAX_LINE_SIZE: usize = 1024 * 1024;

/// Escape a logical value so it occupies exactly one physical line.
///
/// `\` becomes `\\` and a newline becomes the two characters `\n`.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`escape`]. Rejects unknown escape sequences and a dangling
/// trailing backslash.
pub fn unescape(value: &str) -> ProtocolResult<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some(other) => return Err(ProtocolError::InvalidEscape(other)),
            None => return Err(ProtocolError::DanglingEscape),
        }
    }
    Ok(out)
}

/// Blocking line transport over a pipe.
///
/// Reads buffer through [`BytesMut`]; writes flush immediately so the host
/// never waits on a partially written reply. `peek_line` retains exactly one
/// line of lookahead which the next `read_line` consumes.
pub struct Transport<R: Read, W: Write> {
    reader: R,
    writer: W,
    buf: BytesMut,
    /// One line of lookahead; the inner `None` records a peeked EOF.
    lookahead: Option<Option<String>>,
}

impl<R: Read, W: Write> Transport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Transport {
            reader,
            writer,
            buf: BytesMut::with_capacity(4096),
            lookahead: None,
        }
    }

    /// Block until a full line or end-of-stream. Returns the unescaped
    /// logical value, or `None` at a clean end-of-stream.
    pub fn read_line(&mut self) -> ProtocolResult<Option<String>> {
        if let Some(peeked) = self.lookahead.take() {
            return Ok(peeked);
        }
        self.next_line()
    }

    /// Like [`Transport::read_line`] but retains the line; the next
    /// `read_line` returns the same value.
    pub fn peek_line(&mut self) -> ProtocolResult<Option<&str>> {
        if self.lookahead.is_none() {
            let line = self.next_line()?;
            self.lookahead = Some(line);
        }
        Ok(self.lookahead.as_ref().and_then(|line| line.as_deref()))
    }

    fn next_line(&mut self) -> ProtocolResult<Option<String>> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let line = self.buf.split_to(pos + 1);
                let end = if pos > 0 && line[pos - 1] == b'\r' {
                    pos - 1
                } else {
                    pos
                };
                let text = String::from_utf8_lossy(&line[..end]).to_string();
                return unescape(&text).map(Some);
            }

            if self.buf.len() > MAX_LINE_SIZE {
                return Err(ProtocolError::LineTooLong {
                    size: self.buf.len(),
                    max: MAX_LINE_SIZE,
                });
            }

            let mut chunk = [0u8; 4096];
            let n = self.reader.read(&mut chunk)?;
            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                // Partial line at EOF: the host died mid-write.
                return Err(ProtocolError::UnexpectedEof);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Consume the transport, returning the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Write one already-framed physical line and flush.
    pub fn write_raw_line(&mut self, line: &str) -> ProtocolResult<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn transport(input: &str) -> Transport<Cursor<Vec<u8>>, Vec<u8>> {
        Transport::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_escape_round_trip() {
        for value in [
            "plain",
            "back\\slash",
            "multi\nline",
            "\\n literal",
            "trailing\\",
            "\n\n\\\\\n",
            "",
        ] {
            assert_eq!(unescape(&escape(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_unescape_rejects_bad_sequences() {
        assert!(matches!(
            unescape("bad\\q"),
            Err(ProtocolError::InvalidEscape('q'))
        ));
        assert!(matches!(
            unescape("dangling\\"),
            Err(ProtocolError::DanglingEscape)
        ));
    }

    #[test]
    fn test_read_line_unescapes() {
        let mut t = transport("a\\nb\r\nsecond\n");
        assert_eq!(t.read_line().unwrap().unwrap(), "a\nb");
        assert_eq!(t.read_line().unwrap().unwrap(), "second");
        assert_eq!(t.read_line().unwrap(), None);
    }

    #[test]
    fn test_peek_retains_one_line() {
        let mut t = transport("first\nsecond\n");
        assert_eq!(t.peek_line().unwrap().unwrap(), "first");
        assert_eq!(t.peek_line().unwrap().unwrap(), "first");
        assert_eq!(t.read_line().unwrap().unwrap(), "first");
        assert_eq!(t.read_line().unwrap().unwrap(), "second");
    }

    #[test]
    fn test_peek_at_eof() {
        let mut t = transport("");
        assert_eq!(t.peek_line().unwrap(), None);
        assert_eq!(t.read_line().unwrap(), None);
    }

    #[test]
    fn test_partial_line_at_eof_is_error() {
        let mut t = transport("no newline");
        assert!(matches!(
            t.read_line(),
            Err(ProtocolError::UnexpectedEof)
        ));
    }
}
