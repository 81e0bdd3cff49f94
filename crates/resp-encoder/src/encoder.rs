use resp_types::{Command, CommandKind};
use resp_wire::Marker;
use resp_wire::marker::bytes::{CR, LF, SPACE};

use crate::error::EncodeError;
use crate::frame_writer;

/// RESP encoder: builds a pipelined byte stream from typed frames.
///
/// Methods like [`add_multi`](Self::add_multi) and
/// [`add_status`](Self::add_status) append frames to an internal list;
/// [`encode`](Self::encode) validates them and writes them back to back,
/// in insertion order, as one contiguous buffer. Feeding that buffer to
/// a parser in a single read yields the same commands in the same order,
/// with only the last one flagged final-in-batch.
///
/// # Usage
///
/// ```rust
/// use resp_encoder::CommandEncoder;
///
/// let payload = CommandEncoder::new()
///     .add_multi(&["SET", "key", "value"])
///     .add_multi(&["GET", "key"])
///     .add_status("OK")
///     .encode()
///     .unwrap();
///
/// assert!(payload.starts_with(b"*3\r\n$3\r\nSET\r\n"));
/// assert!(payload.ends_with(b"+OK\r\n"));
/// ```
///
/// # Frame forms
///
/// ```text
/// ┌──────────────────┬────────────────────────────────────────┐
/// │ add_multi        │ *<n>\r\n then n × $<len>\r\n<arg>\r\n  │
/// │ add_null_array   │ *-1\r\n\r\n                            │
/// │ add_bulk         │ $<len>\r\n<bytes>\r\n                  │
/// │ add_null_bulk    │ $-1\r\n                                │
/// │ add_integer      │ :<decimal>\r\n                         │
/// │ add_status       │ +<text>\r\n                            │
/// │ add_inline       │ <tok> <tok> ...\r\n                    │
/// │ add_empty_line   │ \n                                     │
/// └──────────────────┴────────────────────────────────────────┘
/// ```
#[derive(Debug, Default, Clone)]
pub struct CommandEncoder {
    frames: Vec<PendingFrame>,
}

/// A frame awaiting serialization.
#[derive(Debug, Clone)]
enum PendingFrame {
    Multi(Vec<Option<Vec<u8>>>),
    NullArray,
    Bulk(Option<Vec<u8>>),
    Integer(i64),
    Status(Vec<u8>),
    Inline(Vec<Vec<u8>>),
    EmptyLine,
}

impl CommandEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a multi-bulk command whose arguments are all present.
    pub fn add_multi<A: AsRef<[u8]>>(&mut self, args: &[A]) -> &mut Self {
        let values = args.iter().map(|a| Some(a.as_ref().to_vec())).collect();
        self.frames.push(PendingFrame::Multi(values));
        self
    }

    /// Append a multi-bulk command where `None` elements encode as
    /// null bulk strings.
    pub fn add_multi_nullable<A: AsRef<[u8]>>(&mut self, args: &[Option<A>]) -> &mut Self {
        let values = args
            .iter()
            .map(|a| a.as_ref().map(|v| v.as_ref().to_vec()))
            .collect();
        self.frames.push(PendingFrame::Multi(values));
        self
    }

    /// Append the null array `*-1` with the trailing empty line a parser
    /// discards along with it.
    pub fn add_null_array(&mut self) -> &mut Self {
        self.frames.push(PendingFrame::NullArray);
        self
    }

    pub fn add_bulk(&mut self, value: impl AsRef<[u8]>) -> &mut Self {
        self.frames
            .push(PendingFrame::Bulk(Some(value.as_ref().to_vec())));
        self
    }

    pub fn add_null_bulk(&mut self) -> &mut Self {
        self.frames.push(PendingFrame::Bulk(None));
        self
    }

    pub fn add_integer(&mut self, value: i64) -> &mut Self {
        self.frames.push(PendingFrame::Integer(value));
        self
    }

    /// Append a status line. The text must not contain CR or LF;
    /// [`encode`](Self::encode) rejects it otherwise.
    pub fn add_status(&mut self, text: impl AsRef<[u8]>) -> &mut Self {
        self.frames
            .push(PendingFrame::Status(text.as_ref().to_vec()));
        self
    }

    /// Append an inline command. Tokens must be non-empty and free of
    /// spaces, CR and LF, and the first token must not start with a
    /// RESP type marker.
    ///
    /// A parser drops whatever follows an inline line in the same read,
    /// so put inline frames last in a payload meant to be read at once.
    pub fn add_inline<A: AsRef<[u8]>>(&mut self, tokens: &[A]) -> &mut Self {
        let tokens = tokens.iter().map(|t| t.as_ref().to_vec()).collect();
        self.frames.push(PendingFrame::Inline(tokens));
        self
    }

    /// Append a bare `\n`, which a parser reads as a no-op.
    pub fn add_empty_line(&mut self) -> &mut Self {
        self.frames.push(PendingFrame::EmptyLine);
        self
    }

    /// Append the wire form of an already decoded command.
    pub fn add_command(&mut self, command: &Command) -> &mut Self {
        match command.kind() {
            CommandKind::Multi => {
                let values = command
                    .values()
                    .iter()
                    .map(|v| v.as_ref().map(|b| b.to_vec()))
                    .collect();
                self.frames.push(PendingFrame::Multi(values));
            }
            CommandKind::BulkString => {
                let value = command.values().first().cloned().flatten();
                self.frames
                    .push(PendingFrame::Bulk(value.map(|b| b.to_vec())));
            }
            CommandKind::Integer => {
                self.frames
                    .push(PendingFrame::Integer(command.integer_value()));
            }
            CommandKind::SimpleStatus => {
                let text = command.get(0).unwrap_or_default();
                self.frames.push(PendingFrame::Status(text.to_vec()));
            }
        }
        self
    }

    /// Number of frames added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize every frame into one contiguous buffer.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidStatus`] if a status text contains CR or LF.
    /// - [`EncodeError::InvalidInlineToken`] if an inline token is empty
    ///   or contains a space, CR or LF.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        for (index, frame) in self.frames.iter().enumerate() {
            validate_frame(index, frame)?;
            write_frame(&mut out, frame);
        }
        Ok(out)
    }

    /// Serialize into `writer`. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Validation errors as for [`encode`](Self::encode), plus
    /// [`EncodeError::Io`] if the writer fails.
    pub fn write_to<W: std::io::Write>(&self, writer: &mut W) -> Result<usize, EncodeError> {
        let out = self.encode()?;
        writer.write_all(&out)?;
        Ok(out.len())
    }
}

fn validate_frame(index: usize, frame: &PendingFrame) -> Result<(), EncodeError> {
    match frame {
        PendingFrame::Status(text) if text.iter().any(|&b| b == CR || b == LF) => {
            Err(EncodeError::InvalidStatus { index })
        }
        PendingFrame::Inline(tokens) => {
            // a leading marker byte would be decoded as a typed frame
            if let Some(&first) = tokens.first().and_then(|t| t.first())
                && Marker::classify(first) != Marker::Inline
            {
                return Err(EncodeError::InvalidInlineToken { index, token: 0 });
            }
            let bad = tokens
                .iter()
                .position(|t| t.is_empty() || t.iter().any(|&b| b == SPACE || b == CR || b == LF));
            match bad {
                Some(token) => Err(EncodeError::InvalidInlineToken { index, token }),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}

fn write_frame(out: &mut Vec<u8>, frame: &PendingFrame) {
    match frame {
        PendingFrame::Multi(values) => {
            frame_writer::write_array_header(out, i64::try_from(values.len()).unwrap_or(i64::MAX));
            for value in values {
                frame_writer::write_bulk(out, value.as_deref());
            }
        }
        PendingFrame::NullArray => {
            frame_writer::write_array_header(out, -1);
            out.extend_from_slice(resp_wire::marker::bytes::CRLF);
        }
        PendingFrame::Bulk(value) => frame_writer::write_bulk(out, value.as_deref()),
        PendingFrame::Integer(value) => frame_writer::write_integer(out, *value),
        PendingFrame::Status(text) => frame_writer::write_status(out, text),
        PendingFrame::Inline(tokens) => frame_writer::write_inline(out, tokens),
        PendingFrame::EmptyLine => frame_writer::write_empty_line(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resp_decoder::Parser;

    fn decode_all(payload: &[u8]) -> Vec<Command> {
        Parser::new(payload)
            .commands()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn empty_encoder_produces_nothing() {
        let enc = CommandEncoder::new();
        assert!(enc.is_empty());
        assert!(enc.encode().unwrap().is_empty());
    }

    #[test]
    fn frames_keep_insertion_order() {
        let payload = CommandEncoder::new()
            .add_status("OK")
            .add_integer(-7)
            .add_null_bulk()
            .encode()
            .unwrap();
        assert_eq!(payload, b"+OK\r\n:-7\r\n$-1\r\n");
    }

    #[test]
    fn nullable_multi() {
        let payload = CommandEncoder::new()
            .add_multi_nullable(&[Some("a"), None])
            .encode()
            .unwrap();
        assert_eq!(payload, b"*2\r\n$1\r\na\r\n$-1\r\n");
    }

    #[test]
    fn null_array_carries_trailing_line() {
        let payload = CommandEncoder::new().add_null_array().encode().unwrap();
        assert_eq!(payload, b"*-1\r\n\r\n");
    }

    #[test]
    fn status_with_newline_rejected() {
        let err = CommandEncoder::new()
            .add_status("OK")
            .add_status("bad\r\nline")
            .encode()
            .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidStatus { index: 1 }));
    }

    #[test]
    fn inline_token_with_space_rejected() {
        let err = CommandEncoder::new()
            .add_inline(&["SET", "a b"])
            .encode()
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidInlineToken { index: 0, token: 1 }
        ));
    }

    #[test]
    fn inline_starting_with_marker_rejected() {
        let err = CommandEncoder::new()
            .add_inline(&["+PING"])
            .encode()
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidInlineToken { index: 0, token: 0 }
        ));
    }

    #[test]
    fn decoded_commands_reencode_identically() {
        let original = CommandEncoder::new()
            .add_multi_nullable(&[Some(&b"SET"[..]), Some(&b"k"[..]), None])
            .add_bulk(b"\x00\r\n\xff")
            .add_integer(1000)
            .add_status("PONG")
            .encode()
            .unwrap();

        let mut enc = CommandEncoder::new();
        for cmd in decode_all(&original) {
            enc.add_command(&cmd);
        }
        assert_eq!(enc.encode().unwrap(), original);
    }

    #[test]
    fn write_to_reports_length() {
        let mut sink = Vec::new();
        let n = CommandEncoder::new()
            .add_multi(&["PING"])
            .write_to(&mut sink)
            .unwrap();
        assert_eq!(n, sink.len());
        assert_eq!(sink, b"*1\r\n$4\r\nPING\r\n");
    }
}
