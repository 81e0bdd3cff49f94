use resp_types::Command;
use resp_wire::Marker;
use tracing::{debug, trace};

use crate::buffer::ReadBuffer;
use crate::config::ParserConfig;
use crate::error::{ConfigError, DecodeError};
use crate::grammar;
use crate::source::ByteSource;

/// Pull-based command decoder over one ordered byte stream.
///
/// Each [`read_command`](Self::read_command) call runs one complete
/// decode step:
///
/// ```text
///   1. nothing buffered?  fetch ≥ 1 byte   (EOF here = EndOfStream)
///   2. dispatch on the byte at the cursor:
///        '*'  → multi-bulk        → Multi
///        '$'  → bulk string       → BulkString
///        ':'  → integer line      → Integer
///        '+'  → status line       → SimpleStatus
///        '\n' → empty line        → no command
///        else → inline line       → Multi
///   3. stamp byte_length
///   4. buffer drained?  mark final_in_batch, reset the buffer
/// ```
///
/// The only state carried between calls is the unconsumed tail of the
/// read buffer, so pipelined commands that arrived in one read come out
/// one per call, in order, without touching the source again.
///
/// A parser owns its buffer and must not be shared between streams or
/// threads; move it to the thread that reads.
///
/// # Example
///
/// ```rust
/// use resp_decoder::Parser;
///
/// let input: &[u8] = b"*1\r\n$4\r\nPING\r\n*1\r\n$4\r\nPING\r\n";
/// let mut parser = Parser::new(input);
///
/// let first = parser.read_command().unwrap().unwrap();
/// assert_eq!(first.name(), Some(&b"PING"[..]));
/// assert!(!first.is_final_in_batch());
///
/// let second = parser.read_command().unwrap().unwrap();
/// assert!(second.is_final_in_batch());
/// ```
pub struct Parser<S> {
    buffer: ReadBuffer<S>,
    config: ParserConfig,
    position: u64,
}

impl<S: ByteSource> Parser<S> {
    /// Create a parser with the default limits.
    #[must_use]
    pub fn new(source: S) -> Self {
        let config = ParserConfig::default();
        Self {
            buffer: ReadBuffer::new(source, config.initial_buffer_size),
            config,
            position: 0,
        }
    }

    /// Create a parser with explicit limits.
    ///
    /// # Errors
    ///
    /// Whatever [`ParserConfig::validate`] rejects.
    pub fn with_config(source: S, config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buffer: ReadBuffer::new(source, config.initial_buffer_size),
            config,
            position: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The read buffer, for inspection.
    #[must_use]
    pub fn buffer(&self) -> &ReadBuffer<S> {
        &self.buffer
    }

    /// Stream offset just past the last completed decode step, no-ops
    /// included.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Drop the parser and hand back its source.
    pub fn into_source(self) -> S {
        self.buffer.into_source()
    }

    /// Decode the next unit from the stream.
    ///
    /// Returns `Ok(Some(command))` for a decoded command and `Ok(None)`
    /// for a tolerated no-op (a bare `\n`, or the null array `*-1`).
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EndOfStream`] when the source is exhausted between
    ///   commands. This is the normal end of a sequence.
    /// - [`DecodeError::UnexpectedEof`] when it ends inside a command.
    /// - Any grammar or policy error. These leave the stream position
    ///   undefined; stop reading from this parser.
    pub fn read_command(&mut self) -> Result<Option<Command>, DecodeError> {
        if self.buffer.is_drained() {
            self.buffer.fetch_at_least(1)?;
        }

        let begin = self.buffer.parse_index();
        let command = match self.decode_step() {
            Ok(command) => command,
            Err(DecodeError::EndOfStream) => {
                let consumed = self.buffer.parse_index() - begin;
                debug!(consumed, "stream ended inside a command");
                return Err(DecodeError::UnexpectedEof { consumed });
            }
            Err(e) => {
                debug!(error = %e, offset = self.buffer.parse_index(), "decode failed");
                return Err(e);
            }
        };

        let byte_length = self.buffer.parse_index() - begin;
        self.position += byte_length as u64;
        let drained = self.buffer.is_drained();
        if drained {
            self.buffer.reset();
        }

        Ok(command.map(|c| {
            let c = c
                .with_byte_length(byte_length)
                .with_final_in_batch(drained);
            trace!(command = %c, "decoded");
            c
        }))
    }

    /// Dispatch on the byte at the cursor. At least one byte is buffered.
    fn decode_step(&mut self) -> Result<Option<Command>, DecodeError> {
        let first = self.buffer.peek().ok_or(DecodeError::EndOfStream)?;
        let buf = &mut self.buffer;
        let config = &self.config;

        match Marker::classify(first) {
            Marker::Array => {
                let values = grammar::read_multi(buf, config)?;
                if values.is_none() {
                    trace!("null array, no command");
                }
                Ok(values.map(Command::multi))
            }
            Marker::Bulk => Ok(Some(Command::bulk(grammar::read_bulk(buf, config)?))),
            Marker::Integer => Ok(Some(Command::integer(grammar::read_integer(buf)?))),
            Marker::Status => Ok(Some(Command::status(grammar::read_status(buf, config)?))),
            Marker::EmptyLine => {
                buf.advance(1);
                trace!("empty line, no command");
                Ok(None)
            }
            Marker::Inline => Ok(Some(Command::multi(grammar::read_inline(buf, config)?))),
        }
    }

    /// Iterate over decoded commands until the stream ends.
    ///
    /// No-ops are skipped. The iterator ends cleanly on end-of-stream;
    /// any other error is yielded once and then the iterator ends.
    pub fn commands(&mut self) -> Commands<'_, S> {
        Commands {
            parser: self,
            done: false,
        }
    }
}

/// Iterator returned by [`Parser::commands`].
pub struct Commands<'a, S> {
    parser: &'a mut Parser<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for Commands<'_, S> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.parser.read_command() {
                Ok(Some(command)) => return Some(Ok(command)),
                Ok(None) => {}
                Err(e) if e.is_end_of_stream() => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
