use resp_wire::WireError;

/// Errors that can occur while decoding a command stream.
///
/// Every error aborts the decode step in flight. The buffer is not
/// rolled back, so after anything other than [`EndOfStream`] the stream
/// position is undefined and the connection should be dropped.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── grammar (bytes do not match the expected token)
///   │   ├── ExpectNumber       ← sign without digits, or no digits
///   │   ├── ExpectNewLine      ← terminator was not CR LF
///   │   ├── ExpectTypeChar     ← wrong marker where a token must start
///   │   └── NumberOverflow     ← digit run left the i64 range
///   ├── policy (input exceeds a configured bound)
///   │   ├── InvalidNumArg      ← argc < -1 or above max_num_args
///   │   ├── InvalidBulkSize    ← length < -1 or above max_bulk_size
///   │   └── LineTooLong        ← inline or status line over its limit
///   └── source
///       ├── EndOfStream        ← clean end between commands
///       ├── UnexpectedEof      ← source ended inside a command
///       └── Io(std::io::Error) ← any other read failure
/// ```
///
/// [`EndOfStream`]: DecodeError::EndOfStream
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("protocol error: expected a number")]
    ExpectNumber,

    #[error("protocol error: expected CRLF")]
    ExpectNewLine,

    #[error("protocol error: expected {expected:?}, found {found:#04X}")]
    ExpectTypeChar { expected: char, found: u8 },

    #[error("protocol error: number does not fit in 64 bits ({digits} digits)")]
    NumberOverflow { digits: usize },

    /// The multi-bulk argument count is negative (other than the null
    /// array) or larger than the configured maximum.
    #[error("invalid argument count {count} (limit {limit})")]
    InvalidNumArg { count: i64, limit: usize },

    /// The bulk string length is negative (other than the null bulk) or
    /// larger than the configured maximum.
    #[error("invalid bulk size {size} (limit {limit})")]
    InvalidBulkSize { size: i64, limit: usize },

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// The source is exhausted at a command boundary. This is how a
    /// command sequence normally ends.
    #[error("end of stream")]
    EndOfStream,

    /// The source ended part-way through a command.
    #[error("stream ended inside a command after {consumed} bytes")]
    UnexpectedEof { consumed: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// `true` for the clean end-of-stream signal.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// `true` when the bytes themselves were malformed or over a limit,
    /// as opposed to the source failing.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        !matches!(
            self,
            Self::EndOfStream | Self::UnexpectedEof { .. } | Self::Io(_)
        )
    }

    /// `true` for the configured-limit violations.
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumArg { .. } | Self::InvalidBulkSize { .. } | Self::LineTooLong { .. }
        )
    }
}

impl From<WireError> for DecodeError {
    fn from(e: WireError) -> Self {
        match e {
            WireError::ExpectNumber => Self::ExpectNumber,
            WireError::NumberOverflow { digits } => Self::NumberOverflow { digits },
        }
    }
}

/// Errors from [`ParserConfig::validate`](crate::ParserConfig::validate).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial buffer size must be non-zero")]
    ZeroInitialBuffer,
}
