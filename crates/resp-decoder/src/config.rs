use crate::error::ConfigError;

/// Default size of the first read buffer allocation (64 KiB).
pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 1 << 16;
/// Default ceiling on multi-bulk argument counts.
pub const DEFAULT_MAX_NUM_ARGS: usize = 20;
/// Default ceiling on a single bulk string body (64 KiB).
pub const DEFAULT_MAX_BULK_SIZE: usize = 1 << 16;
/// Default ceiling on an inline (telnet) line (1 KiB).
pub const DEFAULT_MAX_INLINE_LINE: usize = 1 << 10;
/// Default ceiling on a status line's text (64 KiB).
pub const DEFAULT_MAX_STATUS_LINE: usize = 1 << 16;

/// Limits and sizing for a [`Parser`](crate::Parser).
///
/// Passed once at construction; a parser never changes its limits
/// mid-stream.
///
/// ```text
/// ┌─────────────────────┬─────────┬──────────────────────────────────┐
/// │ Field               │ Default │ Violation                        │
/// ├─────────────────────┼─────────┼──────────────────────────────────┤
/// │ initial_buffer_size │ 64 KiB  │ (sizing only, also growth step)  │
/// │ max_num_args        │ 20      │ InvalidNumArg                    │
/// │ max_bulk_size       │ 64 KiB  │ InvalidBulkSize                  │
/// │ max_inline_line     │ 1 KiB   │ LineTooLong                      │
/// │ max_status_line     │ 64 KiB  │ LineTooLong                      │
/// └─────────────────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// Override individual fields with struct update syntax:
///
/// ```rust
/// use resp_decoder::ParserConfig;
///
/// let config = ParserConfig {
///     max_num_args: 1024,
///     ..ParserConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Bytes allocated up front. Also added to every growth step so a
    /// small initial size does not cause a long chain of reallocations.
    pub initial_buffer_size: usize,

    /// Largest accepted `*<argc>`.
    pub max_num_args: usize,

    /// Largest accepted `$<length>`.
    pub max_bulk_size: usize,

    /// Longest inline line, excluding its terminator.
    pub max_inline_line: usize,

    /// Longest status text, excluding marker and terminator.
    pub max_status_line: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            initial_buffer_size: DEFAULT_INITIAL_BUFFER_SIZE,
            max_num_args: DEFAULT_MAX_NUM_ARGS,
            max_bulk_size: DEFAULT_MAX_BULK_SIZE,
            max_inline_line: DEFAULT_MAX_INLINE_LINE,
            max_status_line: DEFAULT_MAX_STATUS_LINE,
        }
    }
}

impl ParserConfig {
    /// Check the configuration before a parser is built from it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroInitialBuffer`] when `initial_buffer_size` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_buffer_size == 0 {
            return Err(ConfigError::ZeroInitialBuffer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let c = ParserConfig::default();
        assert_eq!(c.initial_buffer_size, 65536);
        assert_eq!(c.max_num_args, 20);
        assert_eq!(c.max_bulk_size, 65536);
        assert_eq!(c.max_inline_line, 1024);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_initial_buffer_rejected() {
        let c = ParserConfig {
            initial_buffer_size: 0,
            ..ParserConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroInitialBuffer));
    }
}
