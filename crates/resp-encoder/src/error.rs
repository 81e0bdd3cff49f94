/// Errors that can occur while encoding commands.
///
/// Bulk strings are length-prefixed and can carry any bytes; only the
/// line-based productions have content restrictions.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── InvalidStatus       ← status text contains CR or LF
///   ├── InvalidInlineToken  ← inline token is empty, holds space/CR/LF,
///   │                         or the line starts with a type marker
///   └── Io(std::io::Error)  ← from the destination writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("status text at frame {index} contains CR or LF")]
    InvalidStatus { index: usize },

    #[error("inline token {token} at frame {index} is empty or contains a separator")]
    InvalidInlineToken { index: usize, token: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
