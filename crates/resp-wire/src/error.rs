/// Errors raised by the wire vocabulary layer.
///
/// These cover the integer token shared by every length prefix and
/// reply. Higher layers map them into their own error types.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A sign was followed by a non-digit, or no digit appeared at all.
    #[error("expected a number")]
    ExpectNumber,

    /// The digit run does not fit in a signed 64-bit integer.
    #[error("number does not fit in 64 bits (after {digits} digits)")]
    NumberOverflow { digits: usize },
}
