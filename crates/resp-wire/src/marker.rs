/// Raw byte constants of the wire grammar.
///
/// ```text
///   *  multi-bulk header    *<argc>\r\n
///   $  bulk string header   $<len>\r\n<bytes>\r\n
///   :  integer line         :<n>\r\n
///   +  status line          +<text>\r\n
///   \n empty line           tolerated, yields nothing
/// ```
pub mod bytes {
    pub const ARRAY: u8 = b'*';
    pub const BULK: u8 = b'$';
    pub const INTEGER: u8 = b':';
    pub const STATUS: u8 = b'+';
    pub const CR: u8 = b'\r';
    pub const LF: u8 = b'\n';
    pub const SPACE: u8 = b' ';
    pub const CRLF: &[u8; 2] = b"\r\n";
}

/// Classification of the byte found at the start of a command.
///
/// Every byte maps onto exactly one variant; anything that is not one
/// of the four type markers or a bare LF falls through to `Inline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Array,
    Bulk,
    Integer,
    Status,
    EmptyLine,
    Inline,
}

impl Marker {
    /// Classify a leading byte.
    #[must_use]
    pub fn classify(byte: u8) -> Self {
        match byte {
            bytes::ARRAY => Self::Array,
            bytes::BULK => Self::Bulk,
            bytes::INTEGER => Self::Integer,
            bytes::STATUS => Self::Status,
            bytes::LF => Self::EmptyLine,
            _ => Self::Inline,
        }
    }

    /// The wire byte that introduces this marker, if it has one.
    ///
    /// `Inline` has no marker of its own; its first byte is data.
    #[must_use]
    pub fn byte(self) -> Option<u8> {
        match self {
            Self::Array => Some(bytes::ARRAY),
            Self::Bulk => Some(bytes::BULK),
            Self::Integer => Some(bytes::INTEGER),
            Self::Status => Some(bytes::STATUS),
            Self::EmptyLine => Some(bytes::LF),
            Self::Inline => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_type_markers() {
        assert_eq!(Marker::classify(b'*'), Marker::Array);
        assert_eq!(Marker::classify(b'$'), Marker::Bulk);
        assert_eq!(Marker::classify(b':'), Marker::Integer);
        assert_eq!(Marker::classify(b'+'), Marker::Status);
        assert_eq!(Marker::classify(b'\n'), Marker::EmptyLine);
    }

    #[test]
    fn everything_else_is_inline() {
        // '-' is an error reply elsewhere, but not part of this grammar
        for b in [b'P', b'-', b'\r', b' ', 0x00, 0xFF] {
            assert_eq!(Marker::classify(b), Marker::Inline, "byte {b:#04X}");
        }
        assert_eq!(Marker::Inline.byte(), None);
    }

    #[test]
    fn byte_roundtrips_through_classify() {
        for m in [
            Marker::Array,
            Marker::Bulk,
            Marker::Integer,
            Marker::Status,
            Marker::EmptyLine,
        ] {
            let b = m.byte().unwrap();
            assert_eq!(Marker::classify(b), m);
        }
    }
}
