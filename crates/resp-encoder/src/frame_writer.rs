use resp_wire::marker::bytes::{ARRAY, BULK, CRLF, INTEGER, LF, SPACE, STATUS};
use resp_wire::number::encode_integer;

/// Append `$<len>\r\n<bytes>\r\n`, or `$-1\r\n` for `None`.
pub fn write_bulk(out: &mut Vec<u8>, value: Option<&[u8]>) {
    out.push(BULK);
    match value {
        Some(bytes) => {
            encode_integer(len_i64(bytes.len()), out);
            out.extend_from_slice(CRLF);
            out.extend_from_slice(bytes);
            out.extend_from_slice(CRLF);
        }
        None => {
            encode_integer(-1, out);
            out.extend_from_slice(CRLF);
        }
    }
}

/// Append a complete multi-bulk command.
///
/// ```text
///   *<argc>\r\n
///   $<len>\r\n<arg>\r\n   × argc
/// ```
///
/// # Example
///
/// ```rust
/// let mut out = Vec::new();
/// resp_encoder::write_multi_bulk(&mut out, &["GET", "key"]);
/// assert_eq!(out, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
/// ```
pub fn write_multi_bulk<A: AsRef<[u8]>>(out: &mut Vec<u8>, args: &[A]) {
    write_array_header(out, len_i64(args.len()));
    for arg in args {
        write_bulk(out, Some(arg.as_ref()));
    }
}

/// Append `*<count>\r\n`.
pub fn write_array_header(out: &mut Vec<u8>, count: i64) {
    out.push(ARRAY);
    encode_integer(count, out);
    out.extend_from_slice(CRLF);
}

/// Append `:<value>\r\n`.
pub fn write_integer(out: &mut Vec<u8>, value: i64) {
    out.push(INTEGER);
    encode_integer(value, out);
    out.extend_from_slice(CRLF);
}

/// Append `+<text>\r\n`. The caller guarantees `text` has no CR or LF.
pub fn write_status(out: &mut Vec<u8>, text: &[u8]) {
    out.push(STATUS);
    out.extend_from_slice(text);
    out.extend_from_slice(CRLF);
}

/// Append space-joined tokens and a CR LF terminator.
pub fn write_inline<A: AsRef<[u8]>>(out: &mut Vec<u8>, tokens: &[A]) {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(SPACE);
        }
        out.extend_from_slice(token.as_ref());
    }
    out.extend_from_slice(CRLF);
}

/// Append a bare LF.
pub fn write_empty_line(out: &mut Vec<u8>) {
    out.push(LF);
}

fn len_i64(len: usize) -> i64 {
    // Vec lengths never exceed isize::MAX
    i64::try_from(len).unwrap_or(i64::MAX)
}
