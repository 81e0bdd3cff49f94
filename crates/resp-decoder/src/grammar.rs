//! Token decoders for the wire grammar.
//!
//! Each function starts at the parse cursor of a [`ReadBuffer`], pulls
//! more bytes from the source whenever the token is incomplete, and
//! leaves the cursor just past what it consumed. On error the cursor is
//! wherever decoding stopped; callers treat that as fatal for the stream.

use bytes::Bytes;
use resp_wire::marker::bytes::{ARRAY, BULK, CR, CRLF, INTEGER, LF, SPACE, STATUS};
use resp_wire::number::IntegerAccumulator;

use crate::buffer::ReadBuffer;
use crate::config::ParserConfig;
use crate::error::DecodeError;
use crate::source::ByteSource;

/// Outcome of a multi-bulk header: either the arguments, or the null
/// array, which carries nothing.
pub(crate) type MultiBulk = Option<Vec<Option<Bytes>>>;

/// `("+"|"-")? digit+`, continuing across refills until a non-digit.
pub(crate) fn read_number<S: ByteSource>(buf: &mut ReadBuffer<S>) -> Result<i64, DecodeError> {
    buf.require_available(1)?;

    let mut acc = IntegerAccumulator::new();
    if let Some(first) = buf.peek()
        && acc.push_sign(first)
    {
        buf.advance(1);
    }

    loop {
        while let Some(byte) = buf.peek() {
            if !acc.push_digit(byte)? {
                return Ok(acc.finish()?);
            }
            buf.advance(1);
        }
        // Digits ran up to the write boundary; the terminator decides.
        buf.fetch_at_least(1)?;
    }
}

/// Exactly CR LF. The cursor does not move on mismatch.
pub(crate) fn discard_newline<S: ByteSource>(buf: &mut ReadBuffer<S>) -> Result<(), DecodeError> {
    buf.require_available(2)?;
    if buf.unparsed()[..2] != *CRLF {
        return Err(DecodeError::ExpectNewLine);
    }
    buf.advance(2);
    Ok(())
}

/// Consume the marker byte `expected`, fetching it first if needed.
fn expect_marker<S: ByteSource>(buf: &mut ReadBuffer<S>, expected: u8) -> Result<(), DecodeError> {
    buf.require_available(1)?;
    match buf.peek() {
        Some(found) if found == expected => {
            buf.advance(1);
            Ok(())
        }
        found => Err(DecodeError::ExpectTypeChar {
            expected: char::from(expected),
            found: found.unwrap_or_default(),
        }),
    }
}

/// `$<length>\r\n<bytes>\r\n`, or `$-1\r\n` for the null bulk.
pub(crate) fn read_bulk<S: ByteSource>(
    buf: &mut ReadBuffer<S>,
    config: &ParserConfig,
) -> Result<Option<Bytes>, DecodeError> {
    expect_marker(buf, BULK)?;
    let size = read_number(buf)?;
    discard_newline(buf)?;

    let value = match size {
        -1 => return Ok(None),
        0 => Bytes::new(),
        _ => {
            let len = usize::try_from(size)
                .ok()
                .filter(|&len| len <= config.max_bulk_size)
                .ok_or(DecodeError::InvalidBulkSize {
                    size,
                    limit: config.max_bulk_size,
                })?;
            buf.require_available(len)?;
            buf.take(len)
        }
    };

    discard_newline(buf)?;
    Ok(Some(value))
}

/// `+<text>\n`, dropping any CR inside the line.
///
/// Every scanned byte counts against `max_status_line`, dropped CRs
/// included; only a CR directly before the LF is free.
pub(crate) fn read_status<S: ByteSource>(
    buf: &mut ReadBuffer<S>,
    config: &ParserConfig,
) -> Result<Bytes, DecodeError> {
    expect_marker(buf, STATUS)?;
    let limit = config.max_status_line;
    let mut text = Vec::new();
    let mut seen = 0usize;
    let mut ends_with_cr = false;

    loop {
        buf.require_available(1)?;
        let unparsed = buf.unparsed();
        let (scan, terminated) = match unparsed.iter().position(|&b| b == LF) {
            Some(pos) => (&unparsed[..pos], true),
            None => (unparsed, false),
        };
        seen += scan.len();
        if let Some(&last) = scan.last() {
            ends_with_cr = last == CR;
        }
        if seen - usize::from(ends_with_cr) > limit {
            return Err(DecodeError::LineTooLong { limit });
        }
        text.extend(scan.iter().copied().filter(|&b| b != CR));

        let scanned = scan.len();
        if terminated {
            buf.advance(scanned + 1);
            return Ok(Bytes::from(text));
        }
        buf.advance(scanned);
    }
}

/// `:<integer>\r\n`.
pub(crate) fn read_integer<S: ByteSource>(buf: &mut ReadBuffer<S>) -> Result<i64, DecodeError> {
    expect_marker(buf, INTEGER)?;
    let value = read_number(buf)?;
    discard_newline(buf)?;
    Ok(value)
}

/// `*<argc>\r\n` followed by `argc` bulk strings.
///
/// `*-1\r\n` is the null array: one further CR LF is discarded and
/// `Ok(None)` returned.
pub(crate) fn read_multi<S: ByteSource>(
    buf: &mut ReadBuffer<S>,
    config: &ParserConfig,
) -> Result<MultiBulk, DecodeError> {
    expect_marker(buf, ARRAY)?;
    let count = read_number(buf)?;
    discard_newline(buf)?;

    if count == -1 {
        discard_newline(buf)?;
        return Ok(None);
    }

    let argc = usize::try_from(count)
        .ok()
        .filter(|&argc| argc <= config.max_num_args)
        .ok_or(DecodeError::InvalidNumArg {
            count,
            limit: config.max_num_args,
        })?;

    let mut values = Vec::with_capacity(argc);
    for _ in 0..argc {
        values.push(read_bulk(buf, config)?);
    }
    Ok(Some(values))
}

/// A single space-separated line ending in LF (optionally CR LF).
///
/// The line is split on every space, so a run of spaces yields empty
/// arguments between them.
///
/// Inline mode has no pipelining: once the line is found, everything
/// buffered is consumed, including bytes after the LF.
pub(crate) fn read_inline<S: ByteSource>(
    buf: &mut ReadBuffer<S>,
    config: &ParserConfig,
) -> Result<Vec<Option<Bytes>>, DecodeError> {
    let limit = config.max_inline_line;

    loop {
        let unparsed = buf.unparsed();
        if let Some(pos) = unparsed.iter().position(|&b| b == LF) {
            let line = &unparsed[..pos];
            let line = line.strip_suffix(&[CR]).unwrap_or(line);
            if line.len() > limit {
                return Err(DecodeError::LineTooLong { limit });
            }
            let tokens = line
                .split(|&b| b == SPACE)
                .map(|token| Some(Bytes::copy_from_slice(token)))
                .collect();
            buf.consume_all();
            return Ok(tokens);
        }

        // a trailing CR may still be the start of the terminator
        let pending = unparsed.strip_suffix(&[CR]).unwrap_or(unparsed);
        if pending.len() > limit {
            return Err(DecodeError::LineTooLong { limit });
        }
        buf.fetch_at_least(1)?;
    }
}
