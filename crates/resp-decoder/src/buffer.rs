use std::io::ErrorKind;

use bytes::Bytes;
use tracing::debug;

use crate::error::DecodeError;
use crate::source::ByteSource;

/// Growable read buffer with a parse cursor, fed by a [`ByteSource`].
///
/// ```text
///   0            parse_index        write_index          capacity
///   ├──────────────┼──────────────────┼────────────────────┤
///   │   consumed   │     unparsed     │  free (may hold    │
///   │              │                  │  stale bytes)      │
///   └──────────────┴──────────────────┴────────────────────┘
/// ```
///
/// Invariant: `parse_index <= write_index <= capacity`. Growth keeps the
/// whole `[0, write_index)` prefix in place, so indices recorded earlier
/// in a decode step stay valid across refills. When the cursor catches
/// up with the write boundary the buffer is drained and [`reset`] moves
/// both indices back to 0, reusing the allocation for the next command.
///
/// Values handed out by [`take`] are copies; nothing outside this type
/// ever holds a reference into the backing store.
///
/// [`reset`]: ReadBuffer::reset
/// [`take`]: ReadBuffer::take
pub struct ReadBuffer<S> {
    source: S,
    buf: Vec<u8>,
    initial_size: usize,
    parse_index: usize,
    write_index: usize,
}

impl<S: ByteSource> ReadBuffer<S> {
    /// Allocate `initial_size` bytes in front of `source`.
    #[must_use]
    pub fn new(source: S, initial_size: usize) -> Self {
        Self {
            source,
            buf: vec![0; initial_size],
            initial_size,
            parse_index: 0,
            write_index: 0,
        }
    }

    /// Make room for `additional` bytes past the write boundary.
    ///
    /// Grows to `max(capacity * 2, capacity + additional + initial_size)`
    /// so repeated growth stays amortised O(1) per byte.
    pub fn ensure_capacity(&mut self, additional: usize) {
        let capacity = self.buf.len();
        let needed = self.write_index + additional;
        if needed <= capacity {
            return;
        }

        let new_capacity = (capacity * 2).max(capacity + additional + self.initial_size);
        debug!(
            from = capacity,
            to = new_capacity,
            unparsed = self.available(),
            "growing read buffer"
        );
        self.buf.resize(new_capacity, 0);
    }

    /// Block until at least `min` new bytes have been appended.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EndOfStream`] when the source is exhausted first.
    /// - [`DecodeError::Io`] for any other read failure.
    pub fn fetch_at_least(&mut self, min: usize) -> Result<(), DecodeError> {
        self.ensure_capacity(min);
        let tail = &mut self.buf[self.write_index..];
        match self.source.fill_at_least(tail, min) {
            Ok(n) => {
                self.write_index += n;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DecodeError::EndOfStream),
            Err(e) => Err(DecodeError::Io(e)),
        }
    }

    /// Ensure `n` unparsed bytes are buffered, fetching the shortfall.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_at_least`](Self::fetch_at_least).
    pub fn require_available(&mut self, n: usize) -> Result<(), DecodeError> {
        let available = self.available();
        if available >= n {
            return Ok(());
        }
        self.fetch_at_least(n - available)
    }

    /// Move both indices back to 0. Only valid once drained.
    pub fn reset(&mut self) {
        debug_assert!(self.is_drained(), "reset with unparsed bytes pending");
        self.parse_index = 0;
        self.write_index = 0;
    }

    /// Number of unparsed bytes.
    #[must_use]
    pub fn available(&self) -> usize {
        self.write_index - self.parse_index
    }

    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.parse_index == self.write_index
    }

    /// The fetched but not yet consumed bytes.
    #[must_use]
    pub fn unparsed(&self) -> &[u8] {
        &self.buf[self.parse_index..self.write_index]
    }

    /// The byte at the cursor, if one is buffered.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.unparsed().first().copied()
    }

    /// Advance the cursor by `n` buffered bytes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes are buffered.
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.available(), "advance past write boundary");
        self.parse_index += n;
    }

    /// Consume everything currently buffered.
    pub fn consume_all(&mut self) {
        self.parse_index = self.write_index;
    }

    /// Copy `n` buffered bytes out and advance past them.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes are buffered; call
    /// [`require_available`](Self::require_available) first.
    pub fn take(&mut self, n: usize) -> Bytes {
        let value = Bytes::copy_from_slice(&self.unparsed()[..n]);
        self.parse_index += n;
        value
    }

    #[must_use]
    pub fn parse_index(&self) -> usize {
        self.parse_index
    }

    #[must_use]
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Drop the buffer and return the source. Unparsed bytes are lost.
    pub fn into_source(self) -> S {
        self.source
    }
}
