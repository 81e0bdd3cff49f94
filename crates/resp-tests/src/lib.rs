//! Shared helpers for the integration tests and benches.
//!
//! - [`init_test_logging`]: route decoder `tracing` output to the test
//!   harness once per process.
//! - [`ChunkedReader`]: a byte source that hands out data a few bytes at
//!   a time, to force partial reads and buffer growth.
//! - [`golden`] and [`decode_all`]: fixture loading and whole-stream
//!   decoding.

use std::io::{self, Read};
use std::path::Path;
use std::sync::Once;

use resp_decoder::{ByteSource, DecodeError, Parser, ParserConfig};
use resp_types::Command;

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging at trace level. The first call wins.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level. The first call wins.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

/// Delivers `data` at most `chunk` bytes per `read` call.
///
/// With `chunk == 1` every token of the grammar is split across reads.
#[derive(Debug, Clone)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    reads: usize,
}

impl ChunkedReader {
    /// # Panics
    ///
    /// Panics if `chunk` is zero.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>, chunk: usize) -> Self {
        assert!(chunk > 0, "chunk size must be positive");
        Self {
            data: data.into(),
            pos: 0,
            chunk,
            reads: 0,
        }
    }

    /// Number of `read` calls served so far, including the final `Ok(0)`.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let remaining = self.data.len() - self.pos;
        let n = remaining.min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Read a fixture from `tests/golden/<name>`.
///
/// # Panics
///
/// Panics if the fixture is missing.
#[must_use]
pub fn golden(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Decode every command in `source`, skipping no-ops.
///
/// # Errors
///
/// The first error other than end-of-stream.
///
/// # Panics
///
/// Panics if `config` is rejected.
pub fn decode_all<S: ByteSource>(
    source: S,
    config: ParserConfig,
) -> Result<Vec<Command>, DecodeError> {
    let mut parser = match Parser::with_config(source, config) {
        Ok(parser) => parser,
        Err(e) => panic!("invalid test config: {e}"),
    };
    parser.commands().collect()
}

/// Render commands one per line with their `Display` form, for snapshots.
#[must_use]
pub fn render(commands: &[Command]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
