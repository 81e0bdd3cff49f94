#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use resp_decoder::{ByteSource, Parser, ParserConfig};
use resp_wire::Marker;

type Values = Vec<Option<Vec<u8>>>;

/// Hands out at most `chunk` bytes per read.
struct Chunked<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Decode until the first error. `None` when an inline line was hit,
/// since inline mode drops whatever else the same read delivered.
fn decode<S: ByteSource>(source: S, stream: &[u8], config: ParserConfig) -> Option<Vec<Values>> {
    let mut parser = Parser::with_config(source, config).unwrap();
    let mut out = Vec::new();
    loop {
        let at = usize::try_from(parser.position()).unwrap();
        if let Some(&first) = stream.get(at) {
            if Marker::classify(first) == Marker::Inline {
                return None;
            }
        }
        match parser.read_command() {
            Ok(Some(cmd)) => out.push(
                cmd.values()
                    .iter()
                    .map(|v| v.as_ref().map(|b| b.to_vec()))
                    .collect(),
            ),
            Ok(None) => {}
            Err(_) => return Some(out),
        }
    }
}

// Fuzz target: the same stream decoded in one read and in small reads
// must produce the same commands up to the first error.
//
// Input format:
//   byte 0: chunk size (1..=16)
//   bytes 1..: stream
//
// A tiny initial buffer forces growth on almost every command.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let chunk = usize::from(data[0] % 16) + 1;
    let stream = &data[1..];

    let config = ParserConfig {
        initial_buffer_size: 4,
        ..ParserConfig::default()
    };

    let whole = decode(stream, stream, config.clone());
    let pieces = decode(Chunked { data: stream, chunk }, stream, config);
    if let (Some(whole), Some(pieces)) = (whole, pieces) {
        assert_eq!(whole, pieces);
    }
});
