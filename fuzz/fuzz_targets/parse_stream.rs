#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode an arbitrary byte stream to the end.
//
// Catches bugs in:
// - Marker dispatch and inline fallback
// - Length and argument-count checks
// - Number overflow handling
// - Cursor bookkeeping (advance past the write boundary panics)
fuzz_target!(|data: &[u8]| {
    let mut parser = resp_decoder::Parser::new(data);
    for item in parser.commands() {
        if item.is_err() {
            break;
        }
    }
});
