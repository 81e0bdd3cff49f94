#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode_integer on arbitrary bytes.
//
// Catches bugs in:
// - Sign handling
// - Overflow at and beyond 19 digits
// - Consumed-length bookkeeping
fuzz_target!(|data: &[u8]| {
    if let Ok((_, consumed)) = resp_wire::number::decode_integer(data) {
        assert!(consumed <= data.len());
    }
});
