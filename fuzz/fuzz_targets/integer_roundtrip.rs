#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: integer encode->decode roundtrip.
//
// Takes 8 bytes of fuzz input, interprets them as an i64, writes the
// decimal form, then decodes it and asserts the value matches.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let value = i64::from_le_bytes(data[..8].try_into().unwrap());

    let mut buf = Vec::new();
    resp_wire::number::encode_integer(value, &mut buf);

    let (decoded, consumed) = resp_wire::number::decode_integer(&buf).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, buf.len());
});
