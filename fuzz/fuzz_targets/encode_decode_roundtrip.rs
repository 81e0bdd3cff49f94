#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use resp_decoder::{Parser, ParserConfig};
use resp_encoder::CommandEncoder;
use resp_types::CommandKind;

#[derive(Debug, Arbitrary)]
enum FuzzFrame {
    Multi(Vec<Option<Vec<u8>>>),
    Bulk(Option<Vec<u8>>),
    Integer(i64),
    Status(Vec<u8>),
    EmptyLine,
    NullArray,
}

// Fuzz target: encoder output decodes back to the same frames.
//
// Frames the decoder would reject under default limits are clipped
// rather than skipped, so every input exercises the decoder.
fuzz_target!(|frames: Vec<FuzzFrame>| {
    let config = ParserConfig::default();
    let mut enc = CommandEncoder::new();
    let mut expected = Vec::new();

    for frame in frames {
        match frame {
            FuzzFrame::Multi(mut args) => {
                args.truncate(config.max_num_args);
                for arg in args.iter_mut().flatten() {
                    arg.truncate(config.max_bulk_size);
                }
                enc.add_multi_nullable(&args);
                expected.push((CommandKind::Multi, args));
            }
            FuzzFrame::Bulk(Some(mut body)) => {
                body.truncate(config.max_bulk_size);
                enc.add_bulk(&body);
                expected.push((CommandKind::BulkString, vec![Some(body)]));
            }
            FuzzFrame::Bulk(None) => {
                enc.add_null_bulk();
                expected.push((CommandKind::BulkString, vec![None]));
            }
            FuzzFrame::Integer(n) => {
                enc.add_integer(n);
                expected.push((CommandKind::Integer, vec![Some(n.to_string().into_bytes())]));
            }
            FuzzFrame::Status(mut text) => {
                text.retain(|&b| b != b'\r' && b != b'\n');
                text.truncate(config.max_status_line);
                enc.add_status(&text);
                expected.push((CommandKind::SimpleStatus, vec![Some(text)]));
            }
            FuzzFrame::EmptyLine => {
                enc.add_empty_line();
            }
            FuzzFrame::NullArray => {
                enc.add_null_array();
            }
        }
    }

    let payload = enc.encode().unwrap();
    let decoded: Vec<_> = Parser::with_config(payload.as_slice(), config)
        .unwrap()
        .commands()
        .map(|r| {
            let cmd = r.unwrap();
            let values = cmd
                .values()
                .iter()
                .map(|v| v.as_ref().map(|b| b.to_vec()))
                .collect::<Vec<_>>();
            (cmd.kind(), values)
        })
        .collect();

    assert_eq!(decoded, expected);
});
