//! End-to-end decoding scenarios and stream properties.
//!
//! Every test drives the public `Parser` API over a complete byte source:
//! a slice (one fetch delivers everything) or a [`ChunkedReader`] (many
//! small fetches). Commands are compared by kind, values, and the
//! `final_in_batch` flush signal.

use resp_decoder::{DecodeError, Parser, ParserConfig};
use resp_encoder::CommandEncoder;
use resp_tests::{ChunkedReader, decode_all, init_test_logging};
use resp_types::CommandKind;

fn values(cmd: &resp_types::Command) -> Vec<Vec<u8>> {
    cmd.values()
        .iter()
        .map(|v| v.as_deref().expect("non-null value").to_vec())
        .collect()
}

fn one_fetch(input: &[u8]) -> Result<Vec<resp_types::Command>, DecodeError> {
    decode_all(input, ParserConfig::default())
}

// ── Concrete scenarios ────────────────────────────────────────────────────────

#[test]
fn multi_bulk_command() {
    let cmds = one_fetch(b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n").unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].kind(), CommandKind::Multi);
    assert_eq!(values(&cmds[0]), vec![b"foo".to_vec(), b"bar".to_vec()]);
    assert!(cmds[0].is_final_in_batch());
}

#[test]
fn two_pipelined_pings_in_one_fetch() {
    let cmds = one_fetch(b"*1\r\n$4\r\nPING\r\n*1\r\n$4\r\nPING\r\n").unwrap();
    assert_eq!(cmds.len(), 2);
    for cmd in &cmds {
        assert_eq!(cmd.kind(), CommandKind::Multi);
        assert_eq!(values(cmd), vec![b"PING".to_vec()]);
    }
    assert!(!cmds[0].is_final_in_batch());
    assert!(cmds[1].is_final_in_batch());
}

#[test]
fn simple_status() {
    let cmds = one_fetch(b"+OK\r\n").unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].kind(), CommandKind::SimpleStatus);
    assert_eq!(cmds[0].get(0), Some(&b"OK"[..]));
}

#[test]
fn integer_reply() {
    let cmds = one_fetch(b":1000\r\n").unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].kind(), CommandKind::Integer);
    assert_eq!(cmds[0].integer_value(), 1000);
}

#[test]
fn inline_ping() {
    let cmds = one_fetch(b"PING\n").unwrap();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].kind(), CommandKind::Multi);
    assert_eq!(values(&cmds[0]), vec![b"PING".to_vec()]);
}

#[test]
fn too_many_arguments() {
    let mut parser = Parser::new(&b"*21\r\n$1\r\na\r\n"[..]);
    assert!(matches!(
        parser.read_command(),
        Err(DecodeError::InvalidNumArg { count: 21, limit: 20 })
    ));
}

#[test]
fn oversized_bulk() {
    let mut parser = Parser::new(&b"$65537\r\nxxxx"[..]);
    assert!(matches!(
        parser.read_command(),
        Err(DecodeError::InvalidBulkSize { size: 65537, limit: 65536 })
    ));
}

// ── Properties ────────────────────────────────────────────────────────────────

/// Arguments of every shape the bulk grammar must carry untouched.
fn awkward_args(argc: usize) -> Vec<Vec<u8>> {
    (0..argc)
        .map(|i| match i % 4 {
            0 => format!("arg{i}").into_bytes(),
            1 => Vec::new(),
            2 => b"line\r\nbreak $3\r\n*1".to_vec(),
            _ => (0..=255u8).cycle().skip(i).take(40 + i).collect(),
        })
        .collect()
}

#[test]
fn multi_bulk_round_trip_up_to_limit() {
    init_test_logging();
    let config = ParserConfig::default();

    for argc in 0..=config.max_num_args {
        let args = awkward_args(argc);
        let payload = CommandEncoder::new().add_multi(&args).encode().unwrap();

        let cmds = decode_all(payload.as_slice(), config.clone()).unwrap();
        assert_eq!(cmds.len(), 1, "argc={argc}");
        assert_eq!(values(&cmds[0]), args, "argc={argc}");
        assert_eq!(cmds[0].byte_length(), payload.len(), "argc={argc}");
    }
}

#[test]
fn many_small_fetches_match_one_fetch() {
    init_test_logging();
    let config = ParserConfig {
        initial_buffer_size: 16,
        max_bulk_size: 1 << 20,
        ..ParserConfig::default()
    };
    let big = vec![b'z'; 5000];
    let payload = CommandEncoder::new()
        .add_multi(&[b"SET".to_vec(), b"key".to_vec(), big])
        .add_multi(&["GET", "key"])
        .encode()
        .unwrap();
    assert!(payload.len() > config.initial_buffer_size);

    let whole = decode_all(payload.as_slice(), config.clone()).unwrap();
    for chunk in [1, 3, 7, 64] {
        let pieces = decode_all(ChunkedReader::new(payload.clone(), chunk), config.clone()).unwrap();
        assert_eq!(pieces.len(), whole.len(), "chunk={chunk}");
        for (a, b) in pieces.iter().zip(&whole) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.values(), b.values(), "chunk={chunk}");
            assert_eq!(a.byte_length(), b.byte_length(), "chunk={chunk}");
        }
    }
}

#[test]
fn byte_at_a_time_marks_every_command_final() {
    let payload = CommandEncoder::new()
        .add_multi(&["PING"])
        .add_status("OK")
        .add_integer(7)
        .encode()
        .unwrap();
    let cmds = decode_all(ChunkedReader::new(payload, 1), ParserConfig::default()).unwrap();
    assert_eq!(cmds.len(), 3);
    // each fetch delivers exactly what the current token needs, so the
    // buffer drains at every command boundary
    assert!(cmds.iter().all(resp_types::Command::is_final_in_batch));
}

#[test]
fn bare_newlines_are_skipped() {
    let mut parser = Parser::new(&b"\n\n*1\r\n$4\r\nPING\r\n\n"[..]);
    assert!(parser.read_command().unwrap().is_none());
    assert!(parser.read_command().unwrap().is_none());

    let cmd = parser.read_command().unwrap().unwrap();
    assert_eq!(values(&cmd), vec![b"PING".to_vec()]);
    assert!(!cmd.is_final_in_batch());

    assert!(parser.read_command().unwrap().is_none());
    assert!(matches!(parser.read_command(), Err(DecodeError::EndOfStream)));
}

#[test]
fn limits_are_inclusive() {
    let config = ParserConfig::default();

    let args: Vec<String> = (0..config.max_num_args).map(|i| i.to_string()).collect();
    let at_limit = CommandEncoder::new().add_multi(&args).encode().unwrap();
    assert!(one_fetch(&at_limit).is_ok());

    let body = vec![b'b'; config.max_bulk_size];
    let at_limit = CommandEncoder::new().add_bulk(&body).encode().unwrap();
    let cmds = one_fetch(&at_limit).unwrap();
    assert_eq!(cmds[0].get(0).map(<[u8]>::len), Some(config.max_bulk_size));

    let mut line = vec![b'a'; config.max_inline_line];
    line.push(b'\n');
    assert!(one_fetch(&line).is_ok());
}

#[test]
fn limits_plus_one_fail() {
    let config = ParserConfig::default();

    let args: Vec<String> = (0..=config.max_num_args).map(|i| i.to_string()).collect();
    let over = CommandEncoder::new().add_multi(&args).encode().unwrap();
    assert!(matches!(one_fetch(&over), Err(DecodeError::InvalidNumArg { .. })));

    let body = vec![b'b'; config.max_bulk_size + 1];
    let over = CommandEncoder::new().add_bulk(&body).encode().unwrap();
    assert!(matches!(one_fetch(&over), Err(DecodeError::InvalidBulkSize { .. })));

    // no LF anywhere in the buffered region
    let line = vec![b'a'; config.max_inline_line + 1];
    assert!(matches!(
        one_fetch(&line),
        Err(DecodeError::LineTooLong { limit: 1024 })
    ));
}

#[test]
fn long_inline_line_fails_across_fetches() {
    let line = vec![b'a'; 4096];
    let result = decode_all(ChunkedReader::new(line, 100), ParserConfig::default());
    assert!(matches!(result, Err(DecodeError::LineTooLong { .. })));
}

#[test]
fn mixed_pipeline_keeps_order() {
    let payload = CommandEncoder::new()
        .add_multi(&["MULTI"])
        .add_multi(&["INCR", "counter"])
        .add_empty_line()
        .add_bulk("raw")
        .add_null_bulk()
        .add_null_array()
        .add_multi(&["EXEC"])
        .add_inline(&["QUIT"])
        .encode()
        .unwrap();

    let kinds: Vec<CommandKind> = one_fetch(&payload)
        .unwrap()
        .iter()
        .map(resp_types::Command::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            CommandKind::Multi,
            CommandKind::Multi,
            CommandKind::BulkString,
            CommandKind::BulkString,
            CommandKind::Multi,
            CommandKind::Multi,
        ]
    );
}
