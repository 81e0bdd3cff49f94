/// Implementation of `resp inspect`.
///
/// Decodes a stream file command by command and prints one line per
/// command, prefixed with its index and stream offset. No-ops (bare
/// `\n`, null arrays) are listed too so offsets stay contiguous.
///
/// # Output format
///
/// ```text
/// #0 @0      MULTI ["SET", "greeting", "hello"] bytes=38 final=false
/// #1 @38     MULTI ["GET", "greeting"] bytes=27 final=false
/// -- @65     no-op (1 byte)
/// #2 @66     STATUS ["OK"] bytes=5 final=true
/// ---
/// 3 commands, 71 bytes
/// ```
///
/// With `--json`, each command becomes one JSON object per line:
///
/// ```text
/// {"index":0,"offset":0,"kind":"MULTI","values":["SET","greeting","hello"],"byte_length":38,"final":false}
/// ```
use std::fs;

use anyhow::{Context, Result};
use resp_decoder::Parser;
use resp_types::{Command, CommandKind};
use serde_json::{Value, json};

use crate::{InspectArgs, LimitArgs};

/// Run the `resp inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the limits are invalid,
/// or the stream fails to decode. Commands decoded before the failure
/// are printed first.
pub fn run(args: &InspectArgs, limits: &LimitArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut parser = Parser::with_config(bytes.as_slice(), limits.parser_config())
        .context("invalid decoder limits")?;

    let mut index = 0usize;
    loop {
        let start = usize::try_from(parser.position()).unwrap_or(usize::MAX);
        let step = match parser.read_command() {
            Ok(step) => step,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to decode {} at offset {start}", args.file.display())
                });
            }
        };
        let end = usize::try_from(parser.position()).unwrap_or(usize::MAX);

        match step {
            Some(command) => {
                if args.json {
                    println!("{}", command_json(index, start, &command));
                } else {
                    println!("#{index} @{start:<6} {command}");
                }
                index += 1;
            }
            None if !args.json => {
                let n = end - start;
                println!("-- @{start:<6} no-op ({n} byte{})", if n == 1 { "" } else { "s" });
            }
            None => {}
        }

        if args.show_hex {
            print_hex(&bytes[start..end]);
        }
    }

    if !args.json {
        println!("---");
        println!(
            "{index} command{}, {} bytes",
            if index == 1 { "" } else { "s" },
            bytes.len()
        );
    }

    Ok(())
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// One JSON object for `--json`. Values are rendered UTF-8 lossy, null
/// bulk strings as `null`.
fn command_json(index: usize, offset: usize, command: &Command) -> Value {
    let values: Vec<Value> = command
        .values()
        .iter()
        .map(|v| match v {
            Some(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
            None => Value::Null,
        })
        .collect();

    let mut obj = json!({
        "index": index,
        "offset": offset,
        "kind": command.kind().label(),
        "values": values,
        "byte_length": command.byte_length(),
        "final": command.is_final_in_batch(),
    });
    if command.kind() == CommandKind::Integer {
        obj["integer"] = json!(command.integer_value());
    }
    obj
}

/// 16 bytes per line: offset, hex, printable ASCII.
fn print_hex(raw: &[u8]) {
    for (i, chunk) in raw.chunks(16).enumerate() {
        let offset = i * 16;
        let hex: String = chunk
            .iter()
            .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                use std::fmt::Write as _;
                if !s.is_empty() {
                    s.push(' ');
                }
                let _ = write!(s, "{b:02x}");
                s
            });
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        println!("           {offset:04x}  {hex:<48}  {ascii}");
    }
}
