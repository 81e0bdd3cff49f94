/// Implementation of `resp validate`.
///
/// Decodes the whole stream file and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). The main
/// dispatcher turns the returned `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Commands: 12 decoded (3 no-ops skipped)
/// ✓ Limits: args ≤ 20, bulk ≤ 65536 bytes, inline ≤ 1024 bytes, status ≤ 65536 bytes
/// ✓ Framing: stream ends on a command boundary (418 bytes)
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error at offset 27: protocol error: expected '$', found 0x3A
/// ```
use std::fs;

use anyhow::{Context, Result, anyhow};
use resp_decoder::{DecodeError, Parser};

use crate::{LimitArgs, ValidateArgs};

/// Run the `resp validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if any byte of the
/// stream fails to decode under the configured limits.
pub fn run(args: &ValidateArgs, limits: &LimitArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let config = limits.parser_config();
    let mut parser = Parser::with_config(bytes.as_slice(), config.clone())
        .context("invalid decoder limits")?;

    let mut commands = 0usize;
    let mut no_ops = 0usize;
    loop {
        let offset = parser.position();
        match parser.read_command() {
            Ok(Some(_)) => commands += 1,
            Ok(None) => no_ops += 1,
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => {
                println!("✗ Error at offset {offset}: {}", diagnostic(&e));
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!(
        "✓ Commands: {commands} decoded ({no_ops} no-op{} skipped)",
        if no_ops == 1 { "" } else { "s" }
    );
    println!(
        "✓ Limits: args ≤ {}, bulk ≤ {} bytes, inline ≤ {} bytes, status ≤ {} bytes",
        config.max_num_args, config.max_bulk_size, config.max_inline_line, config.max_status_line
    );
    println!(
        "✓ Framing: stream ends on a command boundary ({} bytes)",
        bytes.len()
    );
    Ok(())
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Adds a hint about which limit flag to raise for policy violations.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────┐
/// │ DecodeError     │ Hint                                         │
/// ├─────────────────┼──────────────────────────────────────────────┤
/// │ InvalidNumArg   │ "(raise with --max-args)"                    │
/// │ InvalidBulkSize │ "(raise with --max-bulk)"                    │
/// │ LineTooLong     │ "(raise with --max-inline or --max-status)"  │
/// │ UnexpectedEof   │ "(file truncated?)"                          │
/// │ other           │ error Display only                           │
/// └─────────────────┴──────────────────────────────────────────────┘
/// ```
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::InvalidNumArg { .. } => format!("{e} (raise with --max-args)"),
        DecodeError::InvalidBulkSize { .. } => format!("{e} (raise with --max-bulk)"),
        DecodeError::LineTooLong { .. } => {
            format!("{e} (raise with --max-inline or --max-status)")
        }
        DecodeError::UnexpectedEof { .. } => format!("{e} (file truncated?)"),
        other => other.to_string(),
    }
}
