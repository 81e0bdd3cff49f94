/// Implementation of `resp stats`.
///
/// Decodes a stream file and prints a summary of what it holds: command
/// kinds, how the commands group into batches, and size extremes.
///
/// # Example output
///
/// ```text
/// File:     /tmp/session.resp  (418 bytes)
/// Commands: 12 total, 2 no-ops
/// Batches:  1 (avg 12.0 commands per batch)
///
/// Kind        Count   Bytes
/// ─────────────────────────
/// MULTI          10     391
/// BULK            0       0
/// INTEGER         1       7
/// STATUS          1       5
/// ─────────────────────────
/// Total          12     403
///
/// Largest command: 64 bytes
/// Most arguments:  5
/// Commands (top 5 by count):
///   SET                 6
///   GET                 4
/// ```
///
/// A batch ends at every command flagged final-in-batch, i.e. whenever
/// the decoder drained its buffer. The file is read through the parser's
/// normal buffer, so batch boundaries reflect the configured buffer size.
use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use resp_decoder::Parser;
use resp_types::CommandKind;

use crate::{LimitArgs, StatsArgs};

const KINDS: [CommandKind; 4] = [
    CommandKind::Multi,
    CommandKind::BulkString,
    CommandKind::Integer,
    CommandKind::SimpleStatus,
];

/// Run the `resp stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &StatsArgs, limits: &LimitArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut parser = Parser::with_config(bytes.as_slice(), limits.parser_config())
        .context("invalid decoder limits")?;

    let mut per_kind: HashMap<CommandKind, (usize, usize)> = HashMap::new();
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    let mut no_ops = 0usize;
    let mut batches = 0usize;
    let mut largest = 0usize;
    let mut most_args = 0usize;

    loop {
        let command = match parser.read_command() {
            Ok(Some(command)) => command,
            Ok(None) => {
                no_ops += 1;
                continue;
            }
            Err(e) if e.is_end_of_stream() => break,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "failed to decode {} at offset {}",
                        args.file.display(),
                        parser.position()
                    )
                });
            }
        };

        total += 1;
        let entry = per_kind.entry(command.kind()).or_default();
        entry.0 += 1;
        entry.1 += command.byte_length();

        if command.is_final_in_batch() {
            batches += 1;
        }
        largest = largest.max(command.byte_length());

        if command.kind() == CommandKind::Multi {
            most_args = most_args.max(command.arg_count());
            if let Some(name) = command.name() {
                let name = String::from_utf8_lossy(name).to_ascii_uppercase();
                *names.entry(name).or_default() += 1;
            }
        }
    }

    println!("File:     {}  ({} bytes)", args.file.display(), bytes.len());
    println!("Commands: {total} total, {no_ops} no-op{}", plural(no_ops));
    if batches > 0 {
        #[allow(clippy::cast_precision_loss)]
        let avg = total as f64 / batches as f64;
        println!("Batches:  {batches} (avg {avg:.1} commands per batch)");
    } else {
        println!("Batches:  0");
    }

    // ── Kind distribution ─────────────────────────────────────────────────────

    println!();
    println!("{:<10} {:>6} {:>7}", "Kind", "Count", "Bytes");
    println!("{}", "─".repeat(25));
    let mut sum_bytes = 0usize;
    for kind in KINDS {
        let (count, kind_bytes) = per_kind.get(&kind).copied().unwrap_or_default();
        sum_bytes += kind_bytes;
        println!("{:<10} {count:>6} {kind_bytes:>7}", kind.label());
    }
    println!("{}", "─".repeat(25));
    println!("{:<10} {total:>6} {sum_bytes:>7}", "Total");

    // ── Extremes ──────────────────────────────────────────────────────────────

    println!();
    println!("Largest command: {largest} bytes");
    println!("Most arguments:  {most_args}");

    if !names.is_empty() {
        let mut ranked: Vec<(String, usize)> = names.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        println!("Commands (top 5 by count):");
        for (name, count) in ranked.iter().take(5) {
            println!("  {name:<16} {count:>4}");
        }
    }

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
