/// RESP command-line tool: inspect, validate, analyse and produce files
/// holding raw RESP request streams (for example a captured client
/// session or an AOF-style dump).
///
/// # Command overview
///
/// ```text
/// resp <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print every decoded command in a stream file
///   validate   Check that a stream file decodes cleanly to the end
///   stats      Print per-kind counts, batch and size statistics
///   encode     Write one multi-bulk command to a file
///   help       Print help information
///
/// Global options:
///   -v, --verbose        Log decoder activity at debug level
///   --max-args <N>       Argument limit for multi-bulk commands
///   --max-bulk <BYTES>   Bulk string size limit
///   --max-inline <BYTES> Inline line length limit
///   --max-status <BYTES> Status line length limit
///   -h, --help           Print help
///   -V, --version        Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, malformed stream, …)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use resp_decoder::ParserConfig;
use resp_decoder::config::{
    DEFAULT_MAX_BULK_SIZE, DEFAULT_MAX_INLINE_LINE, DEFAULT_MAX_NUM_ARGS, DEFAULT_MAX_STATUS_LINE,
};
use tracing_subscriber::EnvFilter;

mod cmd_encode;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The RESP stream command-line tool.
#[derive(Parser)]
#[command(name = "resp", version, about = "RESP request stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity (buffer growth, no-ops, failures) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    limits: LimitArgs,
}

/// Decoder limits shared by every reading sub-command.
#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum argument count of a multi-bulk command.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_NUM_ARGS)]
    pub max_args: usize,

    /// Maximum payload size of one bulk string, in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BULK_SIZE)]
    pub max_bulk: usize,

    /// Maximum length of an inline command line, in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_INLINE_LINE)]
    pub max_inline: usize,

    /// Maximum length of a status line, in bytes.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_STATUS_LINE)]
    pub max_status: usize,
}

impl LimitArgs {
    /// Map the flags onto a parser configuration.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_num_args: self.max_args,
            max_bulk_size: self.max_bulk,
            max_inline_line: self.max_inline,
            max_status_line: self.max_status,
            ..ParserConfig::default()
        }
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every decoded command in a stream file.
    Inspect(InspectArgs),
    /// Check that a stream file decodes cleanly to the end.
    Validate(ValidateArgs),
    /// Print per-kind counts, batch and size statistics.
    Stats(StatsArgs),
    /// Write one multi-bulk command to a file.
    Encode(EncodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `resp inspect`.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Flag       │ Effect                                               │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ --show-hex │ Include a 16-byte-per-line hex dump of each command  │
/// │ --json     │ One JSON object per command instead of text lines    │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the stream file to inspect.
    pub file: PathBuf,

    /// Show the raw bytes of each command as a hex dump.
    #[arg(long)]
    pub show_hex: bool,

    /// Emit JSON lines instead of text.
    #[arg(long, conflicts_with = "show_hex")]
    pub json: bool,
}

/// Arguments for `resp validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the stream file to validate.
    pub file: PathBuf,
}

/// Arguments for `resp stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the stream file to analyse.
    pub file: PathBuf,
}

/// Arguments for `resp encode`.
///
/// ```text
/// resp encode -o set.resp SET greeting hello
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    pub append: bool,

    /// Command name followed by its arguments.
    #[arg(required = true, num_args = 1..)]
    pub args: Vec<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &cli.limits),
        Commands::Validate(args) => cmd_validate::run(&args, &cli.limits),
        Commands::Stats(args) => cmd_stats::run(&args, &cli.limits),
        Commands::Encode(args) => cmd_encode::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output
/// and the default is warnings only.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_flags_reach_parser_config() {
        let cli = Cli::try_parse_from([
            "resp",
            "validate",
            "s.resp",
            "--max-args",
            "3",
            "--max-bulk",
            "10",
            "--max-inline",
            "12",
            "--max-status",
            "16",
        ])
        .unwrap();
        let config = cli.limits.parser_config();
        assert_eq!(config.max_num_args, 3);
        assert_eq!(config.max_bulk_size, 10);
        assert_eq!(config.max_inline_line, 12);
        assert_eq!(config.max_status_line, 16);
    }

    #[test]
    fn limit_defaults_match_decoder() {
        let cli = Cli::try_parse_from(["resp", "stats", "s.resp"]).unwrap();
        assert_eq!(cli.limits.parser_config(), ParserConfig::default());
    }
}
