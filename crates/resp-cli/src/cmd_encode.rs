/// Implementation of `resp encode`.
///
/// Serialises the positional arguments as one multi-bulk command and
/// writes it to the output file, replacing it unless `--append` is set.
/// Appending lets a shell loop build a pipelined stream:
///
/// ```text
/// resp encode -o session.resp SET greeting hello
/// resp encode -o session.resp --append GET greeting
/// resp inspect session.resp
/// ```
use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use resp_encoder::write_multi_bulk;

use crate::EncodeArgs;

/// Run the `resp encode` command.
///
/// Prints `Wrote N bytes to <path>` on success.
///
/// # Errors
///
/// Returns an error if the output file cannot be opened or written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let mut bytes = Vec::new();
    write_multi_bulk(&mut bytes, &args.args);

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(args.append)
        .truncate(!args.append)
        .open(&args.output)
        .with_context(|| format!("cannot open {}", args.output.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!("Wrote {} bytes to {}", bytes.len(), args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resp_decoder::Parser;

    fn encode_args(output: &std::path::Path, append: bool, args: &[&str]) -> EncodeArgs {
        EncodeArgs {
            output: output.to_path_buf(),
            append,
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn append_builds_a_pipeline() {
        let path = std::env::temp_dir().join(format!("resp-encode-{}.resp", std::process::id()));

        run(&encode_args(&path, false, &["SET", "k", "v"])).unwrap();
        run(&encode_args(&path, true, &["GET", "k"])).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let cmds: Vec<_> = Parser::new(bytes.as_slice())
            .commands()
            .map(Result::unwrap)
            .collect();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].get(0), Some(&b"SET"[..]));
        assert_eq!(cmds[1].get(1), Some(&b"k"[..]));
    }
}
