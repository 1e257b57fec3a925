//! Command handlers for the `rlex` CLI.
//!
//! Each submodule implements one subcommand and writes its report to a
//! caller-supplied writer, so the binary and the tests drive the same code.
//! [`run`] parses the argument list and maps outcomes to exit statuses.

use std::io::Write;
use std::path::PathBuf;

use crate::SourceError;

mod check;
mod lex;
mod strings;

pub use check::{check_files, Problem};
pub use lex::{lex_file, LexFormat};
pub use strings::strings_file;

/// Exit status: success.
pub const EXIT_OK: u8 = 0;
/// Exit status: `check` found lexical problems.
pub const EXIT_PROBLEMS: u8 = 1;
/// Exit status: bad arguments or unreadable input.
pub const EXIT_USAGE: u8 = 2;

/// Failure of a command as a whole (as opposed to problems found in the
/// input, which are reported and reflected in the exit status).
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot encode token: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the CLI with `args` (program name excluded).
///
/// Returns the process exit status.
pub fn run(args: &[String], out: &mut impl Write, err: &mut impl Write) -> u8 {
    let Some(command) = args.first() else {
        print_usage(err);
        return EXIT_USAGE;
    };

    let result = match command.as_str() {
        "lex" => {
            let mut format = LexFormat::Text;
            let mut path = None;
            for arg in &args[1..] {
                if arg == "--json" {
                    format = LexFormat::Json;
                } else if !arg.starts_with('-') && path.is_none() {
                    path = Some(arg.as_str());
                } else {
                    return usage_error(err, &format!("unexpected argument '{arg}'"));
                }
            }
            let Some(path) = path else {
                return usage_error(err, "missing file path\nUsage: rlex lex [--json] <file>");
            };
            lex_file(path, format, out).map(|()| EXIT_OK)
        }
        "check" => {
            if args.len() < 2 {
                return usage_error(err, "missing file path\nUsage: rlex check <file>...");
            }
            let paths: Vec<PathBuf> = args[1..].iter().map(PathBuf::from).collect();
            check_files(&paths, out).map(|clean| if clean { EXIT_OK } else { EXIT_PROBLEMS })
        }
        "strings" => {
            let [_, path] = args else {
                return usage_error(err, "expected one file path\nUsage: rlex strings <file>");
            };
            strings_file(path, out).map(|()| EXIT_OK)
        }
        "help" | "--help" | "-h" => {
            print_usage(out);
            Ok(EXIT_OK)
        }
        "version" | "--version" | "-V" => {
            let _ = writeln!(out, "rlex {}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_OK)
        }
        other => {
            let _ = writeln!(err, "Unknown command: {other}");
            let _ = writeln!(err);
            print_usage(err);
            return EXIT_USAGE;
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            EXIT_USAGE
        }
    }
}

fn usage_error(err: &mut impl Write, message: &str) -> u8 {
    let _ = writeln!(err, "error: {message}");
    EXIT_USAGE
}

fn print_usage(w: &mut impl Write) {
    let _ = writeln!(
        w,
        "\
rlex: lossless tokenizer for R source

Usage: rlex <command> [options]

Commands:
  lex [--json] <file>   Print every token with its position
  check <file>...       Report lexical errors and encoding problems
  strings <file>        Print the decoded value of every string literal
  help                  Show this help message
  version               Show version information

Exit status: 0 on success, 1 if `check` found problems, 2 on usage or I/O errors.
Set RUST_LOG (for example RUST_LOG=rlex_core=trace) to enable logging."
    );
}
