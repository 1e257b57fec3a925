//! `rlex` CLI
//!
//! Tokenizes R source files.

use std::process::ExitCode;

fn main() -> ExitCode {
    rlex::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let status = rlex::commands::run(&args, &mut std::io::stdout().lock(), &mut std::io::stderr());
    ExitCode::from(status)
}
