//! The `strings` command: print decoded string literals.

use std::io::Write;
use std::path::Path;

use rlex_core::{string_value_lossy, tokenize, Token};

use super::CommandError;
use crate::SourceFile;

/// Write `row:column: "value"` for every string literal and backtick-quoted
/// symbol in `path`, with escapes decoded. Values are printed with Rust
/// debug quoting so embedded newlines stay on one line.
pub fn strings_file(path: impl AsRef<Path>, out: &mut impl Write) -> Result<(), CommandError> {
    let file = SourceFile::open(path)?;
    let buffer = file.buffer();
    for token in tokenize(&buffer).iter().filter(|t| is_quoted(t)) {
        writeln!(out, "{}: {:?}", token.position(), string_value_lossy(token))?;
    }
    out.flush()?;
    Ok(())
}

fn is_quoted(token: &Token<'_>) -> bool {
    token.is_string() || (token.is_symbol() && token.bytes().first() == Some(&b'`'))
}
