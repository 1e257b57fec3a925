//! The `lex` command: print the token stream of one file.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use rlex_core::{tokenize, Token};
use serde::Serialize;

use super::CommandError;
use crate::SourceFile;

/// Output format of [`lex_file`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LexFormat {
    /// One `[row:column]: text` line per token.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON shape of one token.
#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: String,
    category: &'static str,
    row: u32,
    column: u32,
    begin: u32,
    end: u32,
    text: Cow<'a, str>,
}

impl<'a> From<&Token<'a>> for TokenRecord<'a> {
    fn from(token: &Token<'a>) -> Self {
        TokenRecord {
            kind: format!("{:?}", token.kind()),
            category: token.kind().category(),
            row: token.row(),
            column: token.column(),
            begin: token.begin(),
            end: token.end(),
            text: token.contents(),
        }
    }
}

/// Tokenize `path` and write every token, whitespace and comments included.
pub fn lex_file(
    path: impl AsRef<Path>,
    format: LexFormat,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let file = SourceFile::open(path)?;
    let buffer = file.buffer();
    let tokens = tokenize(&buffer);

    match format {
        LexFormat::Text => {
            for token in &tokens {
                out.write_all(token.render().as_bytes())?;
            }
        }
        LexFormat::Json => {
            for token in &tokens {
                serde_json::to_writer(&mut *out, &TokenRecord::from(token))?;
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
