//! Lossless tokenizer for R source text.
//!
//! Every byte of the input lands in exactly one token: whitespace and
//! comments are tokens too, so concatenating the lexemes of a full scan
//! reproduces the source. Malformed input becomes [`TokenKind::Err`] tokens
//! and never stops the scan.
//!
//! # Usage
//!
//! ```
//! use rlex_core::{tokenize, SourceBuffer, TokenKind};
//!
//! let source = SourceBuffer::new("x[[1]] <- 'a'");
//! let kinds: Vec<_> = tokenize(&source).iter().map(|t| t.kind()).collect();
//! assert_eq!(kinds[1], TokenKind::LDBracket);
//! assert_eq!(kinds[3], TokenKind::RDBracket);
//! ```
//!
//! For lookahead or incremental scanning, drive a [`Tokenizer`] directly
//! from [`SourceBuffer::cursor`].
//!
//! # Layers
//!
//! - [`SourceBuffer`] owns a sentinel-terminated copy of the source.
//! - [`Cursor`] walks it and tracks row and column.
//! - [`Tokenizer`] turns the cursor into [`Token`]s.
//! - [`string_value`] decodes the escapes in string and quoted-symbol tokens.

mod cursor;
mod escape;
mod kind;
mod source_buffer;
mod symbol;
mod token;
mod tokenizer;

pub use cursor::{Cursor, Position};
pub use escape::{string_value, string_value_lossy, unescape};
pub use kind::{KindFlags, TokenKind};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use symbol::{classify_keyword, is_valid_symbol_continuation, is_valid_symbol_start};
pub use token::{render_tokens, Token};
pub use tokenizer::{tokenize, Tokenizer};
