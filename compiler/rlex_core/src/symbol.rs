//! Symbol classification: which bytes may form an R symbol, and which
//! symbols are reserved words.
//!
//! Any byte `>= 0x80` is accepted in symbols so that multi-byte UTF-8
//! identifiers (`café`, `変数`) stay in one token. Tokens therefore always
//! end on character boundaries when the source is valid UTF-8.

use crate::TokenKind;

/// Bytes that may start a symbol: ASCII letters, `.`, and non-ASCII bytes.
///
/// A leading `.` followed by a digit is a number; the tokenizer checks for
/// numbers before symbols.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_SYMBOL_START_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(i as u8, b'a'..=b'z' | b'A'..=b'Z' | b'.' | 0x80..=0xFF);
        i += 1;
    }
    table
};

/// Bytes that may continue a symbol: start bytes plus digits and `_`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_SYMBOL_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | 0x80..=0xFF
        );
        i += 1;
    }
    table
};

#[inline]
pub fn is_valid_symbol_start(b: u8) -> bool {
    IS_SYMBOL_START_TABLE[b as usize]
}

#[inline]
pub fn is_valid_symbol_continuation(b: u8) -> bool {
    IS_SYMBOL_CONTINUE_TABLE[b as usize]
}

/// Classify symbol text: the keyword kind for an exact reserved-word match,
/// [`TokenKind::Symbol`] otherwise.
///
/// Reserved words are 2-13 bytes long; the length selects a small bucket
/// before any text comparison.
pub fn classify_keyword(text: &[u8]) -> TokenKind {
    match text.len() {
        2 => match text {
            b"if" => TokenKind::KwIf,
            b"in" => TokenKind::KwIn,
            b"NA" => TokenKind::KwNa,
            _ => TokenKind::Symbol,
        },
        3 => match text {
            b"for" => TokenKind::KwFor,
            b"Inf" => TokenKind::KwInf,
            b"NaN" => TokenKind::KwNaN,
            _ => TokenKind::Symbol,
        },
        4 => match text {
            b"else" => TokenKind::KwElse,
            b"next" => TokenKind::KwNext,
            b"TRUE" => TokenKind::KwTrue,
            b"NULL" => TokenKind::KwNull,
            _ => TokenKind::Symbol,
        },
        5 => match text {
            b"while" => TokenKind::KwWhile,
            b"break" => TokenKind::KwBreak,
            b"FALSE" => TokenKind::KwFalse,
            _ => TokenKind::Symbol,
        },
        6 if text == b"repeat" => TokenKind::KwRepeat,
        8 => match text {
            b"function" => TokenKind::KwFunction,
            b"NA_real_" => TokenKind::KwNaReal,
            _ => TokenKind::Symbol,
        },
        11 => match text {
            b"NA_integer_" => TokenKind::KwNaInteger,
            b"NA_complex_" => TokenKind::KwNaComplex,
            _ => TokenKind::Symbol,
        },
        13 if text == b"NA_character_" => TokenKind::KwNaCharacter,
        _ => TokenKind::Symbol,
    }
}
