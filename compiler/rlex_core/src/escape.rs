//! Escape decoding for string literals and backtick-quoted symbols.
//!
//! Decoding works on bytes: octal and hex escapes produce a single byte each
//! (which need not be valid UTF-8), unicode escapes produce the UTF-8
//! encoding of their code point. Decoding never fails; unknown escapes
//! decode to the escaped byte itself.
//!
//! On a backslash the decoder tries, in order:
//!
//! | Form                       | Result                              |
//! |----------------------------|-------------------------------------|
//! | `\` + 1-3 octal digits     | one byte (value modulo 256)         |
//! | `\x` + 1-2 hex digits      | one byte                            |
//! | `\u` + 1-4 hex digits      | UTF-8 encoded code point            |
//! | `\U` + 1-8 hex digits      | UTF-8 encoded code point            |
//! | `\u{...}`, `\U{...}`       | same, closing brace required        |
//! | `\a \b \f \n \r \t \v \\`  | BEL BS FF LF CR TAB VT backslash    |
//! | `\` + any other byte       | that byte                           |
//!
//! The decoded value is never longer than the raw input.

use crate::{Token, TokenKind};

/// Decode every escape sequence in `raw`.
pub fn unescape(raw: &[u8]) -> Vec<u8> {
    if memchr::memchr(b'\\', raw).is_none() {
        return raw.to_vec();
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'\\' {
            out.push(raw[i]);
            i += 1;
            continue;
        }

        let rest = &raw[i..];
        if let Some(consumed) = octal_escape(rest, &mut out)
            .or_else(|| hex_escape(rest, &mut out))
            .or_else(|| unicode_escape(rest, &mut out))
        {
            i += consumed;
            continue;
        }

        match rest.get(1) {
            Some(&esc) => {
                out.push(simple_escape(esc));
                i += 2;
            }
            None => {
                // Trailing lone backslash.
                out.push(b'\\');
                i += 1;
            }
        }
    }
    out
}

/// Logical value of a token.
///
/// Strings and backtick-quoted symbols decode the bytes between their
/// delimiters. Every other token, plain symbols included, returns its raw
/// bytes unchanged.
pub fn string_value(token: &Token<'_>) -> Vec<u8> {
    let bytes = token.bytes();
    match token.kind() {
        TokenKind::String => unescape(interior(bytes)),
        TokenKind::Symbol if bytes.first() == Some(&b'`') => unescape(interior(bytes)),
        _ => bytes.to_vec(),
    }
}

/// [`string_value`] converted to text, replacing invalid UTF-8 with U+FFFD.
pub fn string_value_lossy(token: &Token<'_>) -> String {
    match String::from_utf8(string_value(token)) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Bytes between the opening and closing delimiter.
fn interior(bytes: &[u8]) -> &[u8] {
    if bytes.len() >= 2 {
        &bytes[1..bytes.len() - 1]
    } else {
        &[]
    }
}

fn simple_escape(esc: u8) -> u8 {
    match esc {
        b'a' => 0x07,
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'v' => 0x0B,
        other => other,
    }
}

fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Number of hex digits at the start of `bytes`, capped at `max`.
fn hex_run(bytes: &[u8], max: usize) -> usize {
    bytes
        .iter()
        .take(max)
        .take_while(|&&b| hex_value(b).is_some())
        .count()
}

/// `\NNN`: one to three octal digits. Returns the number of bytes consumed.
fn octal_escape(rest: &[u8], out: &mut Vec<u8>) -> Option<usize> {
    let digits = rest
        .get(1..)?
        .iter()
        .take(3)
        .take_while(|&&b| is_octal_digit(b))
        .count();
    if digits == 0 {
        return None;
    }
    let value = rest[1..=digits]
        .iter()
        .fold(0u8, |acc, &d| acc.wrapping_mul(8).wrapping_add(d - b'0'));
    out.push(value);
    Some(1 + digits)
}

/// `\xHH`: one or two hex digits.
fn hex_escape(rest: &[u8], out: &mut Vec<u8>) -> Option<usize> {
    if rest.get(1) != Some(&b'x') {
        return None;
    }
    let digits = hex_run(rest.get(2..)?, 2);
    if digits == 0 {
        return None;
    }
    let value = rest[2..2 + digits]
        .iter()
        .filter_map(|&b| hex_value(b))
        .fold(0u8, |acc, d| acc.wrapping_mul(16).wrapping_add(d));
    out.push(value);
    Some(2 + digits)
}

/// `\uXXXX`, `\UXXXXXXXX`, optionally braced. Fails on code points that are
/// not Unicode scalar values, leaving the escape to the simple table.
fn unicode_escape(rest: &[u8], out: &mut Vec<u8>) -> Option<usize> {
    let max = match rest.get(1)? {
        b'u' => 4,
        b'U' => 8,
        _ => return None,
    };

    let delimited = rest.get(2) == Some(&b'{');
    let start = if delimited { 3 } else { 2 };
    let digits = hex_run(rest.get(start..)?, max);
    if digits == 0 {
        return None;
    }

    let mut end = start + digits;
    if delimited {
        if rest.get(end) != Some(&b'}') {
            return None;
        }
        end += 1;
    }

    let value = rest[start..start + digits]
        .iter()
        .filter_map(|&b| hex_value(b))
        .fold(0u32, |acc, d| acc * 16 + u32::from(d));
    let ch = char::from_u32(value)?;

    let mut utf8 = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    Some(end)
}
