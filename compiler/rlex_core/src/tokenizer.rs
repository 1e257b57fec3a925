//! The tokenizer engine and the tokenize-all driver.
//!
//! [`Tokenizer`] walks a [`Cursor`] and produces one [`Token`] per call,
//! including whitespace and comments, so that the concatenated lexemes of a
//! full scan reproduce the source exactly. Malformed input never stops the
//! scan: it becomes an [`Err`](TokenKind::Err) token with a non-empty span.
//!
//! # Dispatch
//!
//! The byte at the cursor selects a focused method. Where one byte can start
//! several token shapes, the longest match wins (`<<-` over `<-` over `<`).
//! `.` starts a number only when a digit follows; otherwise it starts a
//! symbol.
//!
//! # Brackets
//!
//! `[` and `[[` push onto a small stack so that `]` can tell whether it
//! closes a single or a double bracket: `x[[i]]` closes with `]]`, while
//! `x[y[1]]` closes with two `]`.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::symbol::{classify_keyword, is_valid_symbol_continuation, is_valid_symbol_start};
use crate::{Cursor, SourceBuffer, Token, TokenKind};

/// Stateful scanner over one source buffer.
///
/// Cloning copies the cursor and the open-bracket stack, so a clone scans
/// independently of the original. [`peek`](Self::peek) is built on this.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    /// Open `[` and `[[` groups, innermost last.
    brackets: SmallVec<[TokenKind; 8]>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Tokenizer {
            cursor,
            brackets: SmallVec::new(),
        }
    }

    /// Produce the next token.
    ///
    /// Returns the [`End`](TokenKind::End) token once the source is
    /// exhausted, and keeps returning it on every later call.
    pub fn next_token(&mut self) -> Token<'a> {
        if self.cursor.is_eof() {
            return Token::eof(self.cursor.offset(), self.cursor.position());
        }

        let token = match self.cursor.current() {
            b'(' => self.emit(TokenKind::LParen, 1),
            b')' => self.emit(TokenKind::RParen, 1),
            b'{' => self.emit(TokenKind::LBrace, 1),
            b'}' => self.emit(TokenKind::RBrace, 1),
            b'[' => self.left_bracket(),
            b']' => self.right_bracket(),
            b'<' => self.less(),
            b'>' => self.one_or_two(b'=', TokenKind::GreaterOrEqual, TokenKind::Greater),
            b'=' => self.one_or_two(b'=', TokenKind::Equal, TokenKind::AssignLeftEquals),
            b'|' => self.one_or_two(b'|', TokenKind::OrScalar, TokenKind::OrVector),
            b'&' => self.one_or_two(b'&', TokenKind::AndScalar, TokenKind::AndVector),
            b'*' => self.one_or_two(b'*', TokenKind::ExponentiationStars, TokenKind::Multiply),
            b'!' => self.one_or_two(b'=', TokenKind::NotEqual, TokenKind::Negation),
            b':' => self.colon(),
            b'-' => self.minus(),
            b'+' => self.emit(TokenKind::Plus, 1),
            b'~' => self.emit(TokenKind::Formula, 1),
            b'?' => self.emit(TokenKind::Help, 1),
            b'/' => self.emit(TokenKind::Divide, 1),
            b'@' => self.emit(TokenKind::At, 1),
            b'$' => self.emit(TokenKind::Dollar, 1),
            b'^' => self.emit(TokenKind::Hat, 1),
            b'%' => self.delimited(b'%', false, TokenKind::OperatorUser),
            b',' => self.emit(TokenKind::Comma, 1),
            b';' => self.emit(TokenKind::Semi, 1),
            b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r' => self.whitespace(),
            b'\'' => self.delimited(b'\'', true, TokenKind::String),
            b'"' => self.delimited(b'"', true, TokenKind::String),
            b'`' => self.delimited(b'`', true, TokenKind::Symbol),
            b'#' => self.comment(),
            b'0'..=b'9' => self.number(),
            b'.' if self.cursor.peek(1).is_ascii_digit() => self.number(),
            b if is_valid_symbol_start(b) => self.symbol(),
            _ => self.emit(TokenKind::Err, 1),
        };

        trace!(
            kind = ?token.kind(),
            begin = token.begin(),
            end = token.end(),
            row = token.row(),
            column = token.column(),
            "token"
        );
        token
    }

    /// The token `n` positions ahead, without consuming anything.
    ///
    /// `peek(1)` is the token the next [`next_token`](Self::next_token) call
    /// will return. `peek(0)` returns the [`End`](TokenKind::End) token at
    /// the current position. Cost is linear in `n`.
    pub fn peek(&self, n: usize) -> Token<'a> {
        let mut lookahead = self.clone();
        let mut token = Token::eof(self.cursor.offset(), self.cursor.position());
        for _ in 0..n {
            token = lookahead.next_token();
            if token.is_end() {
                break;
            }
        }
        token
    }

    /// Number of `[` and `[[` groups currently open.
    #[inline]
    pub fn bracket_depth(&self) -> usize {
        self.brackets.len()
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.cursor.offset()
    }

    /// Consume `len` bytes as one token of `kind`.
    fn emit(&mut self, kind: TokenKind, len: u32) -> Token<'a> {
        let begin = self.cursor.offset();
        let position = self.cursor.position();
        let text = self.cursor.slice(begin, begin.saturating_add(len));
        self.cursor.advance_n(len);
        Token::new(kind, begin, text, position)
    }

    /// Two-byte operator when `second` follows, one-byte operator otherwise.
    fn one_or_two(&mut self, second: u8, long: TokenKind, short: TokenKind) -> Token<'a> {
        if self.cursor.peek(1) == second {
            self.emit(long, 2)
        } else {
            self.emit(short, 1)
        }
    }

    // === Brackets ===

    fn left_bracket(&mut self) -> Token<'a> {
        if self.cursor.peek(1) == b'[' {
            self.brackets.push(TokenKind::LDBracket);
            self.emit(TokenKind::LDBracket, 2)
        } else {
            self.brackets.push(TokenKind::LBracket);
            self.emit(TokenKind::LBracket, 1)
        }
    }

    fn right_bracket(&mut self) -> Token<'a> {
        match self.brackets.pop() {
            None => self.emit(TokenKind::Err, 1),
            Some(TokenKind::LDBracket) if self.cursor.peek(1) == b']' => {
                self.emit(TokenKind::RDBracket, 2)
            }
            // `[[` closed by a lone `]`.
            Some(TokenKind::LDBracket) => self.emit(TokenKind::Err, 1),
            Some(_) => self.emit(TokenKind::RBracket, 1),
        }
    }

    // === Operators ===

    fn less(&mut self) -> Token<'a> {
        match (self.cursor.peek(1), self.cursor.peek(2)) {
            (b'<', b'-') => self.emit(TokenKind::AssignLeftParent, 3),
            (b'-', _) => self.emit(TokenKind::AssignLeft, 2),
            (b'=', _) => self.emit(TokenKind::LessOrEqual, 2),
            _ => self.emit(TokenKind::Less, 1),
        }
    }

    fn minus(&mut self) -> Token<'a> {
        match (self.cursor.peek(1), self.cursor.peek(2)) {
            (b'>', b'>') => self.emit(TokenKind::AssignRightParent, 3),
            (b'>', _) => self.emit(TokenKind::AssignRight, 2),
            _ => self.emit(TokenKind::Minus, 1),
        }
    }

    fn colon(&mut self) -> Token<'a> {
        match (self.cursor.peek(1), self.cursor.peek(2)) {
            (b':', b':') => self.emit(TokenKind::NamespaceAll, 3),
            (b':', _) => self.emit(TokenKind::NamespaceExports, 2),
            (b'=', _) => self.emit(TokenKind::AssignLeftColon, 2),
            _ => self.emit(TokenKind::Sequence, 1),
        }
    }

    // === Trivia ===

    fn whitespace(&mut self) -> Token<'a> {
        let len = self.cursor.count_while(0, is_space);
        self.emit(TokenKind::Whitespace, len)
    }

    /// `#` up to and including the next `\n`, or to the end of input.
    fn comment(&mut self) -> Token<'a> {
        let len = match self.cursor.find(1, b'\n') {
            Some(newline) => newline + 1,
            None => self.remaining(),
        };
        self.emit(TokenKind::Comment, len)
    }

    // === Delimited runs ===

    /// Scan from the opening byte to the matching `close`, inclusive.
    ///
    /// With `escapes`, a backslash and the byte after it are skipped as a
    /// unit, so `"a\"b"` is one string. Reaching the end of input first
    /// yields an `Err` token covering the rest of the source.
    fn delimited(&mut self, close: u8, escapes: bool, kind: TokenKind) -> Token<'a> {
        let mut from = 1;
        loop {
            let hit = if escapes {
                self.cursor.find_either(from, close, b'\\')
            } else {
                self.cursor.find(from, close)
            };
            match hit {
                Some(at) if escapes && self.cursor.peek(at) == b'\\' => from = at + 2,
                Some(at) => return self.emit(kind, at + 1),
                None => {
                    let rest = self.remaining();
                    return self.emit(TokenKind::Err, rest);
                }
            }
        }
    }

    // === Numbers ===

    fn number(&mut self) -> Token<'a> {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(1), b'x' | b'X') {
            self.hex_number()
        } else {
            self.decimal_number()
        }
    }

    /// `0x` followed by an alphanumeric run that ends early after `i` or `L`.
    ///
    /// The run is consumed in full either way; it is a `Number` only if it
    /// starts with a hex digit and every byte before the suffix is one.
    fn hex_number(&mut self) -> Token<'a> {
        let mut valid = self.cursor.peek(2).is_ascii_hexdigit();
        let mut len = 2;
        loop {
            let b = self.cursor.peek(len);
            if !b.is_ascii_alphanumeric() {
                break;
            }
            len += 1;
            if b == b'i' || b == b'L' {
                break;
            }
            if !b.is_ascii_hexdigit() {
                valid = false;
            }
        }
        self.emit(if valid { TokenKind::Number } else { TokenKind::Err }, len)
    }

    /// `digits ('.' digits)? ([eE] [+-]? digits ('.' digits)?)? 'L'?`
    ///
    /// An exponent without digits, or a `.` after the exponent digits,
    /// turns the whole run into an `Err`.
    fn decimal_number(&mut self) -> Token<'a> {
        let cursor = &self.cursor;
        let digits = |from: u32| cursor.count_while(from, |b| b.is_ascii_digit());

        let mut valid = true;
        let mut len = digits(0);
        if cursor.peek(len) == b'.' {
            len += 1;
            len += digits(len);
        }

        if matches!(cursor.peek(len), b'e' | b'E') {
            len += 1;
            if matches!(cursor.peek(len), b'+' | b'-') {
                len += 1;
            }
            let exponent = digits(len);
            valid = exponent > 0;
            len += exponent;

            if cursor.peek(len) == b'.' {
                valid = false;
                len += 1;
                len += digits(len);
            }
        }

        if cursor.peek(len) == b'L' {
            len += 1;
        }

        self.emit(if valid { TokenKind::Number } else { TokenKind::Err }, len)
    }

    // === Symbols ===

    fn symbol(&mut self) -> Token<'a> {
        let len = 1 + self.cursor.count_while(1, is_valid_symbol_continuation);
        let begin = self.cursor.offset();
        let kind = classify_keyword(self.cursor.slice(begin, begin + len));
        self.emit(kind, len)
    }

    /// Bytes left between the cursor and the end of the source.
    fn remaining(&self) -> u32 {
        self.cursor.source_len() - self.cursor.offset()
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.next_token();
        if token.is_end() {
            None
        } else {
            Some(token)
        }
    }
}

/// `isspace` in the C locale.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Tokenize a whole buffer, whitespace and comments included.
///
/// The [`End`](TokenKind::End) token is not part of the result. An empty
/// buffer yields an empty vector.
pub fn tokenize(source: &SourceBuffer) -> Vec<Token<'_>> {
    if source.is_empty() {
        return Vec::new();
    }
    let tokens: Vec<Token<'_>> = Tokenizer::new(source.cursor()).collect();
    debug!(
        bytes = source.len(),
        tokens = tokens.len(),
        "tokenized source"
    );
    tokens
}
