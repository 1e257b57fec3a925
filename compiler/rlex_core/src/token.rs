//! Tokens: a kind, a borrowed span of the source, and a position.
//!
//! # Lifetime
//!
//! A [`Token`] borrows its bytes from the [`SourceBuffer`](crate::SourceBuffer)
//! it was scanned from. The buffer cannot be dropped or mutated while any
//! token derived from it is alive; the borrow checker enforces this.

use std::borrow::Cow;
use std::fmt;

use crate::{Position, TokenKind};

/// One lexeme of R source.
///
/// Tokens are `Copy` and immutable. `size() == 0` only for the synthetic
/// [`End`](TokenKind::End) token and the parser placeholders
/// [`Empty`](TokenKind::Empty) and [`Missing`](TokenKind::Missing).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    kind: TokenKind,
    begin: u32,
    end: u32,
    position: Position,
    text: &'a [u8],
}

impl<'a> Token<'a> {
    /// Token spanning `text`, which starts at byte offset `begin`.
    #[inline]
    pub(crate) fn new(kind: TokenKind, begin: u32, text: &'a [u8], position: Position) -> Self {
        let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        Token {
            kind,
            begin,
            end: begin.saturating_add(len),
            position,
            text,
        }
    }

    /// The synthetic end-of-input token. It has no backing bytes.
    pub fn eof(offset: u32, position: Position) -> Self {
        Self::placeholder(TokenKind::End, offset, position)
    }

    /// Zero-width token of any kind, used by parsers for `Empty` and
    /// `Missing` nodes.
    pub fn placeholder(kind: TokenKind, offset: u32, position: Position) -> Self {
        Token {
            kind,
            begin: offset,
            end: offset,
            position,
            text: &[],
        }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Byte offset of the first byte.
    #[inline]
    pub fn begin(&self) -> u32 {
        self.begin
    }

    /// Byte offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.end - self.begin
    }

    /// Raw lexeme bytes.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.text
    }

    /// Lexeme text; invalid UTF-8 is replaced with U+FFFD.
    pub fn contents(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.text)
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.position.row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    // === Classification ===

    #[inline]
    pub fn is_bracket(&self) -> bool {
        self.kind.is_bracket()
    }

    #[inline]
    pub fn is_left_bracket(&self) -> bool {
        self.kind.is_left_bracket()
    }

    #[inline]
    pub fn is_right_bracket(&self) -> bool {
        self.kind.is_right_bracket()
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    #[inline]
    pub fn is_control_flow_keyword(&self) -> bool {
        self.kind.is_control_flow_keyword()
    }

    #[inline]
    pub fn is_operator(&self) -> bool {
        self.kind.is_operator()
    }

    #[inline]
    pub fn is_unary_operator(&self) -> bool {
        self.kind.is_unary_operator()
    }

    #[inline]
    pub fn is_non_unary_operator(&self) -> bool {
        self.kind.is_non_unary_operator()
    }

    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    #[inline]
    pub fn is_symbol(&self) -> bool {
        self.kind == TokenKind::Symbol
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::String
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Err
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        self.kind.is_symbolic()
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }

    #[inline]
    pub fn is_call_operator(&self) -> bool {
        self.kind.is_call_operator()
    }

    /// Whitespace or comment.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Diagnostic line for this token, including the trailing newline.
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

/// Writes `[ row:column]: text`, with both numbers right-aligned in four
/// columns. End and placeholder tokens print as `<END>`, `<empty>` and
/// `<missing>`.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}:{:>4}]: ", self.row(), self.column())?;
        match self.kind {
            TokenKind::End => f.write_str("<END>"),
            TokenKind::Empty => f.write_str("<empty>"),
            TokenKind::Missing => f.write_str("<missing>"),
            _ => f.write_str(&self.contents()),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} @ {}..{} ({})",
            self.kind,
            self.contents(),
            self.begin,
            self.end,
            self.position
        )
    }
}

/// Concatenated diagnostic lines for a token sequence.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::render).collect()
}
