//! Token kinds and their capability flags.
//!
//! `TokenKind` is a closed, one-byte enum. Category questions (is this a
//! bracket, an operator, a control-flow keyword, ...) are answered from a
//! per-kind [`KindFlags`] set, so every predicate is a single match plus a
//! bit test.
//!
//! | Range   | Category            |
//! |---------|---------------------|
//! | 0-11    | Leaf kinds          |
//! | 16-23   | Brackets            |
//! | 32-50   | Keywords            |
//! | 64-94   | Operators           |

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Capability tags attached to each [`TokenKind`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct KindFlags: u8 {
        /// One of `( ) { } [ ] [[ ]]`.
        const BRACKET = 1 << 0;
        /// Opening bracket.
        const LEFT = 1 << 1;
        /// Closing bracket.
        const RIGHT = 1 << 2;
        /// Reserved word.
        const KEYWORD = 1 << 3;
        /// Keyword that introduces a control-flow construct.
        const CONTROL_FLOW = 1 << 4;
        /// Infix or prefix operator.
        const OPERATOR = 1 << 5;
        /// Operator that may also appear in prefix position.
        const UNARY = 1 << 6;
    }
}

/// Classification of a lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Leaf kinds (0-11) ===
    Invalid = 0,
    End = 1,
    /// Placeholder for an empty argument, built by parsers.
    Empty = 2,
    /// Placeholder for a missing expression, built by parsers.
    Missing = 3,
    Semi = 4,
    Comma = 5,
    Symbol = 6,
    Comment = 7,
    Whitespace = 8,
    String = 9,
    Number = 10,
    Err = 11,

    // === Brackets (16-23) ===
    LParen = 16,    // (
    RParen = 17,    // )
    LBrace = 18,    // {
    RBrace = 19,    // }
    LBracket = 20,  // [
    RBracket = 21,  // ]
    LDBracket = 22, // [[
    RDBracket = 23, // ]]

    // === Keywords (32-50) ===
    KwIf = 32,
    KwFor = 33,
    KwWhile = 34,
    KwRepeat = 35,
    KwFunction = 36,
    KwElse = 37,
    KwIn = 38,
    KwNext = 39,
    KwBreak = 40,
    KwTrue = 41,
    KwFalse = 42,
    KwNull = 43,
    KwInf = 44,
    KwNaN = 45,
    KwNa = 46,
    KwNaInteger = 47,
    KwNaReal = 48,
    KwNaCharacter = 49,
    KwNaComplex = 50,

    // === Operators (64-94) ===
    AssignLeft = 64,          // <-
    AssignLeftParent = 65,    // <<-
    AssignRight = 66,         // ->
    AssignRightParent = 67,   // ->>
    AssignLeftEquals = 68,    // =
    AssignLeftColon = 69,     // :=
    Less = 70,                // <
    LessOrEqual = 71,         // <=
    Greater = 72,             // >
    GreaterOrEqual = 73,      // >=
    Equal = 74,               // ==
    NotEqual = 75,            // !=
    OrScalar = 76,            // ||
    OrVector = 77,            // |
    AndScalar = 78,           // &&
    AndVector = 79,           // &
    Multiply = 80,            // *
    ExponentiationStars = 81, // **
    Hat = 82,                 // ^
    Divide = 83,              // /
    NamespaceExports = 84,    // ::
    NamespaceAll = 85,        // :::
    Sequence = 86,            // :
    Negation = 87,            // !
    Minus = 88,               // -
    Plus = 89,                // +
    Formula = 90,             // ~
    Help = 91,                // ?
    At = 92,                  // @
    Dollar = 93,              // $
    OperatorUser = 94,        // %op%
}

const BRACKET_LEFT: KindFlags = KindFlags::BRACKET.union(KindFlags::LEFT);
const BRACKET_RIGHT: KindFlags = KindFlags::BRACKET.union(KindFlags::RIGHT);
const CONTROL_FLOW_KEYWORD: KindFlags = KindFlags::KEYWORD.union(KindFlags::CONTROL_FLOW);
const UNARY_OPERATOR: KindFlags = KindFlags::OPERATOR.union(KindFlags::UNARY);

impl TokenKind {
    /// Capability set of this kind.
    #[inline]
    pub const fn flags(self) -> KindFlags {
        use TokenKind as K;
        match self {
            K::LParen | K::LBrace | K::LBracket | K::LDBracket => BRACKET_LEFT,
            K::RParen | K::RBrace | K::RBracket | K::RDBracket => BRACKET_RIGHT,

            K::KwIf | K::KwFor | K::KwWhile | K::KwRepeat | K::KwFunction | K::KwElse => {
                CONTROL_FLOW_KEYWORD
            }
            K::KwIn
            | K::KwNext
            | K::KwBreak
            | K::KwTrue
            | K::KwFalse
            | K::KwNull
            | K::KwInf
            | K::KwNaN
            | K::KwNa
            | K::KwNaInteger
            | K::KwNaReal
            | K::KwNaCharacter
            | K::KwNaComplex => KindFlags::KEYWORD,

            K::Minus | K::Plus | K::Negation | K::Formula | K::Help => UNARY_OPERATOR,
            K::AssignLeft
            | K::AssignLeftParent
            | K::AssignRight
            | K::AssignRightParent
            | K::AssignLeftEquals
            | K::AssignLeftColon
            | K::Less
            | K::LessOrEqual
            | K::Greater
            | K::GreaterOrEqual
            | K::Equal
            | K::NotEqual
            | K::OrScalar
            | K::OrVector
            | K::AndScalar
            | K::AndVector
            | K::Multiply
            | K::ExponentiationStars
            | K::Hat
            | K::Divide
            | K::NamespaceExports
            | K::NamespaceAll
            | K::Sequence
            | K::At
            | K::Dollar
            | K::OperatorUser => KindFlags::OPERATOR,

            K::Invalid
            | K::End
            | K::Empty
            | K::Missing
            | K::Semi
            | K::Comma
            | K::Symbol
            | K::Comment
            | K::Whitespace
            | K::String
            | K::Number
            | K::Err => KindFlags::empty(),
        }
    }

    #[inline]
    pub const fn is_bracket(self) -> bool {
        self.flags().contains(KindFlags::BRACKET)
    }

    #[inline]
    pub const fn is_left_bracket(self) -> bool {
        self.flags().contains(BRACKET_LEFT)
    }

    #[inline]
    pub const fn is_right_bracket(self) -> bool {
        self.flags().contains(BRACKET_RIGHT)
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.flags().contains(KindFlags::KEYWORD)
    }

    #[inline]
    pub const fn is_control_flow_keyword(self) -> bool {
        self.flags().contains(CONTROL_FLOW_KEYWORD)
    }

    #[inline]
    pub const fn is_operator(self) -> bool {
        self.flags().contains(KindFlags::OPERATOR)
    }

    #[inline]
    pub const fn is_unary_operator(self) -> bool {
        self.flags().contains(UNARY_OPERATOR)
    }

    /// Operator that can only appear in infix position.
    #[inline]
    pub const fn is_non_unary_operator(self) -> bool {
        self.is_operator() && !self.is_unary_operator()
    }

    /// Symbol, number or string.
    #[inline]
    pub const fn is_symbolic(self) -> bool {
        matches!(self, TokenKind::Symbol | TokenKind::Number | TokenKind::String)
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, TokenKind::Number)
    }

    /// Brackets that open a call or an index: `(`, `[` and `[[`.
    #[inline]
    pub const fn is_call_operator(self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LDBracket
        )
    }

    /// The other half of a bracket pair. Non-bracket kinds are returned
    /// unchanged.
    pub const fn complement(self) -> TokenKind {
        use TokenKind as K;
        match self {
            K::LParen => K::RParen,
            K::RParen => K::LParen,
            K::LBrace => K::RBrace,
            K::RBrace => K::LBrace,
            K::LBracket => K::RBracket,
            K::RBracket => K::LBracket,
            K::LDBracket => K::RDBracket,
            K::RDBracket => K::LDBracket,
            other => other,
        }
    }

    /// `true` when `self` and `other` are the two halves of one bracket pair,
    /// in either order.
    pub fn is_complement(self, other: TokenKind) -> bool {
        self.is_bracket() && self.complement() == other
    }

    /// Category name used in diagnostics.
    pub const fn category(self) -> &'static str {
        use TokenKind as K;
        match self {
            K::Invalid => "invalid",
            K::End => "end",
            K::Empty => "empty",
            K::Missing => "missing",
            K::Semi => "semi",
            K::Comma => "comma",
            K::Symbol => "symbol",
            K::Comment => "comment",
            K::Whitespace => "whitespace",
            K::String => "string",
            K::Number => "number",
            K::Err => "error",
            _ if self.is_bracket() => "bracket",
            _ if self.is_keyword() => "keyword",
            _ => "operator",
        }
    }

    /// Fixed source text of this kind, or `None` when the text varies
    /// (symbols, literals, comments, user operators, ...).
    pub const fn lexeme(self) -> Option<&'static str> {
        use TokenKind as K;
        let text = match self {
            K::Semi => ";",
            K::Comma => ",",

            K::LParen => "(",
            K::RParen => ")",
            K::LBrace => "{",
            K::RBrace => "}",
            K::LBracket => "[",
            K::RBracket => "]",
            K::LDBracket => "[[",
            K::RDBracket => "]]",

            K::KwIf => "if",
            K::KwFor => "for",
            K::KwWhile => "while",
            K::KwRepeat => "repeat",
            K::KwFunction => "function",
            K::KwElse => "else",
            K::KwIn => "in",
            K::KwNext => "next",
            K::KwBreak => "break",
            K::KwTrue => "TRUE",
            K::KwFalse => "FALSE",
            K::KwNull => "NULL",
            K::KwInf => "Inf",
            K::KwNaN => "NaN",
            K::KwNa => "NA",
            K::KwNaInteger => "NA_integer_",
            K::KwNaReal => "NA_real_",
            K::KwNaCharacter => "NA_character_",
            K::KwNaComplex => "NA_complex_",

            K::AssignLeft => "<-",
            K::AssignLeftParent => "<<-",
            K::AssignRight => "->",
            K::AssignRightParent => "->>",
            K::AssignLeftEquals => "=",
            K::AssignLeftColon => ":=",
            K::Less => "<",
            K::LessOrEqual => "<=",
            K::Greater => ">",
            K::GreaterOrEqual => ">=",
            K::Equal => "==",
            K::NotEqual => "!=",
            K::OrScalar => "||",
            K::OrVector => "|",
            K::AndScalar => "&&",
            K::AndVector => "&",
            K::Multiply => "*",
            K::ExponentiationStars => "**",
            K::Hat => "^",
            K::Divide => "/",
            K::NamespaceExports => "::",
            K::NamespaceAll => ":::",
            K::Sequence => ":",
            K::Negation => "!",
            K::Minus => "-",
            K::Plus => "+",
            K::Formula => "~",
            K::Help => "?",
            K::At => "@",
            K::Dollar => "$",

            K::Invalid
            | K::End
            | K::Empty
            | K::Missing
            | K::Symbol
            | K::Comment
            | K::Whitespace
            | K::String
            | K::Number
            | K::Err
            | K::OperatorUser => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(text) => write!(f, "`{text}`"),
            None => f.write_str(self.category()),
        }
    }
}
