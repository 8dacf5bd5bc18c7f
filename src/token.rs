use std::fmt;

/// The kind of a lexed token.
///
/// Discriminants are single bits so a [`TokenKindSet`] can answer "is this
/// one of these kinds" with one mask test.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// A flag name, e.g. `_ALPHATEST_ON`.
    Keyword = 1 << 0,
    /// The reserved word `not`.
    Not = 1 << 1,
    /// The reserved word `and`.
    And = 1 << 2,
    /// The reserved word `or`.
    Or = 1 << 3,
    LeftParen = 1 << 4,
    RightParen = 1 << 5,
}

impl TokenKind {
    pub(crate) const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword => f.write_str("keyword"),
            Self::Not => f.write_str("'not'"),
            Self::And => f.write_str("'and'"),
            Self::Or => f.write_str("'or'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
        }
    }
}

/// A set of [`TokenKind`]s backed by the kinds' bit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenKindSet(u8);

impl TokenKindSet {
    pub(crate) const fn of(kind: TokenKind) -> Self {
        Self(kind.bits())
    }

    pub(crate) const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | kind.bits())
    }

    pub(crate) const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bits() != 0
    }
}

/// A single token: the raw text span it was lexed from, its kind, and the
/// byte offset of the span in the source expression.
///
/// Tokens borrow from the expression text; they only live for the duration
/// of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) raw: &'a str,
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

impl<'a> Token<'a> {
    /// Classifies a completed word: the reserved words `not`, `and` and
    /// `or` (exact, case-sensitive match) become operator tokens, anything
    /// else is a keyword. A flag named `android` is a keyword.
    pub(crate) fn word(raw: &'a str, offset: usize) -> Self {
        let kind = match raw {
            "not" => TokenKind::Not,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            _ => TokenKind::Keyword,
        };
        Self { raw, kind, offset }
    }

    /// End of the token's span in the source, in bytes.
    pub(crate) const fn end(&self) -> usize {
        self.offset + self.raw.len()
    }
}
