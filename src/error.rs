use crate::token::TokenKind;

pub(crate) type ParseResult<T> = std::result::Result<T, ParseError>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The lexer hit a character that cannot begin or continue any token.
    /// Fatal for the whole expression; there is nothing to backtrack to.
    InvalidCharacter { character: char },
    /// A grammar rule needed a token of `expected` kind and found something
    /// else (or ran out of input).
    UnexpectedToken { expected: TokenKind },
    /// A complete expression was parsed but tokens remained.
    TrailingTokens { remaining: usize },
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character } => {
                write!(f, "Invalid character '{}'", character)
            }
            Self::UnexpectedToken { expected } => {
                write!(f, "Expected {}", expected)
            }
            Self::TrailingTokens { remaining } => {
                write!(
                    f,
                    "Expression continues for {} more token(s) after a complete condition",
                    remaining
                )
            }
        }
    }
}

impl std::error::Error for ParseErrorKind {}

/// A failure to compile a condition expression, positioned in the source.
///
/// `position` is the byte offset of the offending character or token; for
/// failures at end of input it is the length of the lexed input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at position {}: {}", self.position, self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
