use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::token::Token;

/// Splits a condition expression into tokens with a single left-to-right
/// scan. Whitespace separates tokens but is otherwise insignificant;
/// identifiers are accumulated greedily and closed by the first non-word
/// character (or end of input); parentheses are one-character tokens.
///
/// Any character outside ASCII whitespace, `[A-Za-z0-9_]`, `(` and `)`
/// aborts the scan with [`ParseErrorKind::InvalidCharacter`].
pub(crate) fn tokenize(text: &str) -> ParseResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        if c.is_ascii_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = pos;
            while let Some(w) = text[pos..].chars().next() {
                if w.is_ascii_alphanumeric() || w == '_' {
                    pos += w.len_utf8();
                } else {
                    break;
                }
            }
            tokens.push(Token::word(&text[start..pos], start));
            continue;
        }

        let kind = match c {
            '(' => crate::token::TokenKind::LeftParen,
            ')' => crate::token::TokenKind::RightParen,
            _ => {
                return Err(ParseError {
                    position: pos,
                    kind: ParseErrorKind::InvalidCharacter { character: c },
                });
            }
        };

        tokens.push(Token {
            raw: &text[pos..pos + 1],
            kind,
            offset: pos,
        });
        pos += 1;
    }

    Ok(tokens)
}
