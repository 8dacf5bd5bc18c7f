use crate::ast::ConditionNode;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::token::{Token, TokenKind, TokenKindSet};

// keyword      := /[A-Za-z_][A-Za-z0-9_]*/
// paren_expr   := '(' expr ')'
// not_expr     := 'not' keyword | 'not' paren_expr
// primary      := keyword | paren_expr | not_expr
// expr         := primary ( ('and' | 'or') expr )*

const BINARY_OPERATORS: TokenKindSet = TokenKindSet::of(TokenKind::And).with(TokenKind::Or);

/// A binary operator with its numeric precedence. `and` binds tighter
/// than `or`; the values are compared at runtime while reducing the
/// operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOperator {
    And,
    Or,
}

impl BinaryOperator {
    const fn precedence(self) -> u8 {
        match self {
            Self::And => 2,
            Self::Or => 1,
        }
    }

    fn combine(self, left: ConditionNode, right: ConditionNode) -> ConditionNode {
        match self {
            Self::And => ConditionNode::And {
                left: Box::new(left),
                right: Box::new(right),
            },
            Self::Or => ConditionNode::Or {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }
}

/// Builds the condition tree for a whole token sequence.
///
/// An empty sequence compiles to [`ConditionNode::False`]: a blank
/// condition resolves to "hidden" rather than being an error. Leftover
/// tokens after a complete expression are a
/// [`ParseErrorKind::TrailingTokens`] failure.
pub(crate) fn parse(tokens: &[Token<'_>]) -> ParseResult<ConditionNode> {
    if tokens.is_empty() {
        return Ok(ConditionNode::False);
    }

    let mut parser = Parser::new(tokens);
    let node = parser.parse_expr()?;

    if parser.pos < tokens.len() {
        return Err(ParseError {
            position: tokens[parser.pos].offset,
            kind: ParseErrorKind::TrailingTokens {
                remaining: tokens.len() - parser.pos,
            },
        });
    }

    Ok(node)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    /// Byte position reported for failures at end of input.
    end: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            end: tokens.last().map(Token::end).unwrap_or_default(),
        }
    }

    /// Consumes the next token if it has the expected kind.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token<'a>> {
        match self.tokens.get(self.pos) {
            Some(token) if TokenKindSet::of(expected).contains(token.kind) => {
                self.pos += 1;
                Ok(*token)
            }
            Some(token) => Err(ParseError {
                position: token.offset,
                kind: ParseErrorKind::UnexpectedToken { expected },
            }),
            None => Err(ParseError {
                position: self.end,
                kind: ParseErrorKind::UnexpectedToken { expected },
            }),
        }
    }

    /// Consumes the next token if it is a binary operator.
    fn consume_binary_operator(&mut self) -> Option<BinaryOperator> {
        let token = self.tokens.get(self.pos)?;
        if !BINARY_OPERATORS.contains(token.kind) {
            return None;
        }
        self.pos += 1;
        Some(if token.kind == TokenKind::And {
            BinaryOperator::And
        } else {
            BinaryOperator::Or
        })
    }

    /// Parses one expression: a leading primary followed by any number of
    /// `('and' | 'or') primary` tails, combined through an operator stack.
    ///
    /// Before an incoming operator is pushed, every pending operator with
    /// strictly greater precedence is popped and its two most recent
    /// operands reduced into a node; at the end of the expression the
    /// whole stack is drained the same way. This is what makes `and` bind
    /// tighter than `or` regardless of textual order.
    fn parse_expr(&mut self) -> ParseResult<ConditionNode> {
        let mut nodes = Vec::new();
        let mut operators = Vec::new();

        nodes.push(self.parse_primary()?);

        while let Some(operator) = self.consume_binary_operator() {
            reduce_operators(&mut nodes, &mut operators, operator.precedence());
            operators.push(operator);
            nodes.push(self.parse_primary()?);
        }

        reduce_operators(&mut nodes, &mut operators, 0);

        debug_assert!(operators.is_empty());
        debug_assert_eq!(nodes.len(), 1);
        Ok(nodes.pop().unwrap_or(ConditionNode::False))
    }

    /// Tries the three primary alternatives in order, rolling the token
    /// position back after each failed attempt. When every alternative
    /// fails, the failure that progressed furthest into the input is
    /// reported; on equal progress the later alternative wins.
    fn parse_primary(&mut self) -> ParseResult<ConditionNode> {
        let alternatives: [fn(&mut Self) -> ParseResult<ConditionNode>; 3] = [
            Self::parse_keyword,
            Self::parse_paren_expr,
            Self::parse_not_expr,
        ];

        let checkpoint = self.pos;
        let mut failure: Option<ParseError> = None;

        for parse_alternative in alternatives {
            match parse_alternative(self) {
                Ok(node) => return Ok(node),
                Err(error) => {
                    self.pos = checkpoint;
                    match &failure {
                        Some(best) if best.position > error.position => {}
                        _ => failure = Some(error),
                    }
                }
            }
        }

        Err(failure.unwrap_or_else(|| ParseError {
            position: self.end,
            kind: ParseErrorKind::UnexpectedToken {
                expected: TokenKind::Keyword,
            },
        }))
    }

    fn parse_keyword(&mut self) -> ParseResult<ConditionNode> {
        let token = self.expect(TokenKind::Keyword)?;
        Ok(ConditionNode::Keyword {
            name: token.raw.to_string(),
        })
    }

    fn parse_paren_expr(&mut self) -> ParseResult<ConditionNode> {
        self.expect(TokenKind::LeftParen)?;
        let node = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        Ok(node)
    }

    /// `not` binds to the smallest possible following primary: a single
    /// keyword or a fully parenthesized expression. `not not`, `not and`
    /// and `not or` are grammar errors.
    fn parse_not_expr(&mut self) -> ParseResult<ConditionNode> {
        self.expect(TokenKind::Not)?;

        let checkpoint = self.pos;
        let condition = match self.parse_keyword() {
            Ok(node) => node,
            Err(_) => {
                self.pos = checkpoint;
                self.parse_paren_expr()?
            }
        };

        Ok(ConditionNode::Not {
            condition: Box::new(condition),
        })
    }
}

fn reduce_operators(
    nodes: &mut Vec<ConditionNode>,
    operators: &mut Vec<BinaryOperator>,
    incoming_precedence: u8,
) {
    while operators
        .last()
        .is_some_and(|operator| operator.precedence() > incoming_precedence)
    {
        if let (Some(operator), Some(right), Some(left)) =
            (operators.pop(), nodes.pop(), nodes.pop())
        {
            nodes.push(operator.combine(left, right));
        }
    }
}
