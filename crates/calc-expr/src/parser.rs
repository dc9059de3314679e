//! Recursive-descent parser.
//!
//! ```text
//! expression = term (('+' | '-') term)*
//! term       = unary (('*' | '/') unary)*
//! unary      = '-' unary | primary
//! primary    = NUMBER | '(' expression ')'
//! ```
//!
//! Binary operators are left-associative; unary minus nests to the right
//! and binds tighter than any binary operator.

use crate::ast::{AstNode, BinaryOp};
use crate::lexer::{tokenize, LexError, Token, TokenKind};
use crate::stack::ensure_sufficient_stack;

/// Nesting limit applied by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Magnitude of `i32::MIN`, the one literal that only fits when negated.
const MIN_MAGNITUDE: u64 = 2_147_483_648;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expression must not be empty")]
    EmptyExpression,
    #[error("expected {expected} at position {pos}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },
    #[error("unexpected token {found} at position {pos}")]
    TrailingInput { found: String, pos: usize },
    #[error("number too large: '{literal}' at position {pos}")]
    NumberTooLarge { literal: String, pos: usize },
    #[error("expression nested too deeply at position {pos} (limit {max_depth})")]
    TooDeep { max_depth: usize, pos: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of parenthesised groups and unary minus.
    /// `None` disables the check.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    pub fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    options: ParseOptions,
}

pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse()
}

pub fn parse_expression(input: &str) -> Result<AstNode, ParseError> {
    parse_expression_with_options(input, ParseOptions::default())
}

pub fn parse_expression_with_options(input: &str, options: ParseOptions) -> Result<AstNode, ParseError> {
    let tokens = tokenize(input)?;
    Parser::with_options(tokens, options).parse()
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParseOptions) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let pos = tokens.last().map(|token| token.pos + token.text.chars().count()).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                pos,
            });
        }
        Self {
            tokens,
            index: 0,
            depth: 0,
            options,
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        let result = self.parse_root();
        if let Err(error) = &result {
            tracing::debug!(%error, "parse failed");
        }
        result
    }

    fn parse_root(&mut self) -> Result<AstNode, ParseError> {
        let expression = self.parse_expression()?;
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(ParseError::TrailingInput {
                found: token.describe(),
                pos: token.pos,
            });
        }
        Ok(expression)
    }

    fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.parse_term()?;
        loop {
            let op = if self.match_kind(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.match_kind(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_term()?;
            node = AstNode::binary(node, op, right);
        }
        Ok(node)
    }

    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.parse_unary()?;
        loop {
            let op = if self.match_kind(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.match_kind(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let right = self.parse_unary()?;
            node = AstNode::binary(node, op, right);
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if !self.check(TokenKind::Minus) {
            return self.parse_primary();
        }
        let minus = self.advance();
        if self.match_min_literal() {
            return Ok(AstNode::Number(i32::MIN));
        }
        self.nested(minus.pos, |parser| parser.parse_unary().map(AstNode::negate))
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number => token
                .text
                .parse::<i32>()
                .map(AstNode::Number)
                .map_err(|_| ParseError::NumberTooLarge {
                    literal: token.text,
                    pos: token.pos,
                }),
            TokenKind::LParen => self.nested(token.pos, |parser| {
                let expr = parser.parse_expression()?;
                parser.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }),
            _ => Err(ParseError::UnexpectedToken {
                expected: "number or '('".to_string(),
                found: token.describe(),
                pos: token.pos,
            }),
        }
    }

    /// Runs `f` one nesting level deeper, enforcing the depth limit.
    fn nested<F>(&mut self, pos: usize, f: F) -> Result<AstNode, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<AstNode, ParseError>,
    {
        if let Some(max_depth) = self.options.max_depth {
            if self.depth >= max_depth {
                return Err(ParseError::TooDeep { max_depth, pos });
            }
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Consumes a NUMBER token spelling 2147483648 directly after a unary
    /// minus, so that `-2147483648` denotes `i32::MIN`.
    fn match_min_literal(&mut self) -> bool {
        let token = self.peek();
        let is_min = token.kind == TokenKind::Number
            && token.text.parse::<u64>().ok() == Some(MIN_MAGNITUDE);
        if is_min {
            self.advance();
        }
        is_min
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
                pos: token.pos,
            })
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
