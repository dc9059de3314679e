//! Integer arithmetic expressions: `+ - * /`, unary minus and parentheses
//! over signed 32-bit values.
//!
//! Text flows through [`tokenize`], [`parse`], [`validate`] and
//! [`evaluate`]; [`calculate`] runs the whole pipeline.

pub mod ast;
pub mod calculator;
pub mod error;
pub mod evaluator;
pub mod flat;
pub mod lexer;
pub mod parser;
pub mod stack;
pub mod validator;

pub use ast::{AstNode, BinaryOp};
pub use calculator::{
    calculate, calculate_optional, calculate_with_options, compile, Calculator, DEFAULT_CACHE_LIMIT,
};
pub use error::{CalcError, ErrorKind, ValidationError};
pub use evaluator::evaluate;
pub use flat::FlatError;
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::{
    parse, parse_expression, parse_expression_with_options, ParseError, ParseOptions, Parser,
    DEFAULT_MAX_DEPTH,
};
pub use validator::validate;
