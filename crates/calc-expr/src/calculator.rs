use crate::ast::AstNode;
use crate::error::CalcError;
use crate::evaluator::evaluate;
use crate::lexer::tokenize;
use crate::parser::{ParseError, ParseOptions, Parser};
use crate::validator::validate;
use std::collections::HashMap;

/// Runs the full pipeline (tokenize, parse, validate, evaluate) and returns
/// the first failure encountered.
pub fn calculate(expression: &str) -> Result<i32, CalcError> {
    calculate_with_options(expression, ParseOptions::default())
}

/// Like [`calculate`], treating an absent expression as empty input.
pub fn calculate_optional(expression: Option<&str>) -> Result<i32, CalcError> {
    calculate(expression.ok_or(ParseError::EmptyExpression)?)
}

#[tracing::instrument(level = "debug", skip(expression), fields(len = expression.len()))]
pub fn calculate_with_options(expression: &str, options: ParseOptions) -> Result<i32, CalcError> {
    let ast = compile(expression, options)?;
    Ok(evaluate(&ast)?)
}

/// Parses and validates `expression` without evaluating it.
pub fn compile(expression: &str, options: ParseOptions) -> Result<AstNode, CalcError> {
    if expression.trim().is_empty() {
        return Err(ParseError::EmptyExpression.into());
    }
    let tokens = tokenize(expression)?;
    let ast = Parser::with_options(tokens, options).parse()?;
    validate(&ast)?;
    Ok(ast)
}

/// Cache size applied by [`Calculator::new`] and [`Calculator::with_options`].
pub const DEFAULT_CACHE_LIMIT: usize = 1024;

/// Calculator that remembers the validated tree of every expression it has
/// evaluated successfully. Once `cache_limit` entries are held, new
/// expressions are still evaluated but no longer cached.
#[derive(Debug)]
pub struct Calculator {
    options: ParseOptions,
    cache: HashMap<String, AstNode>,
    cache_limit: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self::with_cache_limit(options, DEFAULT_CACHE_LIMIT)
    }

    pub fn with_cache_limit(options: ParseOptions, cache_limit: usize) -> Self {
        Self {
            options,
            cache: HashMap::new(),
            cache_limit,
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn calculate(&mut self, expression: &str) -> Result<i32, CalcError> {
        if let Some(ast) = self.cache.get(expression) {
            tracing::trace!("compiled expression cache hit");
            return Ok(evaluate(ast)?);
        }
        let ast = compile(expression, self.options)?;
        let value = evaluate(&ast)?;
        if self.cache.len() < self.cache_limit {
            self.cache.insert(expression.to_string(), ast);
        }
        Ok(value)
    }

    pub fn cached_expressions(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_limit(&self) -> usize {
        self.cache_limit
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
