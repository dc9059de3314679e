use crate::lexer::LexError;
use crate::parser::ParseError;

/// Failures of a syntactically well-formed expression: division by zero,
/// found statically or at evaluation time, and 32-bit overflow.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("division by zero detected in expression")]
    DivisionByZeroDetected,
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in expression: {operation}")]
    Overflow { operation: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] ParseError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidExpression,
    Validation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidExpression => "invalid_expression",
            ErrorKind::Validation => "validation",
        }
    }
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidExpression(_) => ErrorKind::InvalidExpression,
            CalcError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub fn is_invalid_expression(&self) -> bool {
        self.kind() == ErrorKind::InvalidExpression
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<LexError> for CalcError {
    fn from(error: LexError) -> Self {
        CalcError::InvalidExpression(ParseError::Lex(error))
    }
}
