//! Two-pass calculator over whitespace-separated tokens.
//!
//! Superseded by the tree-based pipeline in [`crate::calculator`] and kept
//! for comparison. Tokens alternate `number operator number ...`; numbers
//! may carry their own sign and parentheses are not supported. The first
//! pass folds `*` and `/` into a list of additive terms, the second applies
//! `+` and `-` left to right.

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FlatError {
    #[error("expression must not be empty")]
    Empty,
    #[error("missing operand after operator: {0}")]
    MissingOperand(String),
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in expression")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Additive {
    Add,
    Sub,
}

#[tracing::instrument(level = "debug", skip(expression), fields(len = expression.len()))]
pub fn calculate(expression: &str) -> Result<i32, FlatError> {
    let tokens = expression.split_whitespace().collect::<Vec<_>>();
    let Some((first, rest)) = tokens.split_first() else {
        return Err(FlatError::Empty);
    };

    let mut terms = vec![parse_number(first)?];
    let mut ops = Vec::new();
    for pair in rest.chunks(2) {
        let operator = pair[0];
        let Some(operand) = pair.get(1) else {
            return Err(FlatError::MissingOperand(operator.to_string()));
        };
        let value = parse_number(operand)?;
        match operator {
            "*" | "/" => {
                let left = terms.pop().ok_or(FlatError::Empty)?;
                terms.push(multiplicative(left, operator, value)?);
            }
            "+" => {
                ops.push(Additive::Add);
                terms.push(value);
            }
            "-" => {
                ops.push(Additive::Sub);
                terms.push(value);
            }
            _ => return Err(FlatError::UnknownOperator(operator.to_string())),
        }
    }

    let mut result = terms[0];
    for (op, term) in ops.iter().zip(&terms[1..]) {
        let next = match op {
            Additive::Add => result.checked_add(*term),
            Additive::Sub => result.checked_sub(*term),
        };
        result = next.ok_or(FlatError::Overflow)?;
    }
    Ok(result)
}

fn multiplicative(left: i32, operator: &str, right: i32) -> Result<i32, FlatError> {
    if operator == "*" {
        return left.checked_mul(right).ok_or(FlatError::Overflow);
    }
    if right == 0 {
        return Err(FlatError::DivisionByZero);
    }
    left.checked_div(right).ok_or(FlatError::Overflow)
}

fn parse_number(token: &str) -> Result<i32, FlatError> {
    token
        .parse::<i32>()
        .map_err(|_| FlatError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
#[path = "flat_test.rs"]
mod tests;
