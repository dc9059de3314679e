use crate::ast::{AstNode, BinaryOp};
use crate::error::ValidationError;
use crate::stack::ensure_sufficient_stack;

/// Evaluates `node` post-order with checked 32-bit arithmetic. Division
/// truncates toward zero.
#[tracing::instrument(level = "debug", skip_all)]
pub fn evaluate(node: &AstNode) -> Result<i32, ValidationError> {
    let result = evaluate_node(node);
    match &result {
        Ok(value) => tracing::trace!(value = *value, "evaluated"),
        Err(error) => tracing::debug!(%error, "evaluation failed"),
    }
    result
}

fn evaluate_node(node: &AstNode) -> Result<i32, ValidationError> {
    ensure_sufficient_stack(|| match node {
        AstNode::Number(value) => Ok(*value),
        AstNode::Binary { left, op, right } => {
            let left = evaluate_node(left)?;
            let right = evaluate_node(right)?;
            evaluate_binary(left, *op, right)
        }
        AstNode::Negate { operand } => {
            let value = evaluate_node(operand)?;
            value.checked_neg().ok_or_else(|| ValidationError::Overflow {
                operation: format!("-({value})"),
            })
        }
    })
}

pub fn evaluate_binary(left: i32, op: BinaryOp, right: i32) -> Result<i32, ValidationError> {
    let checked = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div => {
            if right == 0 {
                return Err(ValidationError::DivisionByZero);
            }
            // checked_div only fails for MIN / -1 once zero is excluded
            left.checked_div(right)
        }
    };
    checked.ok_or_else(|| ValidationError::Overflow {
        operation: format!("{left} {op} {right}"),
    })
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
