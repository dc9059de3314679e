//! Static checks run before evaluation.
//!
//! Only a literal zero divisor is rejected here. Divisors that merely
//! evaluate to zero, such as `10 / (5 - 5)`, are left to the evaluator.

use crate::ast::{AstNode, BinaryOp};
use crate::error::ValidationError;

#[tracing::instrument(level = "debug", skip_all)]
pub fn validate(node: &AstNode) -> Result<(), ValidationError> {
    let result = node.walk(&mut check_node);
    if let Err(error) = &result {
        tracing::debug!(%error, "validation failed");
    }
    result
}

fn check_node(node: &AstNode) -> Result<(), ValidationError> {
    match node {
        AstNode::Binary {
            op: BinaryOp::Div,
            right,
            ..
        } if matches!(right.as_ref(), AstNode::Number(0)) => Err(ValidationError::DivisionByZeroDetected),
        AstNode::Number(_) | AstNode::Binary { .. } | AstNode::Negate { .. } => Ok(()),
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
