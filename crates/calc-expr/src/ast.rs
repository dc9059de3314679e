use crate::stack::ensure_sufficient_stack;
use std::fmt;

/// Expression tree produced by the parser. Children are owned by their
/// parent; nodes are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Number(i32),
    Binary {
        left: Box<AstNode>,
        op: BinaryOp,
        right: Box<AstNode>,
    },
    Negate {
        operand: Box<AstNode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl AstNode {
    pub fn number(value: i32) -> Self {
        AstNode::Number(value)
    }

    pub fn binary(left: AstNode, op: BinaryOp, right: AstNode) -> Self {
        AstNode::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn negate(operand: AstNode) -> Self {
        AstNode::Negate {
            operand: Box::new(operand),
        }
    }

    /// Visits every node once in pre-order (node, left, right / operand),
    /// stopping at the first error returned by `visit`.
    pub fn walk<E, F>(&self, visit: &mut F) -> Result<(), E>
    where
        F: FnMut(&AstNode) -> Result<(), E>,
    {
        ensure_sufficient_stack(|| {
            visit(self)?;
            match self {
                AstNode::Number(_) => Ok(()),
                AstNode::Binary { left, right, .. } => {
                    left.walk(visit)?;
                    right.walk(visit)
                }
                AstNode::Negate { operand } => operand.walk(visit),
            }
        })
    }

    pub fn node_count(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            AstNode::Number(_) => 1,
            AstNode::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
            AstNode::Negate { operand } => 1 + operand.node_count(),
        })
    }

    /// Length of the longest root-to-leaf path; a lone literal has depth 1.
    pub fn depth(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            AstNode::Number(_) => 1,
            AstNode::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
            AstNode::Negate { operand } => 1 + operand.depth(),
        })
    }
}

/// Frees the tree with an explicit worklist. The compiler's drop glue would
/// recurse once per level, and operator chains are as deep as they are long.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(node: &mut AstNode, pending: &mut Vec<Box<AstNode>>) {
    match node {
        AstNode::Number(_) => {}
        AstNode::Binary { left, right, .. } => {
            detach(left, pending);
            detach(right, pending);
        }
        AstNode::Negate { operand } => detach(operand, pending),
    }
}

fn detach(child: &mut Box<AstNode>, pending: &mut Vec<Box<AstNode>>) {
    if !matches!(child.as_ref(), AstNode::Number(_)) {
        pending.push(std::mem::replace(child, Box::new(AstNode::Number(0))));
    }
}

/// Fully parenthesised rendering: `(1 + (2 * 3))`, `-5`, `-(-5)`, `-(1 + 2)`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            AstNode::Number(value) => write!(f, "{value}"),
            AstNode::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            AstNode::Negate { operand } => match operand.as_ref() {
                AstNode::Number(value) if *value >= 0 => write!(f, "-{value}"),
                AstNode::Binary { .. } => write!(f, "-{operand}"),
                _ => write!(f, "-({operand})"),
            },
        })
    }
}

#[cfg(test)]
#[path = "ast_test.rs"]
mod tests;
