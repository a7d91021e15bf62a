//! Associative operator flattening.
//!
//! A left-associative chain `a OP b OP c` arrives as a left-nested binary
//! tree. Rendering unfolds the left spine into a flat operand list so the
//! chain is emitted with a single separator and one recursion level,
//! instead of one nesting (and one parenthesis pair) per operator. Only
//! the left spine is unfolded here; a same-kind right child is handed back
//! to the renderer opaque, which flattens it again on its own, so the
//! output text ends up invariant to the input nesting shape.

use crate::ast::expr::Expr;
use crate::ast::operators::{BinaryOp, LogicalOp};

/// Flatten a binary-operator node one level deep along its left spine.
/// Non-associative operators come back as the plain two-operand pair.
pub fn flatten_binary<'a>(op: BinaryOp, left: &'a Expr, right: &'a Expr) -> Vec<&'a Expr> {
    let mut operands = Vec::new();
    if op.is_associative() {
        collect_binary(op, left, &mut operands);
    } else {
        operands.push(left);
    }
    operands.push(right);
    operands
}

fn collect_binary<'a>(op: BinaryOp, expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Binary {
            op: inner,
            left,
            right,
        } if *inner == op => {
            collect_binary(op, left, out);
            out.push(right);
        }
        other => out.push(other),
    }
}

/// Flatten an AND/OR chain along its left spine.
pub fn flatten_logical<'a>(op: LogicalOp, left: &'a Expr, right: &'a Expr) -> Vec<&'a Expr> {
    let mut operands = Vec::new();
    collect_logical(op, left, &mut operands);
    operands.push(right);
    operands
}

fn collect_logical<'a>(op: LogicalOp, expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Logical {
            op: inner,
            left,
            right,
        } if *inner == op => {
            collect_logical(op, left, out);
            out.push(right);
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    #[test]
    fn left_spine_flattens_completely() {
        // ((a AND b) AND c) AND d
        let a = eq(col("a"), lit(1));
        let b = eq(col("b"), lit(2));
        let c = eq(col("c"), lit(3));
        let d = eq(col("d"), lit(4));
        let tree = and(and(and(a.clone(), b.clone()), c.clone()), d.clone());
        if let Expr::Logical { op, left, right } = &tree {
            let flat = flatten_logical(*op, left, right);
            assert_eq!(flat, vec![&a, &b, &c, &d]);
        } else {
            unreachable!()
        }
    }

    #[test]
    fn right_child_stays_opaque() {
        let a = eq(col("a"), lit(1));
        let rest = and(eq(col("b"), lit(2)), eq(col("c"), lit(3)));
        let tree = and(a.clone(), rest.clone());
        if let Expr::Logical { op, left, right } = &tree {
            let flat = flatten_logical(*op, left, right);
            assert_eq!(flat, vec![&a, &rest]);
        } else {
            unreachable!()
        }
    }

    #[test]
    fn non_associative_operators_do_not_flatten() {
        let tree = binary(
            crate::ast::BinaryOp::Sub,
            binary(crate::ast::BinaryOp::Sub, lit(1), lit(2)),
            lit(3),
        );
        if let Expr::Binary { op, left, right } = &tree {
            let flat = flatten_binary(*op, left, right);
            assert_eq!(flat.len(), 2);
        } else {
            unreachable!()
        }
    }
}
