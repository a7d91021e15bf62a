use crate::ast::stmt::Select;
use crate::ast::operators::{AggFunc, BinaryOp, CmpOp, DateUnit, LogicalOp};
use crate::ast::values::Value;
use serde::{Deserialize, Serialize};

/// A general expression node (column, value, predicate, function, ...).
///
/// Immutable after construction: rewrites go through
/// [`AstNode::rebuild`](crate::visit::AstNode) and produce new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A literal value
    Value(Value),
    /// A column reference, optionally table-qualified
    Column {
        table: Option<String>,
        name: String,
    },
    /// An aliased expression. Renders `expr AS alias` in declaration
    /// position (projection) and the bare alias name elsewhere.
    Alias { expr: Box<Expr>, name: String },
    /// A row value expression (a, b, c)
    Row(Vec<Expr>),
    /// Binary arithmetic/bitwise/concat expression
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Comparison predicate
    Cmp {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// AND/OR connective
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Negated predicate
    Not(Box<Expr>),
    /// IS [NOT] NULL test
    IsNull { expr: Box<Expr>, negated: bool },
    /// [NOT] LIKE with an optional explicit ESCAPE character
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<char>,
        negated: bool,
    },
    /// [NOT] IN (a, b, c). An empty list renders the canonical
    /// contradiction instead of invalid SQL.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// [NOT] BETWEEN low AND high
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    /// Searched CASE expression
    Case {
        /// WHEN condition THEN result pairs
        branches: Vec<(Expr, Expr)>,
        else_value: Option<Box<Expr>>,
    },
    /// CAST(expr AS type)
    Cast { expr: Box<Expr>, data_type: String },
    /// Generic function call (COALESCE, NULLIF, REPLACE, ...)
    Func { name: String, args: Vec<Expr> },
    /// Variadic GREATEST(args...)
    Greatest(Vec<Expr>),
    /// Variadic LEAST(args...)
    Least(Vec<Expr>),
    /// Aggregate function with optional DISTINCT and FILTER clause.
    /// `expr` is None for COUNT(*).
    Aggregate {
        func: AggFunc,
        expr: Option<Box<Expr>>,
        distinct: bool,
        filter: Option<Box<Expr>>,
    },
    /// SUBSTRING(expr FROM start [FOR length])
    Substring {
        expr: Box<Expr>,
        start: Box<Expr>,
        length: Option<Box<Expr>>,
    },
    /// OVERLAY(expr PLACING placing FROM start [FOR length])
    Overlay {
        expr: Box<Expr>,
        placing: Box<Expr>,
        start: Box<Expr>,
        length: Option<Box<Expr>>,
    },
    /// Date arithmetic: date plus `amount` calendar units
    DateAdd {
        date: Box<Expr>,
        amount: Box<Expr>,
        unit: DateUnit,
    },
    /// Scalar subquery
    Subquery(Box<Select>),
}

impl Expr {
    /// Stable name of this node kind, used in error diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Value(_) => "value",
            Expr::Column { .. } => "column",
            Expr::Alias { .. } => "alias",
            Expr::Row(_) => "row",
            Expr::Binary { .. } => "binary",
            Expr::Cmp { .. } => "comparison",
            Expr::Logical { .. } => "logical",
            Expr::Not(_) => "not",
            Expr::IsNull { .. } => "is-null",
            Expr::Like { .. } => "like",
            Expr::InList { .. } => "in-list",
            Expr::Between { .. } => "between",
            Expr::Case { .. } => "case",
            Expr::Cast { .. } => "cast",
            Expr::Func { .. } => "function",
            Expr::Greatest(_) => "greatest",
            Expr::Least(_) => "least",
            Expr::Aggregate { .. } => "aggregate",
            Expr::Substring { .. } => "substring",
            Expr::Overlay { .. } => "overlay",
            Expr::DateAdd { .. } => "date-add",
            Expr::Subquery(_) => "subquery",
        }
    }

    /// Three-valued-logic nullability: whether evaluating this expression
    /// can yield NULL. Conservative (true when unknown); callers use it to
    /// decide between a direct boolean rendering and a CASE emulation.
    pub fn can_be_null(&self) -> bool {
        match self {
            Expr::Value(v) => v.is_null(),
            Expr::Column { .. } => true,
            Expr::Alias { expr, .. } => expr.can_be_null(),
            Expr::Row(items) => items.iter().any(Expr::can_be_null),
            Expr::Binary { left, right, .. } => left.can_be_null() || right.can_be_null(),
            Expr::Cmp { left, right, .. } => left.can_be_null() || right.can_be_null(),
            Expr::Logical { left, right, .. } => left.can_be_null() || right.can_be_null(),
            Expr::Not(inner) => inner.can_be_null(),
            Expr::IsNull { .. } => false,
            Expr::Like { expr, pattern, .. } => expr.can_be_null() || pattern.can_be_null(),
            Expr::InList { expr, list, .. } => {
                expr.can_be_null() || list.iter().any(Expr::can_be_null)
            }
            Expr::Between {
                expr, low, high, ..
            } => expr.can_be_null() || low.can_be_null() || high.can_be_null(),
            Expr::Case {
                branches,
                else_value,
            } => {
                else_value.as_ref().is_none_or(|e| e.can_be_null())
                    || branches.iter().any(|(_, then)| then.can_be_null())
            }
            Expr::Cast { expr, .. } => expr.can_be_null(),
            Expr::Func { .. } => true,
            Expr::Greatest(args) | Expr::Least(args) => args.iter().any(Expr::can_be_null),
            Expr::Aggregate { func, .. } => !matches!(func, AggFunc::Count),
            Expr::Substring { .. } | Expr::Overlay { .. } => true,
            Expr::DateAdd { date, amount, .. } => date.can_be_null() || amount.can_be_null(),
            Expr::Subquery(_) => true,
        }
    }

    /// Whether this node renders as a predicate (boolean-valued SQL).
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Expr::Cmp { .. }
                | Expr::Logical { .. }
                | Expr::Not(_)
                | Expr::IsNull { .. }
                | Expr::Like { .. }
                | Expr::InList { .. }
                | Expr::Between { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::build::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tree_serde_round_trip() {
        let tree = and(
            eq(col("status"), lit("active")),
            between(col("age"), lit(18), lit(65)),
        );
        let json = serde_json::to_string(&tree).unwrap();
        let back: super::Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn nullability_is_conservative() {
        assert!(!lit(1).can_be_null());
        assert!(null().can_be_null());
        assert!(col("x").can_be_null());
        assert!(!is_null(col("x")).can_be_null());
        assert!(!count_star().can_be_null());
        assert!(sum(col("x")).can_be_null());
        let no_else = case_when(vec![(eq(col("a"), lit(1)), lit(2))], None);
        assert!(no_else.can_be_null());
    }

    #[test]
    fn predicate_classification() {
        assert!(eq(col("a"), lit(1)).is_predicate());
        assert!(not(is_null(col("a"))).is_predicate());
        assert!(!col("a").is_predicate());
        assert!(!greatest(vec![col("a"), col("b")]).is_predicate());
    }
}
