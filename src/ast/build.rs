//! Terse constructor helpers over the node catalog.
//!
//! A convenience sample for tests and internal emulation rewrites, not the
//! staged fluent builder surface (that lives outside this crate).

use crate::ast::expr::Expr;
use crate::ast::operators::{AggFunc, BinaryOp, CmpOp, DateUnit, LogicalOp};
use crate::ast::stmt::Select;
use crate::ast::values::Value;

/// Escape character used by the pattern-building helpers.
pub const LIKE_ESCAPE: char = '!';

/// An unqualified column reference.
pub fn col(name: &str) -> Expr {
    Expr::Column {
        table: None,
        name: name.to_string(),
    }
}

/// A table-qualified column reference.
pub fn qcol(table: &str, name: &str) -> Expr {
    Expr::Column {
        table: Some(table.to_string()),
        name: name.to_string(),
    }
}

/// A literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Value(value.into())
}

/// NULL literal.
pub fn null() -> Expr {
    Expr::Value(Value::Null)
}

/// An aliased expression (expr AS name).
pub fn alias(expr: Expr, name: &str) -> Expr {
    Expr::Alias {
        expr: Box::new(expr),
        name: name.to_string(),
    }
}

/// A row value expression.
pub fn row(items: Vec<Expr>) -> Expr {
    Expr::Row(items)
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn add(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Add, left, right)
}

pub fn concat(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Concat, left, right)
}

pub fn cmp(op: CmpOp, left: Expr, right: Expr) -> Expr {
    Expr::Cmp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn eq(left: Expr, right: Expr) -> Expr {
    cmp(CmpOp::Eq, left, right)
}

pub fn ne(left: Expr, right: Expr) -> Expr {
    cmp(CmpOp::Ne, left, right)
}

pub fn lt(left: Expr, right: Expr) -> Expr {
    cmp(CmpOp::Lt, left, right)
}

pub fn gt(left: Expr, right: Expr) -> Expr {
    cmp(CmpOp::Gt, left, right)
}

pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::Logical {
        op: LogicalOp::And,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::Logical {
        op: LogicalOp::Or,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn not(inner: Expr) -> Expr {
    Expr::Not(Box::new(inner))
}

pub fn is_null(expr: Expr) -> Expr {
    Expr::IsNull {
        expr: Box::new(expr),
        negated: false,
    }
}

pub fn is_not_null(expr: Expr) -> Expr {
    Expr::IsNull {
        expr: Box::new(expr),
        negated: true,
    }
}

/// Raw LIKE against a caller-supplied pattern (no escaping applied).
pub fn like(expr: Expr, pattern: &str) -> Expr {
    Expr::Like {
        expr: Box::new(expr),
        pattern: Box::new(lit(pattern)),
        escape: None,
        negated: false,
    }
}

/// Escape LIKE metacharacters (%, _ and the escape char itself) in literal
/// text, so user input matches verbatim on every dialect.
pub fn escape_like_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn escaped_like(expr: Expr, pattern: String) -> Expr {
    Expr::Like {
        expr: Box::new(expr),
        pattern: Box::new(lit(pattern)),
        escape: Some(LIKE_ESCAPE),
        negated: false,
    }
}

/// expr LIKE '%text%' with metacharacters escaped.
pub fn contains(expr: Expr, text: &str) -> Expr {
    escaped_like(expr, format!("%{}%", escape_like_text(text)))
}

/// expr LIKE 'text%' with metacharacters escaped.
pub fn starts_with(expr: Expr, text: &str) -> Expr {
    escaped_like(expr, format!("{}%", escape_like_text(text)))
}

/// expr LIKE '%text' with metacharacters escaped.
pub fn ends_with(expr: Expr, text: &str) -> Expr {
    escaped_like(expr, format!("%{}", escape_like_text(text)))
}

pub fn in_list(expr: Expr, list: Vec<Expr>) -> Expr {
    Expr::InList {
        expr: Box::new(expr),
        list,
        negated: false,
    }
}

pub fn between(expr: Expr, low: Expr, high: Expr) -> Expr {
    Expr::Between {
        expr: Box::new(expr),
        low: Box::new(low),
        high: Box::new(high),
        negated: false,
    }
}

/// Searched CASE expression.
pub fn case_when(branches: Vec<(Expr, Expr)>, else_value: Option<Expr>) -> Expr {
    Expr::Case {
        branches,
        else_value: else_value.map(Box::new),
    }
}

pub fn cast(expr: Expr, data_type: &str) -> Expr {
    Expr::Cast {
        expr: Box::new(expr),
        data_type: data_type.to_string(),
    }
}

/// Generic function call.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Func {
        name: name.to_string(),
        args,
    }
}

pub fn coalesce(args: Vec<Expr>) -> Expr {
    func("COALESCE", args)
}

pub fn nullif(a: Expr, b: Expr) -> Expr {
    func("NULLIF", vec![a, b])
}

pub fn greatest(args: Vec<Expr>) -> Expr {
    Expr::Greatest(args)
}

pub fn least(args: Vec<Expr>) -> Expr {
    Expr::Least(args)
}

fn aggregate(agg: AggFunc, expr: Option<Expr>) -> Expr {
    Expr::Aggregate {
        func: agg,
        expr: expr.map(Box::new),
        distinct: false,
        filter: None,
    }
}

/// COUNT(*)
pub fn count_star() -> Expr {
    aggregate(AggFunc::Count, None)
}

pub fn count(expr: Expr) -> Expr {
    aggregate(AggFunc::Count, Some(expr))
}

pub fn sum(expr: Expr) -> Expr {
    aggregate(AggFunc::Sum, Some(expr))
}

pub fn avg(expr: Expr) -> Expr {
    aggregate(AggFunc::Avg, Some(expr))
}

pub fn min(expr: Expr) -> Expr {
    aggregate(AggFunc::Min, Some(expr))
}

pub fn max(expr: Expr) -> Expr {
    aggregate(AggFunc::Max, Some(expr))
}

/// Attach a FILTER predicate to an aggregate node.
/// Anything other than an aggregate is returned unchanged.
pub fn filtered(agg: Expr, predicate: Expr) -> Expr {
    match agg {
        Expr::Aggregate {
            func,
            expr,
            distinct,
            ..
        } => Expr::Aggregate {
            func,
            expr,
            distinct,
            filter: Some(Box::new(predicate)),
        },
        other => other,
    }
}

pub fn substring(expr: Expr, start: Expr, length: Option<Expr>) -> Expr {
    Expr::Substring {
        expr: Box::new(expr),
        start: Box::new(start),
        length: length.map(Box::new),
    }
}

pub fn overlay(expr: Expr, placing: Expr, start: Expr, length: Option<Expr>) -> Expr {
    Expr::Overlay {
        expr: Box::new(expr),
        placing: Box::new(placing),
        start: Box::new(start),
        length: length.map(Box::new),
    }
}

pub fn date_add(date: Expr, amount: Expr, unit: DateUnit) -> Expr {
    Expr::DateAdd {
        date: Box::new(date),
        amount: Box::new(amount),
        unit,
    }
}

pub fn subquery(select: Select) -> Expr {
    Expr::Subquery(Box::new(select))
}
