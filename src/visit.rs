//! The node contract and the generic traverse/replace engine.
//!
//! Every AST value exposes its embedded expressions through `children()`
//! in a documented order and can be reconstructed with substituted
//! children through `rebuild()`. `traverse` and `replace` work against
//! that contract only; no node kind special-cases the algorithms.

use crate::ast::expr::Expr;
use crate::ast::stmt::{OrderTerm, Select};
use crate::error::{Result, SqlError};

/// Structural access to a node's expression children.
pub trait AstNode: Sized + Clone + PartialEq {
    /// Stable node-kind name for diagnostics.
    fn node_kind(&self) -> &'static str;

    /// Child expressions in positional order. The order matches the
    /// parameter order of `rebuild` and the visitation order of `traverse`.
    fn children(&self) -> Vec<Expr>;

    /// Reconstruct a node of the same kind with substituted children.
    /// `rebuild(children())` is structurally equal to the original.
    fn rebuild(&self, children: Vec<Expr>) -> Result<Self>;

    /// Bottom-up rewrite of every embedded expression. When no child
    /// changed, `self` is returned unchanged without a rebuild.
    fn map_exprs<F>(&self, f: &F) -> Result<Self>
    where
        F: Fn(Expr) -> Expr,
    {
        let kids = self.children();
        let mut new_kids = Vec::with_capacity(kids.len());
        let mut changed = false;
        for kid in &kids {
            let replaced = replace(kid, f)?;
            if replaced != *kid {
                changed = true;
            }
            new_kids.push(replaced);
        }
        if changed {
            self.rebuild(new_kids)
        } else {
            Ok(self.clone())
        }
    }
}

/// Fold `accumulate` over `expr` and its descendants.
///
/// The node itself is visited first, then its children in order. `abort`
/// short-circuits the whole walk once the accumulator satisfies it;
/// `recurse` gates descent below a node.
pub fn traverse<A, B, R, F>(expr: &Expr, init: A, abort: &B, recurse: &R, accumulate: &mut F) -> A
where
    B: Fn(&A) -> bool,
    R: Fn(&Expr) -> bool,
    F: FnMut(A, &Expr) -> A,
{
    let mut acc = accumulate(init, expr);
    if abort(&acc) || !recurse(expr) {
        return acc;
    }
    for child in expr.children() {
        if abort(&acc) {
            return acc;
        }
        acc = traverse(&child, acc, abort, recurse, accumulate);
    }
    acc
}

/// Bottom-up, sharing-preserving tree rewrite.
///
/// Children are replaced first; when every new child equals its original
/// the rebuild is skipped, then `f` is applied to the (possibly rebuilt)
/// node. Leaves go straight to `f`.
pub fn replace<F>(expr: &Expr, f: &F) -> Result<Expr>
where
    F: Fn(Expr) -> Expr,
{
    let node = expr.map_exprs(f)?;
    Ok(f(node))
}

impl Expr {
    /// See [`traverse`].
    pub fn traverse<A, B, R, F>(&self, init: A, abort: &B, recurse: &R, accumulate: &mut F) -> A
    where
        B: Fn(&A) -> bool,
        R: Fn(&Expr) -> bool,
        F: FnMut(A, &Expr) -> A,
    {
        traverse(self, init, abort, recurse, accumulate)
    }

    /// Fold over the whole tree with no abort/recursion control.
    pub fn fold<A, F>(&self, init: A, accumulate: &mut F) -> A
    where
        F: FnMut(A, &Expr) -> A,
    {
        traverse(self, init, &|_| false, &|_| true, accumulate)
    }

    /// See [`replace`].
    pub fn replace<F>(&self, f: &F) -> Result<Expr>
    where
        F: Fn(Expr) -> Expr,
    {
        replace(self, f)
    }

    /// Total number of nodes in this tree, the node itself included.
    pub fn node_count(&self) -> usize {
        self.fold(0usize, &mut |acc, _| acc + 1)
    }

    /// Whether the tree contains any aggregate function node.
    pub fn contains_aggregate(&self) -> bool {
        self.traverse(
            false,
            &|found| *found,
            &|_| true,
            &mut |acc, node| acc || matches!(node, Expr::Aggregate { .. }),
        )
    }

    /// Every column reference in the tree, qualified names dotted.
    pub fn collect_columns(&self) -> Vec<String> {
        self.fold(Vec::new(), &mut |mut acc, node| {
            if let Expr::Column { table, name } = node {
                match table {
                    Some(t) => acc.push(format!("{}.{}", t, name)),
                    None => acc.push(name.clone()),
                }
            }
            acc
        })
    }
}

fn check_arity(kind: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        Ok(())
    } else {
        Err(SqlError::InconsistentChildCount {
            kind,
            expected,
            got,
        })
    }
}

impl AstNode for Expr {
    fn node_kind(&self) -> &'static str {
        self.kind()
    }

    fn children(&self) -> Vec<Expr> {
        match self {
            Expr::Value(_) | Expr::Column { .. } => Vec::new(),
            Expr::Alias { expr, .. } => vec![(**expr).clone()],
            Expr::Row(items) => items.clone(),
            Expr::Binary { left, right, .. }
            | Expr::Cmp { left, right, .. }
            | Expr::Logical { left, right, .. } => vec![(**left).clone(), (**right).clone()],
            Expr::Not(inner) => vec![(**inner).clone()],
            Expr::IsNull { expr, .. } => vec![(**expr).clone()],
            Expr::Like { expr, pattern, .. } => vec![(**expr).clone(), (**pattern).clone()],
            Expr::InList { expr, list, .. } => {
                let mut out = Vec::with_capacity(1 + list.len());
                out.push((**expr).clone());
                out.extend(list.iter().cloned());
                out
            }
            Expr::Between {
                expr, low, high, ..
            } => vec![(**expr).clone(), (**low).clone(), (**high).clone()],
            Expr::Case {
                branches,
                else_value,
            } => {
                let mut out = Vec::with_capacity(branches.len() * 2 + 1);
                for (when, then) in branches {
                    out.push(when.clone());
                    out.push(then.clone());
                }
                if let Some(e) = else_value {
                    out.push((**e).clone());
                }
                out
            }
            Expr::Cast { expr, .. } => vec![(**expr).clone()],
            Expr::Func { args, .. } | Expr::Greatest(args) | Expr::Least(args) => args.clone(),
            Expr::Aggregate { expr, filter, .. } => {
                let mut out = Vec::new();
                if let Some(e) = expr {
                    out.push((**e).clone());
                }
                if let Some(fx) = filter {
                    out.push((**fx).clone());
                }
                out
            }
            Expr::Substring {
                expr,
                start,
                length,
            } => {
                let mut out = vec![(**expr).clone(), (**start).clone()];
                if let Some(l) = length {
                    out.push((**l).clone());
                }
                out
            }
            Expr::Overlay {
                expr,
                placing,
                start,
                length,
            } => {
                let mut out = vec![(**expr).clone(), (**placing).clone(), (**start).clone()];
                if let Some(l) = length {
                    out.push((**l).clone());
                }
                out
            }
            Expr::DateAdd { date, amount, .. } => vec![(**date).clone(), (**amount).clone()],
            Expr::Subquery(select) => select.children(),
        }
    }

    fn rebuild(&self, children: Vec<Expr>) -> Result<Self> {
        let kind = self.kind();
        let got = children.len();
        let mut it = children.into_iter();
        let mut next = || it.next().expect("arity checked before consumption");

        match self {
            Expr::Value(_) | Expr::Column { .. } => {
                check_arity(kind, 0, got)?;
                Ok(self.clone())
            }
            Expr::Alias { name, .. } => {
                check_arity(kind, 1, got)?;
                Ok(Expr::Alias {
                    expr: Box::new(next()),
                    name: name.clone(),
                })
            }
            Expr::Row(items) => {
                check_arity(kind, items.len(), got)?;
                Ok(Expr::Row(it.collect()))
            }
            Expr::Binary { op, .. } => {
                check_arity(kind, 2, got)?;
                Ok(Expr::Binary {
                    op: *op,
                    left: Box::new(next()),
                    right: Box::new(next()),
                })
            }
            Expr::Cmp { op, .. } => {
                check_arity(kind, 2, got)?;
                Ok(Expr::Cmp {
                    op: *op,
                    left: Box::new(next()),
                    right: Box::new(next()),
                })
            }
            Expr::Logical { op, .. } => {
                check_arity(kind, 2, got)?;
                Ok(Expr::Logical {
                    op: *op,
                    left: Box::new(next()),
                    right: Box::new(next()),
                })
            }
            Expr::Not(_) => {
                check_arity(kind, 1, got)?;
                Ok(Expr::Not(Box::new(next())))
            }
            Expr::IsNull { negated, .. } => {
                check_arity(kind, 1, got)?;
                Ok(Expr::IsNull {
                    expr: Box::new(next()),
                    negated: *negated,
                })
            }
            Expr::Like {
                escape, negated, ..
            } => {
                check_arity(kind, 2, got)?;
                Ok(Expr::Like {
                    expr: Box::new(next()),
                    pattern: Box::new(next()),
                    escape: *escape,
                    negated: *negated,
                })
            }
            Expr::InList { list, negated, .. } => {
                check_arity(kind, 1 + list.len(), got)?;
                Ok(Expr::InList {
                    expr: Box::new(next()),
                    list: it.collect(),
                    negated: *negated,
                })
            }
            Expr::Between { negated, .. } => {
                check_arity(kind, 3, got)?;
                Ok(Expr::Between {
                    expr: Box::new(next()),
                    low: Box::new(next()),
                    high: Box::new(next()),
                    negated: *negated,
                })
            }
            Expr::Case {
                branches,
                else_value,
            } => {
                let expected = branches.len() * 2 + usize::from(else_value.is_some());
                check_arity(kind, expected, got)?;
                let mut new_branches = Vec::with_capacity(branches.len());
                for _ in 0..branches.len() {
                    let when = next();
                    let then = next();
                    new_branches.push((when, then));
                }
                let new_else = else_value.as_ref().map(|_| Box::new(next()));
                Ok(Expr::Case {
                    branches: new_branches,
                    else_value: new_else,
                })
            }
            Expr::Cast { data_type, .. } => {
                check_arity(kind, 1, got)?;
                Ok(Expr::Cast {
                    expr: Box::new(next()),
                    data_type: data_type.clone(),
                })
            }
            Expr::Func { name, args } => {
                check_arity(kind, args.len(), got)?;
                Ok(Expr::Func {
                    name: name.clone(),
                    args: it.collect(),
                })
            }
            Expr::Greatest(args) => {
                check_arity(kind, args.len(), got)?;
                Ok(Expr::Greatest(it.collect()))
            }
            Expr::Least(args) => {
                check_arity(kind, args.len(), got)?;
                Ok(Expr::Least(it.collect()))
            }
            Expr::Aggregate {
                func,
                expr,
                distinct,
                filter,
            } => {
                let expected = usize::from(expr.is_some()) + usize::from(filter.is_some());
                check_arity(kind, expected, got)?;
                let new_expr = expr.as_ref().map(|_| Box::new(next()));
                let new_filter = filter.as_ref().map(|_| Box::new(next()));
                Ok(Expr::Aggregate {
                    func: *func,
                    expr: new_expr,
                    distinct: *distinct,
                    filter: new_filter,
                })
            }
            Expr::Substring { length, .. } => {
                let expected = 2 + usize::from(length.is_some());
                check_arity(kind, expected, got)?;
                Ok(Expr::Substring {
                    expr: Box::new(next()),
                    start: Box::new(next()),
                    length: length.as_ref().map(|_| Box::new(next())),
                })
            }
            Expr::Overlay { length, .. } => {
                let expected = 3 + usize::from(length.is_some());
                check_arity(kind, expected, got)?;
                Ok(Expr::Overlay {
                    expr: Box::new(next()),
                    placing: Box::new(next()),
                    start: Box::new(next()),
                    length: length.as_ref().map(|_| Box::new(next())),
                })
            }
            Expr::DateAdd { unit, .. } => {
                check_arity(kind, 2, got)?;
                Ok(Expr::DateAdd {
                    date: Box::new(next()),
                    amount: Box::new(next()),
                    unit: *unit,
                })
            }
            Expr::Subquery(select) => {
                let rebuilt = select.rebuild(it.collect())?;
                Ok(Expr::Subquery(Box::new(rebuilt)))
            }
        }
    }
}

impl AstNode for Select {
    fn node_kind(&self) -> &'static str {
        "select"
    }

    fn children(&self) -> Vec<Expr> {
        let mut out = self.columns.clone();
        if let Some(w) = &self.where_clause {
            out.push(w.clone());
        }
        out.extend(self.group_by.iter().cloned());
        out.extend(self.order_by.iter().map(|t| t.expr.clone()));
        out
    }

    fn rebuild(&self, children: Vec<Expr>) -> Result<Self> {
        let expected = self.columns.len()
            + usize::from(self.where_clause.is_some())
            + self.group_by.len()
            + self.order_by.len();
        check_arity("select", expected, children.len())?;
        let mut it = children.into_iter();
        let columns: Vec<Expr> = it.by_ref().take(self.columns.len()).collect();
        let where_clause = self.where_clause.as_ref().map(|_| {
            it.next().expect("arity checked before consumption")
        });
        let group_by: Vec<Expr> = it.by_ref().take(self.group_by.len()).collect();
        let order_by: Vec<OrderTerm> = self
            .order_by
            .iter()
            .zip(it)
            .map(|(term, expr)| OrderTerm {
                expr,
                order: term.order,
            })
            .collect();
        Ok(Select {
            distinct: self.distinct,
            columns,
            from: self.from.clone(),
            where_clause,
            group_by,
            order_by,
            limit: self.limit,
            offset: self.offset,
        })
    }
}
