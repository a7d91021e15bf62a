use crate::ast::expr::Expr;
use crate::ast::operators::SortOrder;
use serde::{Deserialize, Serialize};

/// A table in a FROM clause, optionally aliased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTerm {
    pub expr: Expr,
    pub order: SortOrder,
}

/// A SELECT statement.
///
/// Plain data: the rendering layer assembles the clauses per dialect.
/// Embedded expressions are exposed through the node contract in the
/// documented order: projection, WHERE, GROUP BY, ORDER BY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Select {
    pub distinct: bool,
    pub columns: Vec<Expr>,
    pub from: Option<TableRef>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            from: Some(TableRef::new(table)),
            ..Self::default()
        }
    }
}
