//! Error types for polysql.

use crate::dialect::Dialect;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SqlError {
    /// A node has no native or emulated rendering for the requested dialect.
    #[error("Unsupported construct: {construct} has no rendering for dialect {dialect:?}")]
    UnsupportedConstruct {
        construct: &'static str,
        dialect: Dialect,
    },

    /// A node was built with argument shapes that violate its invariants
    /// (e.g. a variadic function with zero arguments).
    #[error("Malformed argument: {0}")]
    MalformedArgument(String),

    /// `rebuild` was invoked with a child list whose length does not match
    /// `children()` for that node kind. Always a bug in a rewrite pass.
    #[error("Inconsistent child count for {kind}: expected {expected}, got {got}")]
    InconsistentChildCount {
        kind: &'static str,
        expected: usize,
        got: usize,
    },
}

impl SqlError {
    /// Create an unsupported-construct error.
    pub fn unsupported(construct: &'static str, dialect: Dialect) -> Self {
        Self::UnsupportedConstruct { construct, dialect }
    }

    /// Create a malformed-argument error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SqlError>;
