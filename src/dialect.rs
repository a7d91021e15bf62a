//! Supported dialects, dialect families and capability sets.
//!
//! Capability sets are the lookup tables the renderer branches on. Adding a
//! dialect is a data change here, not a code change in every node.

use crate::syntax::SqlSyntax;
use crate::syntax::bigquery::BigQuerySyntax;
use crate::syntax::duckdb::DuckDbSyntax;
use crate::syntax::firebird::FirebirdSyntax;
use crate::syntax::h2::H2Syntax;
use crate::syntax::mysql::MySqlSyntax;
use crate::syntax::oracle::OracleSyntax;
use crate::syntax::postgres::PostgresSyntax;
use crate::syntax::snowflake::SnowflakeSyntax;
use crate::syntax::sqlite::SqliteSyntax;
use crate::syntax::sqlserver::SqlServerSyntax;
use crate::syntax::trino::TrinoSyntax;
use serde::{Deserialize, Serialize};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Dialect {
    #[default]
    Postgres,
    Cockroach,
    Yugabyte,
    Redshift,
    MySql,
    MariaDb,
    Sqlite,
    DuckDb,
    SqlServer,
    Oracle,
    Snowflake,
    BigQuery,
    Trino,
    Firebird,
    H2,
}

/// Dialect families group engines sharing syntax and emulation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialectFamily {
    Postgres,
    MySql,
    Sqlite,
    DuckDb,
    SqlServer,
    Oracle,
    Snowflake,
    BigQuery,
    Trino,
    Firebird,
    H2,
}

impl Dialect {
    /// Every supported dialect, in declaration order.
    pub const ALL: [Dialect; 15] = [
        Dialect::Postgres,
        Dialect::Cockroach,
        Dialect::Yugabyte,
        Dialect::Redshift,
        Dialect::MySql,
        Dialect::MariaDb,
        Dialect::Sqlite,
        Dialect::DuckDb,
        Dialect::SqlServer,
        Dialect::Oracle,
        Dialect::Snowflake,
        Dialect::BigQuery,
        Dialect::Trino,
        Dialect::Firebird,
        Dialect::H2,
    ];

    /// The family this dialect belongs to.
    pub const fn family(self) -> DialectFamily {
        match self {
            Dialect::Postgres | Dialect::Cockroach | Dialect::Yugabyte | Dialect::Redshift => {
                DialectFamily::Postgres
            }
            Dialect::MySql | Dialect::MariaDb => DialectFamily::MySql,
            Dialect::Sqlite => DialectFamily::Sqlite,
            Dialect::DuckDb => DialectFamily::DuckDb,
            Dialect::SqlServer => DialectFamily::SqlServer,
            Dialect::Oracle => DialectFamily::Oracle,
            Dialect::Snowflake => DialectFamily::Snowflake,
            Dialect::BigQuery => DialectFamily::BigQuery,
            Dialect::Trino => DialectFamily::Trino,
            Dialect::Firebird => DialectFamily::Firebird,
            Dialect::H2 => DialectFamily::H2,
        }
    }

    /// The lexical layer for this dialect (quoting, placeholders, limits).
    pub fn syntax(self) -> Box<dyn SqlSyntax> {
        match self.family() {
            DialectFamily::Postgres => Box::new(PostgresSyntax),
            DialectFamily::MySql => Box::new(MySqlSyntax),
            DialectFamily::Sqlite => Box::new(SqliteSyntax),
            DialectFamily::DuckDb => Box::new(DuckDbSyntax),
            DialectFamily::SqlServer => Box::new(SqlServerSyntax),
            DialectFamily::Oracle => Box::new(OracleSyntax),
            DialectFamily::Snowflake => Box::new(SnowflakeSyntax),
            DialectFamily::BigQuery => Box::new(BigQuerySyntax),
            DialectFamily::Trino => Box::new(TrinoSyntax),
            DialectFamily::Firebird => Box::new(FirebirdSyntax),
            DialectFamily::H2 => Box::new(H2Syntax),
        }
    }
}

/// An immutable set of dialects sharing one support fact.
///
/// Pure membership data: two sets with the same members are the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet(u32);

impl CapabilitySet {
    pub const fn of(dialects: &[Dialect]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < dialects.len() {
            bits |= 1 << dialects[i] as u32;
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(&self, dialect: Dialect) -> bool {
        self.0 & (1 << dialect as u32) != 0
    }
}

/// Dialects without a boolean value type: predicates in value position are
/// wrapped in CASE WHEN.
pub static NO_BOOLEAN_TYPE: CapabilitySet =
    CapabilitySet::of(&[Dialect::Oracle, Dialect::SqlServer]);

/// Dialects lacking the aggregate FILTER clause.
pub static NO_FILTER_CLAUSE: CapabilitySet = CapabilitySet::of(&[
    Dialect::MySql,
    Dialect::MariaDb,
    Dialect::SqlServer,
    Dialect::Oracle,
    Dialect::Redshift,
    Dialect::BigQuery,
    Dialect::Snowflake,
    Dialect::Firebird,
]);

/// Dialects where GREATEST/LEAST must be rewritten to pairwise CASE WHEN.
pub static EMULATED_GREATEST: CapabilitySet = CapabilitySet::of(&[Dialect::SqlServer]);

/// Dialects spelling variadic greatest/least as scalar MAX/MIN.
pub static GREATEST_AS_MAX: CapabilitySet = CapabilitySet::of(&[Dialect::Sqlite]);

/// Dialects spelling variadic greatest/least as MAXVALUE/MINVALUE.
pub static GREATEST_AS_MAXVALUE: CapabilitySet = CapabilitySet::of(&[Dialect::Firebird]);

/// Dialects rendering || concatenation as a CONCAT(...) call.
pub static CONCAT_AS_FUNCTION: CapabilitySet =
    CapabilitySet::of(&[Dialect::MySql, Dialect::MariaDb, Dialect::BigQuery]);

/// Dialects rendering || concatenation with the + operator.
pub static CONCAT_AS_PLUS: CapabilitySet = CapabilitySet::of(&[Dialect::SqlServer]);

/// Dialects without infix bitwise operators: function forms instead
/// (BITAND/BITOR on Snowflake and H2, BIN_AND/BIN_OR on Firebird,
/// BITWISE_AND/BITWISE_OR on Trino, BITAND plus arithmetic rewrites on
/// Oracle).
pub static BITWISE_AS_FUNCTION: CapabilitySet = CapabilitySet::of(&[
    Dialect::Oracle,
    Dialect::Snowflake,
    Dialect::Firebird,
    Dialect::Trino,
    Dialect::H2,
]);

/// Dialects with infix & and | but an XOR(a, b) function instead of an
/// xor operator (DuckDB reserves ^ for exponentiation).
pub static XOR_AS_FUNCTION: CapabilitySet = CapabilitySet::of(&[Dialect::DuckDb]);

/// Dialects with infix & and | but no xor operator at all: rewritten to
/// (a | b) - (a & b).
pub static EMULATED_XOR: CapabilitySet = CapabilitySet::of(&[Dialect::Sqlite]);

/// Dialects without infix shift operators: POWER(2, n) arithmetic instead.
pub static NO_SHIFT_OPERATORS: CapabilitySet = CapabilitySet::of(&[
    Dialect::SqlServer,
    Dialect::Oracle,
    Dialect::Snowflake,
    Dialect::Trino,
    Dialect::Firebird,
    Dialect::H2,
]);

/// Dialects lacking row value expressions in comparisons: expanded to
/// column-wise predicates.
pub static NO_ROW_EXPRESSIONS: CapabilitySet = CapabilitySet::of(&[
    Dialect::Sqlite,
    Dialect::SqlServer,
    Dialect::Oracle,
    Dialect::Snowflake,
    Dialect::BigQuery,
    Dialect::Redshift,
    Dialect::Firebird,
]);

/// Dialects without NULLS FIRST/LAST in ORDER BY: a CASE sort key is
/// prepended instead.
pub static NO_NULLS_ORDERING: CapabilitySet =
    CapabilitySet::of(&[Dialect::MySql, Dialect::MariaDb, Dialect::SqlServer]);

/// Dialects spelling substring as SUBSTR(x, s, l).
pub static SUBSTR_SHORT_NAME: CapabilitySet = CapabilitySet::of(&[
    Dialect::Sqlite,
    Dialect::Oracle,
    Dialect::DuckDb,
    Dialect::Snowflake,
    Dialect::BigQuery,
    Dialect::Trino,
]);

/// Dialects spelling substring as SUBSTRING(x, s, l) with comma arguments.
pub static SUBSTRING_COMMA_SYNTAX: CapabilitySet =
    CapabilitySet::of(&[Dialect::MySql, Dialect::MariaDb, Dialect::SqlServer]);

/// Dialects without OVERLAY: substring/concat composition instead.
pub static NO_OVERLAY: CapabilitySet = CapabilitySet::of(&[
    Dialect::Sqlite,
    Dialect::DuckDb,
    Dialect::SqlServer,
    Dialect::Oracle,
    Dialect::Snowflake,
    Dialect::BigQuery,
    Dialect::Redshift,
    Dialect::Trino,
]);

/// Dialects rendering OVERLAY with the INSERT(x, s, l, y) function.
pub static OVERLAY_AS_INSERT: CapabilitySet =
    CapabilitySet::of(&[Dialect::MySql, Dialect::MariaDb]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_partition_all_dialects() {
        for d in Dialect::ALL {
            // Family dispatch must be total.
            let _ = d.family();
        }
        assert_eq!(Dialect::Cockroach.family(), DialectFamily::Postgres);
        assert_eq!(Dialect::MariaDb.family(), DialectFamily::MySql);
    }

    #[test]
    fn capability_set_membership() {
        let set = CapabilitySet::of(&[Dialect::Oracle, Dialect::Sqlite]);
        assert!(set.contains(Dialect::Oracle));
        assert!(set.contains(Dialect::Sqlite));
        assert!(!set.contains(Dialect::Postgres));
    }

    #[test]
    fn substring_syntax_sets_are_disjoint() {
        for d in Dialect::ALL {
            assert!(
                !(SUBSTR_SHORT_NAME.contains(d) && SUBSTRING_COMMA_SYNTAX.contains(d)),
                "{d:?} claims two substring spellings"
            );
        }
    }
}
