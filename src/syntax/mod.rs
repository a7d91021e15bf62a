//! Per-dialect lexical layer: quoting, placeholders, literals, limits.
//!
//! One small unit struct per dialect family. Anything structural
//! (emulation, operator selection) lives in the render layer driven by
//! capability sets; only spelling-level differences belong here.

pub mod bigquery;
pub mod duckdb;
pub mod firebird;
pub mod h2;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod snowflake;
pub mod sqlite;
pub mod sqlserver;
pub mod trino;

use chrono::{NaiveDate, NaiveDateTime};

pub trait SqlSyntax {
    /// Quote an identifier, escaping embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String;

    /// Positional bind marker. `index` is 1-based in emission order.
    fn placeholder(&self, index: usize) -> String;

    fn bool_literal(&self, val: bool) -> String {
        if val { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    fn date_literal(&self, d: &NaiveDate) -> String {
        format!("DATE '{}'", d)
    }

    fn timestamp_literal(&self, ts: &NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", ts)
    }

    /// The trailing limit/offset fragment, empty when neither is set.
    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!("LIMIT {}", n));
        }
        if let Some(n) = offset {
            if !sql.is_empty() {
                sql.push(' ');
            }
            sql.push_str(&format!("OFFSET {}", n));
        }
        sql
    }

    /// Name of the character-length function.
    fn char_length_function(&self) -> &'static str {
        "LENGTH"
    }
}

/// Double embedded single quotes for an inline string literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// OFFSET m ROWS FETCH NEXT n ROWS ONLY, shared by the dialects without
/// LIMIT.
pub(crate) fn offset_fetch(limit: Option<u64>, offset: Option<u64>) -> String {
    if limit.is_none() && offset.is_none() {
        return String::new();
    }
    let mut sql = format!("OFFSET {} ROWS", offset.unwrap_or(0));
    if let Some(n) = limit {
        sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", n));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_doubles_quotes() {
        assert_eq!(escape_string("o'brien"), "o''brien");
    }

    #[test]
    fn offset_fetch_forms() {
        assert_eq!(offset_fetch(None, None), "");
        assert_eq!(offset_fetch(Some(10), None), "OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY");
        assert_eq!(offset_fetch(None, Some(5)), "OFFSET 5 ROWS");
        assert_eq!(
            offset_fetch(Some(10), Some(5)),
            "OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
        );
    }
}
