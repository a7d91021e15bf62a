use super::SqlSyntax;
use chrono::{NaiveDate, NaiveDateTime};

pub struct SqliteSyntax;

impl SqlSyntax for SqliteSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    // SQLite stores dates as text; typed literals are not syntax.
    fn date_literal(&self, d: &NaiveDate) -> String {
        format!("'{}'", d)
    }

    fn timestamp_literal(&self, ts: &NaiveDateTime) -> String {
        format!("'{}'", ts)
    }
}
