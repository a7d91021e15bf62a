use super::SqlSyntax;
use chrono::{NaiveDate, NaiveDateTime};

pub struct SqlServerSyntax;

impl SqlSyntax for SqlServerSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn date_literal(&self, d: &NaiveDate) -> String {
        format!("'{}'", d)
    }

    fn timestamp_literal(&self, ts: &NaiveDateTime) -> String {
        format!("'{}'", ts)
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        super::offset_fetch(limit, offset)
    }

    fn char_length_function(&self) -> &'static str {
        "LEN"
    }
}
