use super::SqlSyntax;

pub struct OracleSyntax;

impl SqlSyntax for OracleSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!(":{}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        super::offset_fetch(limit, offset)
    }
}
