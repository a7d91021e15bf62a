use super::SqlSyntax;

pub struct FirebirdSyntax;

impl SqlSyntax for FirebirdSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        super::offset_fetch(limit, offset)
    }

    fn char_length_function(&self) -> &'static str {
        "CHAR_LENGTH"
    }
}
