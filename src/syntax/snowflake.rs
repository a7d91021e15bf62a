use super::SqlSyntax;

pub struct SnowflakeSyntax;

impl SqlSyntax for SnowflakeSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
