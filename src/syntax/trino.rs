use super::SqlSyntax;

pub struct TrinoSyntax;

impl SqlSyntax for TrinoSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
