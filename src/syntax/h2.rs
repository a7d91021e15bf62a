use super::SqlSyntax;

pub struct H2Syntax;

impl SqlSyntax for H2Syntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
