use super::SqlSyntax;

pub struct DuckDbSyntax;

impl SqlSyntax for DuckDbSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}
