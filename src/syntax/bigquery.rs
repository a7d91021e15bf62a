use super::SqlSyntax;

pub struct BigQuerySyntax;

impl SqlSyntax for BigQuerySyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
