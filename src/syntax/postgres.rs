use super::SqlSyntax;

/// Postgres family (Postgres, Cockroach, Yugabyte, Redshift).
pub struct PostgresSyntax;

impl SqlSyntax for PostgresSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}
