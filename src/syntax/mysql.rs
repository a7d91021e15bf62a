use super::SqlSyntax;

/// MySQL family (MySQL, MariaDB).
pub struct MySqlSyntax;

impl SqlSyntax for MySqlSyntax {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn char_length_function(&self) -> &'static str {
        "CHAR_LENGTH"
    }
}
