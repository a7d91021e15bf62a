//! Rendering: one context per top-level call, threaded through the tree.
//!
//! The context owns the output buffer, the collected bind values and a
//! stack of scoped state entries. Scoped state replaces any ambient
//! mutable map: an entry pushed for a sub-render is popped before the
//! enclosing call returns, successful or not.

pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;

use crate::ast::values::Value;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::syntax::{SqlSyntax, escape_string};

/// How literal values reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    /// Escaped literal text in the SQL string.
    Inline,
    /// Positional marker in the SQL string, value collected out-of-band.
    #[default]
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCase {
    #[default]
    Upper,
    Lower,
}

/// Whether the surrounding syntax expects a value or a predicate.
/// Dialects without a boolean type get a CASE wrapper for predicates
/// rendered in value position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Value,
    Predicate,
}

/// Keys for scoped context state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKey {
    /// Value vs predicate position of the expression being rendered.
    Position,
    /// A table is being declared (FROM clause) rather than referenced.
    DeclareTable,
    /// A field alias is being declared (projection) rather than referenced.
    DeclareField,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeValue {
    Position(Position),
    Flag(bool),
}

/// Formatting and binding preferences, fixed at context creation.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub keyword_case: KeywordCase,
    pub pretty: bool,
    pub indent: usize,
    pub param_mode: ParamMode,
    /// Skip engine-specific storage clauses in DDL output.
    pub ignore_storage_clauses: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            keyword_case: KeywordCase::Upper,
            pretty: false,
            indent: 2,
            param_mode: ParamMode::Placeholder,
            ignore_storage_clauses: false,
        }
    }
}

/// Trait for rendering AST values to SQL text.
pub trait Render {
    /// Append this node's SQL to the context buffer.
    fn render(&self, ctx: &mut RenderContext) -> Result<()>;

    /// Render against a fresh context with default configuration.
    fn to_sql(&self, dialect: Dialect) -> Result<(String, Vec<Value>)> {
        self.to_sql_with(dialect, RenderConfig::default())
    }

    /// Render against a fresh context with explicit configuration.
    fn to_sql_with(&self, dialect: Dialect, config: RenderConfig) -> Result<(String, Vec<Value>)> {
        let mut ctx = RenderContext::with_config(dialect, config);
        self.render(&mut ctx)?;
        Ok(ctx.finish())
    }
}

/// Single-pass rendering state. One per top-level render call, never
/// shared across threads.
pub struct RenderContext {
    dialect: Dialect,
    syntax: Box<dyn SqlSyntax>,
    config: RenderConfig,
    buf: String,
    binds: Vec<Value>,
    param_mode: ParamMode,
    scopes: Vec<(ScopeKey, ScopeValue)>,
    indent_level: usize,
}

impl RenderContext {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_config(dialect, RenderConfig::default())
    }

    pub fn with_config(dialect: Dialect, config: RenderConfig) -> Self {
        Self {
            dialect,
            syntax: dialect.syntax(),
            config,
            buf: String::new(),
            binds: Vec::new(),
            param_mode: config.param_mode,
            scopes: Vec::new(),
            indent_level: 0,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn syntax(&self) -> &dyn SqlSyntax {
        self.syntax.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn param_mode(&self) -> ParamMode {
        self.param_mode
    }

    /// The SQL string and the bind values collected in emission order.
    /// Marker N (1-based) corresponds to bind slot N.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.buf, self.binds)
    }

    // ---- buffer -----------------------------------------------------------

    /// Append raw SQL text.
    pub fn sql(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append a keyword, applying the configured case. Keywords are given
    /// in canonical uppercase.
    pub fn keyword(&mut self, kw: &str) {
        match self.config.keyword_case {
            KeywordCase::Upper => self.buf.push_str(kw),
            KeywordCase::Lower => self.buf.push_str(&kw.to_ascii_lowercase()),
        }
    }

    /// Append a quoted identifier.
    pub fn ident(&mut self, name: &str) {
        let quoted = self.syntax.quote_identifier(name);
        self.buf.push_str(&quoted);
    }

    /// Separator between top-level clauses: newline plus indent when
    /// pretty-printing, a single space otherwise.
    pub fn clause_sep(&mut self) {
        if self.config.pretty {
            self.buf.push('\n');
            for _ in 0..(self.indent_level * self.config.indent) {
                self.buf.push(' ');
            }
        } else {
            self.buf.push(' ');
        }
    }

    /// Run `body` one indent level deeper (pretty mode only).
    pub fn indented<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.indent_level += 1;
        let out = body(self);
        self.indent_level -= 1;
        out
    }

    // ---- bind values ------------------------------------------------------

    /// Emit a literal value according to the current parameter mode.
    /// NULL always renders inline; a bound NULL marker loses its meaning.
    pub fn bind_value(&mut self, value: &Value) -> Result<()> {
        match self.param_mode {
            ParamMode::Placeholder if !value.is_null() => {
                self.binds.push(value.clone());
                let marker = self.syntax.placeholder(self.binds.len());
                self.buf.push_str(&marker);
            }
            _ => self.write_inline(value),
        }
        Ok(())
    }

    fn write_inline(&mut self, value: &Value) {
        let text = match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => self.syntax.bool_literal(*b),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Str(s) => format!("'{}'", escape_string(s)),
            Value::Date(d) => self.syntax.date_literal(d),
            Value::Timestamp(ts) => self.syntax.timestamp_literal(ts),
            Value::Uuid(u) => format!("'{}'", u),
        };
        self.buf.push_str(&text);
    }

    /// Override the parameter mode for one sub-render; restored on return,
    /// also when `body` fails.
    pub fn with_param_mode<T>(
        &mut self,
        mode: ParamMode,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let prev = self.param_mode;
        self.param_mode = mode;
        let out = body(self);
        self.param_mode = prev;
        out
    }

    // ---- scoped state -----------------------------------------------------

    /// Push `(key, value)` for the duration of `body`; popped before this
    /// call returns, also when `body` fails.
    pub fn with_scoped<T>(
        &mut self,
        key: ScopeKey,
        value: ScopeValue,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.scopes.push((key, value));
        let out = body(self);
        self.scopes.pop();
        out
    }

    /// Topmost entry for `key`; inner scopes hide outer ones.
    pub fn lookup(&self, key: ScopeKey) -> Option<ScopeValue> {
        self.scopes
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Scoped declaration flag (declaration vs reference).
    pub fn declare<T>(
        &mut self,
        key: ScopeKey,
        flag: bool,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.with_scoped(key, ScopeValue::Flag(flag), body)
    }

    /// Whether the given declaration flag is currently set.
    pub fn declaring(&self, key: ScopeKey) -> bool {
        matches!(self.lookup(key), Some(ScopeValue::Flag(true)))
    }

    /// Current expression position, `Value` when unset.
    pub fn position(&self) -> Position {
        match self.lookup(ScopeKey::Position) {
            Some(ScopeValue::Position(p)) => p,
            _ => Position::Value,
        }
    }

    /// Run `body` with the given expression position.
    pub fn with_position<T>(
        &mut self,
        position: Position,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.with_scoped(ScopeKey::Position, ScopeValue::Position(position), body)
    }
}
