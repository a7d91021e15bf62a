mod core;
mod dialects;

use crate::ast::values::Value;
use crate::dialect::Dialect;
use crate::render::{ParamMode, Render, RenderConfig};

/// Render with default config (placeholder parameters), SQL text only.
fn sql(node: &impl Render, dialect: Dialect) -> String {
    node.to_sql(dialect).expect("render failed").0
}

/// Render with literals inlined, SQL text only.
fn inline(node: &impl Render, dialect: Dialect) -> String {
    let config = RenderConfig {
        param_mode: ParamMode::Inline,
        ..RenderConfig::default()
    };
    node.to_sql_with(dialect, config).expect("render failed").0
}

/// Render with default config, bind values only.
fn binds(node: &impl Render, dialect: Dialect) -> Vec<Value> {
    node.to_sql(dialect).expect("render failed").1
}
