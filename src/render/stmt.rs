//! SELECT rendering: clause assembly, declaration scopes, NULLS ordering
//! emulation and the dialect limit/offset spellings.

use super::{Position, Render, RenderContext, ScopeKey};
use crate::ast::expr::Expr;
use crate::ast::stmt::{OrderTerm, Select, TableRef};
use crate::dialect::NO_NULLS_ORDERING;
use crate::error::Result;

impl Render for Select {
    fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.keyword("SELECT");
        if self.distinct {
            ctx.sql(" ");
            ctx.keyword("DISTINCT");
        }
        ctx.sql(" ");
        render_projection(&self.columns, ctx)?;

        if let Some(table) = &self.from {
            ctx.clause_sep();
            ctx.keyword("FROM ");
            render_table(table, ctx)?;
        }

        if let Some(pred) = &self.where_clause {
            ctx.clause_sep();
            ctx.keyword("WHERE ");
            ctx.with_position(Position::Predicate, |c| pred.render(c))?;
        }

        if !self.group_by.is_empty() {
            ctx.clause_sep();
            ctx.keyword("GROUP BY ");
            for (i, expr) in self.group_by.iter().enumerate() {
                if i > 0 {
                    ctx.sql(", ");
                }
                ctx.with_position(Position::Value, |c| expr.render(c))?;
            }
        }

        if !self.order_by.is_empty() {
            ctx.clause_sep();
            ctx.keyword("ORDER BY ");
            for (i, term) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ctx.sql(", ");
                }
                render_order_term(term, ctx)?;
            }
        }

        if self.limit.is_some() || self.offset.is_some() {
            let clause = ctx.syntax().limit_offset(self.limit, self.offset);
            ctx.clause_sep();
            ctx.keyword(&clause);
        }
        Ok(())
    }
}

fn render_projection(columns: &[Expr], ctx: &mut RenderContext) -> Result<()> {
    if columns.is_empty() {
        ctx.sql("*");
        return Ok(());
    }
    // Projection items declare their aliases; everywhere else an alias is
    // a plain reference.
    ctx.declare(ScopeKey::DeclareField, true, |c| {
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                c.sql(", ");
            }
            c.with_position(Position::Value, |c| col.render(c))?;
        }
        Ok(())
    })
}

fn render_table(table: &TableRef, ctx: &mut RenderContext) -> Result<()> {
    ctx.ident(&table.name);
    if let Some(alias) = &table.alias {
        // No AS keyword for table aliases: Oracle rejects it.
        ctx.sql(" ");
        ctx.declare(ScopeKey::DeclareTable, true, |c| {
            c.ident(alias);
            Ok(())
        })?;
    }
    Ok(())
}

fn render_order_term(term: &OrderTerm, ctx: &mut RenderContext) -> Result<()> {
    let nulls = term.order.nulls_first();
    if let Some(first) = nulls {
        if NO_NULLS_ORDERING.contains(ctx.dialect()) {
            // Prepend an ASC sort key that puts NULL rows where requested.
            // Emitted as raw text so the 0/1 keys never become binds.
            ctx.keyword("CASE WHEN ");
            ctx.with_position(Position::Value, |c| term.expr.render(c))?;
            ctx.keyword(" IS NULL THEN ");
            ctx.sql(if first { "0" } else { "1" });
            ctx.keyword(" ELSE ");
            ctx.sql(if first { "1" } else { "0" });
            ctx.keyword(" END");
            ctx.sql(", ");
            render_direction(term, ctx)?;
            return Ok(());
        }
    }
    render_direction(term, ctx)?;
    if let Some(first) = nulls {
        if !NO_NULLS_ORDERING.contains(ctx.dialect()) {
            ctx.keyword(if first { " NULLS FIRST" } else { " NULLS LAST" });
        }
    }
    Ok(())
}

fn render_direction(term: &OrderTerm, ctx: &mut RenderContext) -> Result<()> {
    ctx.with_position(Position::Value, |c| term.expr.render(c))?;
    ctx.sql(" ");
    ctx.keyword(term.order.direction());
    Ok(())
}
