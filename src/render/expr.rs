//! Rendering for the expression catalog.
//!
//! Every node follows the same shape: consult the capability sets for the
//! target dialect, emit native syntax when supported, otherwise pick an
//! emulation strategy (rewrite to an equivalent node tree, substitute an
//! alternate function name, or emit a hand-written fragment). Emulation is
//! a success path, not error recovery.

use super::{ParamMode, Position, Render, RenderConfig, RenderContext};
use crate::ast::build as b;
use crate::ast::expr::Expr;
use crate::ast::operators::{AggFunc, BinaryOp, CmpOp, DateUnit, LogicalOp};
use crate::ast::values::Value;
use crate::dialect::{
    BITWISE_AS_FUNCTION, CONCAT_AS_FUNCTION, CONCAT_AS_PLUS, Dialect, DialectFamily,
    EMULATED_GREATEST, EMULATED_XOR, GREATEST_AS_MAX, GREATEST_AS_MAXVALUE, NO_BOOLEAN_TYPE,
    NO_FILTER_CLAUSE, NO_OVERLAY, NO_ROW_EXPRESSIONS, NO_SHIFT_OPERATORS, OVERLAY_AS_INSERT,
    SUBSTR_SHORT_NAME, SUBSTRING_COMMA_SYNTAX, XOR_AS_FUNCTION,
};
use crate::error::{Result, SqlError};
use crate::fold::{flatten_binary, flatten_logical};

impl Render for Expr {
    fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        // Predicates used as values need a CASE wrapper on dialects
        // without a boolean type.
        if self.is_predicate()
            && ctx.position() == Position::Value
            && NO_BOOLEAN_TYPE.contains(ctx.dialect())
        {
            return render_predicate_as_value(self, ctx);
        }

        match self {
            Expr::Value(v) => ctx.bind_value(v),
            Expr::Column { table, name } => {
                if let Some(t) = table {
                    ctx.ident(t);
                    ctx.sql(".");
                }
                ctx.ident(name);
                Ok(())
            }
            Expr::Alias { expr, name } => render_alias(expr, name, ctx),
            Expr::Row(items) => render_args_parenthesized(items, ctx),
            Expr::Binary { op, left, right } => render_binary(*op, left, right, ctx),
            Expr::Cmp { op, left, right } => render_cmp(*op, left, right, ctx),
            Expr::Logical { op, left, right } => render_logical(*op, left, right, ctx),
            Expr::Not(inner) => {
                ctx.keyword("NOT");
                ctx.sql(" (");
                ctx.with_position(Position::Predicate, |c| inner.render(c))?;
                ctx.sql(")");
                Ok(())
            }
            Expr::IsNull { expr, negated } => {
                render_value_operand(expr, ctx)?;
                ctx.keyword(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Expr::Like {
                expr,
                pattern,
                escape,
                negated,
            } => render_like(expr, pattern, *escape, *negated, ctx),
            Expr::InList {
                expr,
                list,
                negated,
            } => render_in_list(expr, list, *negated, ctx),
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                render_value_operand(expr, ctx)?;
                ctx.keyword(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                render_value_operand(low, ctx)?;
                ctx.keyword(" AND ");
                render_value_operand(high, ctx)
            }
            Expr::Case {
                branches,
                else_value,
            } => render_case(branches, else_value.as_deref(), ctx),
            Expr::Cast { expr, data_type } => {
                ctx.keyword("CAST");
                ctx.sql("(");
                render_value_operand(expr, ctx)?;
                ctx.keyword(" AS ");
                ctx.sql(data_type);
                ctx.sql(")");
                Ok(())
            }
            Expr::Func { name, args } => {
                ctx.keyword(name);
                render_args_parenthesized(args, ctx)
            }
            Expr::Greatest(args) => render_greatest(args, CmpOp::Gt, ctx),
            Expr::Least(args) => render_greatest(args, CmpOp::Lt, ctx),
            Expr::Aggregate {
                func,
                expr,
                distinct,
                filter,
            } => render_aggregate(*func, expr.as_deref(), *distinct, filter.as_deref(), ctx),
            Expr::Substring {
                expr,
                start,
                length,
            } => render_substring(expr, start, length.as_deref(), ctx),
            Expr::Overlay {
                expr,
                placing,
                start,
                length,
            } => render_overlay(expr, placing, start, length.as_deref(), ctx),
            Expr::DateAdd { date, amount, unit } => render_date_add(date, amount, *unit, ctx),
            Expr::Subquery(select) => {
                ctx.sql("(");
                ctx.indented(|c| select.render(c))?;
                ctx.sql(")");
                Ok(())
            }
        }
    }

    /// A predicate rendered standalone is a condition in its own right, so
    /// the fresh context opens in predicate position; everything else opens
    /// in value position.
    fn to_sql_with(&self, dialect: Dialect, config: RenderConfig) -> Result<(String, Vec<Value>)> {
        let mut ctx = RenderContext::with_config(dialect, config);
        let position = if self.is_predicate() {
            Position::Predicate
        } else {
            Position::Value
        };
        ctx.with_position(position, |c| self.render(c))?;
        Ok(ctx.finish())
    }
}

/// CASE WHEN p THEN 1 ELSE 0 END for dialects without a boolean type.
fn render_predicate_as_value(pred: &Expr, ctx: &mut RenderContext) -> Result<()> {
    ctx.keyword("CASE WHEN ");
    ctx.with_position(Position::Predicate, |c| pred.render(c))?;
    ctx.keyword(" THEN ");
    ctx.sql("1");
    ctx.keyword(" ELSE ");
    ctx.sql("0");
    ctx.keyword(" END");
    Ok(())
}

fn render_alias(expr: &Expr, name: &str, ctx: &mut RenderContext) -> Result<()> {
    if ctx.declaring(super::ScopeKey::DeclareField) {
        // Declaration position: emit the expression and declare the alias.
        // The alias itself is a reference, not a nested declaration.
        ctx.declare(super::ScopeKey::DeclareField, false, |c| expr.render(c))?;
        ctx.keyword(" AS ");
        ctx.ident(name);
        Ok(())
    } else {
        ctx.ident(name);
        Ok(())
    }
}

/// Parenthesize value operands that would otherwise be ambiguous.
fn render_value_operand(expr: &Expr, ctx: &mut RenderContext) -> Result<()> {
    let parens = matches!(expr, Expr::Cmp { .. } | Expr::Logical { .. })
        && ctx.position() == Position::Predicate;
    ctx.with_position(Position::Value, |c| {
        if parens {
            c.sql("(");
        }
        expr.render(c)?;
        if parens {
            c.sql(")");
        }
        Ok(())
    })
}

fn render_args(args: &[Expr], ctx: &mut RenderContext) -> Result<()> {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            ctx.sql(", ");
        }
        render_value_operand(arg, ctx)?;
    }
    Ok(())
}

fn render_args_parenthesized(args: &[Expr], ctx: &mut RenderContext) -> Result<()> {
    ctx.sql("(");
    render_args(args, ctx)?;
    ctx.sql(")");
    Ok(())
}

// ---- binary operators ------------------------------------------------------

fn render_binary(op: BinaryOp, left: &Expr, right: &Expr, ctx: &mut RenderContext) -> Result<()> {
    let dialect = ctx.dialect();
    match op {
        BinaryOp::Concat => render_concat(left, right, ctx),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor
            if BITWISE_AS_FUNCTION.contains(dialect) =>
        {
            render_bitwise_function(op, left, right, ctx)
        }
        BinaryOp::BitXor if XOR_AS_FUNCTION.contains(dialect) => {
            ctx.keyword("XOR");
            ctx.sql("(");
            render_value_operand(left, ctx)?;
            ctx.sql(", ");
            render_value_operand(right, ctx)?;
            ctx.sql(")");
            Ok(())
        }
        BinaryOp::BitXor if EMULATED_XOR.contains(dialect) => {
            // No xor operator: a ^ b = (a | b) - (a & b), built from the
            // infix forms the dialect does have.
            let rewritten = b::binary(
                BinaryOp::Sub,
                b::binary(BinaryOp::BitOr, left.clone(), right.clone()),
                b::binary(BinaryOp::BitAnd, left.clone(), right.clone()),
            );
            rewritten.render(ctx)
        }
        BinaryOp::BitXor if dialect.family() == DialectFamily::Postgres => {
            // Postgres reserves ^ for exponentiation; xor is #.
            render_infix_chain(op, "#", left, right, ctx)
        }
        BinaryOp::Shl | BinaryOp::Shr if NO_SHIFT_OPERATORS.contains(dialect) => {
            render_shift_emulated(op, left, right, ctx)
        }
        BinaryOp::Rem
            if matches!(
                dialect.family(),
                DialectFamily::Oracle | DialectFamily::Firebird
            ) =>
        {
            // No % operator: MOD(a, b).
            ctx.keyword("MOD");
            ctx.sql("(");
            render_value_operand(left, ctx)?;
            ctx.sql(", ");
            render_value_operand(right, ctx)?;
            ctx.sql(")");
            Ok(())
        }
        _ => render_infix_chain(op, &op.to_string(), left, right, ctx),
    }
}

/// Flatten the left spine and emit `a OP b OP c` with minimal parentheses.
fn render_infix_chain(
    op: BinaryOp,
    token: &str,
    left: &Expr,
    right: &Expr,
    ctx: &mut RenderContext,
) -> Result<()> {
    let operands = flatten_binary(op, left, right);
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            ctx.sql(" ");
            ctx.sql(token);
            ctx.sql(" ");
        }
        render_operand(operand, op, ctx)?;
    }
    Ok(())
}

/// Render one operand of an infix operator, parenthesized when needed.
fn render_operand(operand: &Expr, parent: BinaryOp, ctx: &mut RenderContext) -> Result<()> {
    let parens = binary_operand_needs_parens(operand, parent);
    ctx.with_position(Position::Value, |c| {
        if parens {
            c.sql("(");
        }
        operand.render(c)?;
        if parens {
            c.sql(")");
        }
        Ok(())
    })
}

fn binary_operand_needs_parens(operand: &Expr, parent: BinaryOp) -> bool {
    match operand {
        Expr::Binary { op, .. } => *op != parent || !parent.is_associative(),
        Expr::Cmp { .. } | Expr::Logical { .. } => true,
        _ => false,
    }
}

fn render_concat(left: &Expr, right: &Expr, ctx: &mut RenderContext) -> Result<()> {
    let dialect = ctx.dialect();
    if CONCAT_AS_FUNCTION.contains(dialect) {
        let operands: Vec<Expr> = flatten_binary(BinaryOp::Concat, left, right)
            .into_iter()
            .cloned()
            .collect();
        ctx.keyword("CONCAT");
        render_args_parenthesized(&operands, ctx)
    } else if CONCAT_AS_PLUS.contains(dialect) {
        render_infix_chain(BinaryOp::Concat, "+", left, right, ctx)
    } else {
        render_infix_chain(BinaryOp::Concat, "||", left, right, ctx)
    }
}

fn render_bitwise_function(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ctx: &mut RenderContext,
) -> Result<()> {
    let family = ctx.dialect().family();
    let name = match (family, op) {
        (DialectFamily::Firebird, BinaryOp::BitAnd) => "BIN_AND",
        (DialectFamily::Firebird, BinaryOp::BitOr) => "BIN_OR",
        (DialectFamily::Firebird, BinaryOp::BitXor) => "BIN_XOR",
        (DialectFamily::Snowflake | DialectFamily::H2, BinaryOp::BitAnd) => "BITAND",
        (DialectFamily::Snowflake | DialectFamily::H2, BinaryOp::BitOr) => "BITOR",
        (DialectFamily::Snowflake | DialectFamily::H2, BinaryOp::BitXor) => "BITXOR",
        (DialectFamily::Trino, BinaryOp::BitAnd) => "BITWISE_AND",
        (DialectFamily::Trino, BinaryOp::BitOr) => "BITWISE_OR",
        (DialectFamily::Trino, BinaryOp::BitXor) => "BITWISE_XOR",
        (DialectFamily::Oracle, BinaryOp::BitAnd) => "BITAND",
        (DialectFamily::Oracle, BinaryOp::BitOr | BinaryOp::BitXor) => {
            // Oracle only ships BITAND; OR and XOR become arithmetic over
            // it: a|b = a + b - BITAND(a, b), a^b = a + b - 2 * BITAND(a, b).
            // The constants are part of the emulation, never binds.
            ctx.sql("(");
            render_value_operand(left, ctx)?;
            ctx.sql(" + ");
            render_value_operand(right, ctx)?;
            ctx.sql(") - ");
            if op == BinaryOp::BitXor {
                ctx.sql("2 * ");
            }
            ctx.keyword("BITAND");
            ctx.sql("(");
            render_value_operand(left, ctx)?;
            ctx.sql(", ");
            render_value_operand(right, ctx)?;
            ctx.sql(")");
            return Ok(());
        }
        _ => {
            return Err(SqlError::unsupported("bitwise operator", ctx.dialect()));
        }
    };
    ctx.keyword(name);
    ctx.sql("(");
    render_value_operand(left, ctx)?;
    ctx.sql(", ");
    render_value_operand(right, ctx)?;
    ctx.sql(")");
    Ok(())
}

/// a << n becomes a * POWER(2, n); a >> n becomes FLOOR(a / POWER(2, n)).
/// The base 2 is part of the emulation, never a bind.
fn render_shift_emulated(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ctx: &mut RenderContext,
) -> Result<()> {
    if op == BinaryOp::Shl {
        render_operand(left, BinaryOp::Mul, ctx)?;
        ctx.sql(" * ");
        ctx.keyword("POWER");
        ctx.sql("(2, ");
        render_value_operand(right, ctx)?;
        ctx.sql(")");
    } else {
        ctx.keyword("FLOOR");
        ctx.sql("(");
        render_operand(left, BinaryOp::Div, ctx)?;
        ctx.sql(" / ");
        ctx.keyword("POWER");
        ctx.sql("(2, ");
        render_value_operand(right, ctx)?;
        ctx.sql("))");
    }
    Ok(())
}

// ---- predicates ------------------------------------------------------------

fn render_cmp(op: CmpOp, left: &Expr, right: &Expr, ctx: &mut RenderContext) -> Result<()> {
    if let (Expr::Row(lhs), Expr::Row(rhs)) = (left, right) {
        return render_row_cmp(op, lhs, rhs, ctx);
    }
    if matches!(left, Expr::Row(_)) || matches!(right, Expr::Row(_)) {
        return Err(SqlError::malformed(
            "row expression compared against a scalar",
        ));
    }
    render_value_operand(left, ctx)?;
    ctx.sql(" ");
    ctx.sql(&op.to_string());
    ctx.sql(" ");
    render_value_operand(right, ctx)
}

fn render_row_cmp(op: CmpOp, lhs: &[Expr], rhs: &[Expr], ctx: &mut RenderContext) -> Result<()> {
    if lhs.len() != rhs.len() {
        return Err(SqlError::malformed(format!(
            "row comparison arity mismatch: {} vs {}",
            lhs.len(),
            rhs.len()
        )));
    }
    if lhs.is_empty() {
        return Err(SqlError::malformed("empty row expression"));
    }
    if !NO_ROW_EXPRESSIONS.contains(ctx.dialect()) {
        render_args_parenthesized(lhs, ctx)?;
        ctx.sql(" ");
        ctx.sql(&op.to_string());
        ctx.sql(" ");
        return render_args_parenthesized(rhs, ctx);
    }
    // Expand to column-wise predicates.
    let rewritten = match op {
        CmpOp::Eq => pairwise_eq(lhs, rhs),
        CmpOp::Ne => b::not(pairwise_eq(lhs, rhs)),
        CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge => lexicographic(op, lhs, rhs),
    };
    ctx.with_position(Position::Predicate, |c| rewritten.render(c))
}

fn pairwise_eq(lhs: &[Expr], rhs: &[Expr]) -> Expr {
    let first = b::eq(lhs[0].clone(), rhs[0].clone());
    lhs[1..]
        .iter()
        .zip(&rhs[1..])
        .map(|(l, r)| b::eq(l.clone(), r.clone()))
        .fold(first, b::and)
}

/// (a1, a2) < (b1, b2) becomes a1 < b1 OR (a1 = b1 AND a2 < b2).
fn lexicographic(op: CmpOp, lhs: &[Expr], rhs: &[Expr]) -> Expr {
    let strict = match op {
        CmpOp::Le => CmpOp::Lt,
        CmpOp::Ge => CmpOp::Gt,
        other => other,
    };
    if lhs.len() == 1 {
        return b::cmp(op, lhs[0].clone(), rhs[0].clone());
    }
    let head = b::cmp(strict, lhs[0].clone(), rhs[0].clone());
    let tie = b::eq(lhs[0].clone(), rhs[0].clone());
    b::or(head, b::and(tie, lexicographic(op, &lhs[1..], &rhs[1..])))
}

fn render_logical(op: LogicalOp, left: &Expr, right: &Expr, ctx: &mut RenderContext) -> Result<()> {
    let operands = flatten_logical(op, left, right);
    let token = op.to_string();
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            ctx.sql(" ");
            ctx.keyword(&token);
            ctx.sql(" ");
        }
        let parens = matches!(operand, Expr::Logical { op: inner, .. } if *inner != op);
        ctx.with_position(Position::Predicate, |c| {
            if parens {
                c.sql("(");
            }
            operand.render(c)?;
            if parens {
                c.sql(")");
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn render_like(
    expr: &Expr,
    pattern: &Expr,
    escape: Option<char>,
    negated: bool,
    ctx: &mut RenderContext,
) -> Result<()> {
    render_value_operand(expr, ctx)?;
    ctx.keyword(if negated { " NOT LIKE " } else { " LIKE " });
    render_value_operand(pattern, ctx)?;
    if let Some(c) = escape {
        ctx.keyword(" ESCAPE ");
        ctx.sql(&format!("'{}'", c));
    }
    Ok(())
}

fn render_in_list(
    expr: &Expr,
    list: &[Expr],
    negated: bool,
    ctx: &mut RenderContext,
) -> Result<()> {
    if list.is_empty() {
        // IN () is invalid everywhere; emit the canonical constant truth.
        ctx.sql(if negated { "1 = 1" } else { "1 = 0" });
        return Ok(());
    }
    render_value_operand(expr, ctx)?;
    ctx.keyword(if negated { " NOT IN " } else { " IN " });
    render_args_parenthesized(list, ctx)
}

fn render_case(
    branches: &[(Expr, Expr)],
    else_value: Option<&Expr>,
    ctx: &mut RenderContext,
) -> Result<()> {
    if branches.is_empty() {
        return Err(SqlError::malformed("CASE requires at least one branch"));
    }
    ctx.keyword("CASE");
    for (when, then) in branches {
        ctx.keyword(" WHEN ");
        ctx.with_position(Position::Predicate, |c| when.render(c))?;
        ctx.keyword(" THEN ");
        render_value_operand(then, ctx)?;
    }
    if let Some(e) = else_value {
        ctx.keyword(" ELSE ");
        render_value_operand(e, ctx)?;
    }
    ctx.keyword(" END");
    Ok(())
}

// ---- functions -------------------------------------------------------------

/// GREATEST/LEAST: native where available, MAX/MIN or MAXVALUE/MINVALUE as
/// name substitutions, pairwise CASE rewriting where the dialect has no
/// variadic form. The pairwise rewrite is O(2^n) in argument count, a
/// deliberate trade for small arities.
fn render_greatest(args: &[Expr], winner: CmpOp, ctx: &mut RenderContext) -> Result<()> {
    let name_pair = if winner == CmpOp::Gt {
        ("GREATEST", "MAX", "MAXVALUE")
    } else {
        ("LEAST", "MIN", "MINVALUE")
    };
    if args.is_empty() {
        return Err(SqlError::malformed(format!(
            "{} requires at least one argument",
            name_pair.0
        )));
    }
    if args.len() == 1 {
        return render_value_operand(&args[0], ctx);
    }
    let dialect = ctx.dialect();
    if EMULATED_GREATEST.contains(dialect) {
        let rewritten = pairwise_extremum(args, winner);
        return render_value_operand(&rewritten, ctx);
    }
    let name = if GREATEST_AS_MAX.contains(dialect) {
        name_pair.1
    } else if GREATEST_AS_MAXVALUE.contains(dialect) {
        name_pair.2
    } else {
        name_pair.0
    };
    ctx.keyword(name);
    render_args_parenthesized(args, ctx)
}

/// CASE WHEN a > b THEN extremum(a, rest) ELSE extremum(b, rest) END.
fn pairwise_extremum(args: &[Expr], winner: CmpOp) -> Expr {
    let (a, b_arg) = (&args[0], &args[1]);
    let rest = &args[2..];
    let (then_branch, else_branch) = if rest.is_empty() {
        (a.clone(), b_arg.clone())
    } else {
        let mut with_a = vec![a.clone()];
        with_a.extend(rest.iter().cloned());
        let mut with_b = vec![b_arg.clone()];
        with_b.extend(rest.iter().cloned());
        if winner == CmpOp::Gt {
            (Expr::Greatest(with_a), Expr::Greatest(with_b))
        } else {
            (Expr::Least(with_a), Expr::Least(with_b))
        }
    };
    b::case_when(
        vec![(b::cmp(winner, a.clone(), b_arg.clone()), then_branch)],
        Some(else_branch),
    )
}

fn render_aggregate(
    func: AggFunc,
    expr: Option<&Expr>,
    distinct: bool,
    filter: Option<&Expr>,
    ctx: &mut RenderContext,
) -> Result<()> {
    if expr.is_none() && func != AggFunc::Count {
        return Err(SqlError::malformed(format!(
            "{} requires an argument expression",
            func
        )));
    }
    ctx.keyword(&func.to_string());
    ctx.sql("(");
    if distinct {
        ctx.keyword("DISTINCT ");
    }
    match filter {
        Some(pred) if NO_FILTER_CLAUSE.contains(ctx.dialect()) => {
            // Push the predicate inside the aggregate: agg(CASE WHEN p
            // THEN x END); COUNT(*) counts CASE WHEN p THEN 1 END. NULLs
            // fall out of the aggregate, matching FILTER semantics.
            let inner = match expr {
                Some(e) => b::case_when(vec![(pred.clone(), e.clone())], None),
                None => b::case_when(vec![(pred.clone(), b::lit(1))], None),
            };
            render_value_operand(&inner, ctx)?;
            ctx.sql(")");
        }
        _ => {
            match expr {
                Some(e) => render_value_operand(e, ctx)?,
                None => ctx.sql("*"),
            }
            ctx.sql(")");
            if let Some(pred) = filter {
                ctx.keyword(" FILTER ");
                ctx.sql("(");
                ctx.keyword("WHERE ");
                ctx.with_position(Position::Predicate, |c| pred.render(c))?;
                ctx.sql(")");
            }
        }
    }
    Ok(())
}

fn render_substring(
    expr: &Expr,
    start: &Expr,
    length: Option<&Expr>,
    ctx: &mut RenderContext,
) -> Result<()> {
    let dialect = ctx.dialect();
    if SUBSTRING_COMMA_SYNTAX.contains(dialect) {
        ctx.keyword("SUBSTRING");
        ctx.sql("(");
        render_value_operand(expr, ctx)?;
        ctx.sql(", ");
        render_value_operand(start, ctx)?;
        match length {
            Some(l) => {
                ctx.sql(", ");
                render_value_operand(l, ctx)?;
            }
            // T-SQL's length argument is mandatory: default to LEN(x).
            None if dialect.family() == DialectFamily::SqlServer => {
                ctx.sql(", ");
                let len = b::func(ctx.syntax().char_length_function(), vec![expr.clone()]);
                render_value_operand(&len, ctx)?;
            }
            None => {}
        }
        ctx.sql(")");
        Ok(())
    } else if SUBSTR_SHORT_NAME.contains(dialect) {
        ctx.keyword("SUBSTR");
        ctx.sql("(");
        render_value_operand(expr, ctx)?;
        ctx.sql(", ");
        render_value_operand(start, ctx)?;
        if let Some(l) = length {
            ctx.sql(", ");
            render_value_operand(l, ctx)?;
        }
        ctx.sql(")");
        Ok(())
    } else {
        ctx.keyword("SUBSTRING");
        ctx.sql("(");
        render_value_operand(expr, ctx)?;
        ctx.keyword(" FROM ");
        render_value_operand(start, ctx)?;
        if let Some(l) = length {
            ctx.keyword(" FOR ");
            render_value_operand(l, ctx)?;
        }
        ctx.sql(")");
        Ok(())
    }
}

fn render_overlay(
    expr: &Expr,
    placing: &Expr,
    start: &Expr,
    length: Option<&Expr>,
    ctx: &mut RenderContext,
) -> Result<()> {
    let dialect = ctx.dialect();
    if OVERLAY_AS_INSERT.contains(dialect) {
        // INSERT(x, s, l, y); the replaced length defaults to the length
        // of the replacement, matching OVERLAY.
        let len = match length {
            Some(l) => l.clone(),
            None => b::func(ctx.syntax().char_length_function(), vec![placing.clone()]),
        };
        ctx.keyword("INSERT");
        ctx.sql("(");
        render_value_operand(expr, ctx)?;
        ctx.sql(", ");
        render_value_operand(start, ctx)?;
        ctx.sql(", ");
        render_value_operand(&len, ctx)?;
        ctx.sql(", ");
        render_value_operand(placing, ctx)?;
        ctx.sql(")");
        Ok(())
    } else if NO_OVERLAY.contains(dialect) {
        // substr(x, 1, s - 1) || y || substr(x, s + l): composed from
        // nodes that re-dispatch per dialect themselves.
        let len = match length {
            Some(l) => l.clone(),
            None => b::func(ctx.syntax().char_length_function(), vec![placing.clone()]),
        };
        let prefix = b::substring(
            expr.clone(),
            b::lit(1),
            Some(b::binary(BinaryOp::Sub, start.clone(), b::lit(1))),
        );
        let suffix = b::substring(expr.clone(), b::add(start.clone(), len), None);
        let rewritten = b::concat(b::concat(prefix, placing.clone()), suffix);
        rewritten.render(ctx)
    } else {
        ctx.keyword("OVERLAY");
        ctx.sql("(");
        render_value_operand(expr, ctx)?;
        ctx.keyword(" PLACING ");
        render_value_operand(placing, ctx)?;
        ctx.keyword(" FROM ");
        render_value_operand(start, ctx)?;
        if let Some(l) = length {
            ctx.keyword(" FOR ");
            render_value_operand(l, ctx)?;
        }
        ctx.sql(")");
        Ok(())
    }
}

fn interval_unit(unit: DateUnit) -> &'static str {
    match unit {
        DateUnit::Day => "day",
        DateUnit::Month => "month",
        DateUnit::Year => "year",
    }
}

fn sqlite_modifier_unit(unit: DateUnit) -> &'static str {
    match unit {
        DateUnit::Day => "days",
        DateUnit::Month => "months",
        DateUnit::Year => "years",
    }
}

fn render_date_add(
    date: &Expr,
    amount: &Expr,
    unit: DateUnit,
    ctx: &mut RenderContext,
) -> Result<()> {
    match ctx.dialect().family() {
        DialectFamily::Postgres | DialectFamily::DuckDb => {
            // (d + INTERVAL '3 day'): the amount lives inside a string
            // literal, so it is force-inlined for this sub-render.
            ctx.sql("(");
            render_value_operand(date, ctx)?;
            ctx.sql(" + ");
            ctx.keyword("INTERVAL ");
            ctx.sql("'");
            ctx.with_param_mode(ParamMode::Inline, |c| render_value_operand(amount, c))?;
            ctx.sql(" ");
            ctx.sql(interval_unit(unit));
            ctx.sql("')");
            Ok(())
        }
        DialectFamily::MySql => {
            ctx.keyword("DATE_ADD");
            ctx.sql("(");
            render_value_operand(date, ctx)?;
            ctx.sql(", ");
            ctx.keyword("INTERVAL ");
            render_value_operand(amount, ctx)?;
            ctx.sql(" ");
            ctx.keyword(unit.keyword());
            ctx.sql(")");
            Ok(())
        }
        DialectFamily::BigQuery => {
            // BigQuery intervals take literal amounts only.
            ctx.keyword("DATE_ADD");
            ctx.sql("(");
            render_value_operand(date, ctx)?;
            ctx.sql(", ");
            ctx.keyword("INTERVAL ");
            ctx.with_param_mode(ParamMode::Inline, |c| render_value_operand(amount, c))?;
            ctx.sql(" ");
            ctx.keyword(unit.keyword());
            ctx.sql(")");
            Ok(())
        }
        DialectFamily::SqlServer | DialectFamily::Snowflake | DialectFamily::H2 => {
            ctx.keyword("DATEADD");
            ctx.sql("(");
            ctx.keyword(unit.keyword());
            ctx.sql(", ");
            render_value_operand(amount, ctx)?;
            ctx.sql(", ");
            render_value_operand(date, ctx)?;
            ctx.sql(")");
            Ok(())
        }
        DialectFamily::Trino => {
            ctx.keyword("DATE_ADD");
            ctx.sql("(");
            ctx.sql(&format!("'{}'", interval_unit(unit)));
            ctx.sql(", ");
            render_value_operand(amount, ctx)?;
            ctx.sql(", ");
            render_value_operand(date, ctx)?;
            ctx.sql(")");
            Ok(())
        }
        DialectFamily::Sqlite => render_sqlite_date_add(date, amount, unit, ctx),
        DialectFamily::Oracle => render_oracle_date_add(date, amount, unit, ctx),
        DialectFamily::Firebird => {
            // DATEADD(unit, amount, date), same shape as T-SQL.
            ctx.keyword("DATEADD");
            ctx.sql("(");
            ctx.keyword(unit.keyword());
            ctx.sql(", ");
            render_value_operand(amount, ctx)?;
            ctx.sql(", ");
            render_value_operand(date, ctx)?;
            ctx.sql(")");
            Ok(())
        }
    }
}

/// DATETIME(d, '+3 days'), composing the modifier string when the amount
/// is not a plain integer literal.
fn render_sqlite_date_add(
    date: &Expr,
    amount: &Expr,
    unit: DateUnit,
    ctx: &mut RenderContext,
) -> Result<()> {
    ctx.keyword("DATETIME");
    ctx.sql("(");
    render_value_operand(date, ctx)?;
    ctx.sql(", ");
    match amount {
        Expr::Value(Value::Int(n)) => {
            let sign = if *n >= 0 { "+" } else { "" };
            ctx.sql(&format!("'{}{} {}'", sign, n, sqlite_modifier_unit(unit)));
        }
        other => {
            ctx.sql("'+' || ");
            ctx.with_param_mode(ParamMode::Inline, |c| render_value_operand(other, c))?;
            ctx.sql(&format!(" || ' {}'", sqlite_modifier_unit(unit)));
        }
    }
    ctx.sql(")");
    Ok(())
}

/// Day addition is plain +; months go through ADD_MONTHS, years through
/// ADD_MONTHS with the amount scaled by 12.
fn render_oracle_date_add(
    date: &Expr,
    amount: &Expr,
    unit: DateUnit,
    ctx: &mut RenderContext,
) -> Result<()> {
    match unit {
        DateUnit::Day => {
            ctx.sql("(");
            render_value_operand(date, ctx)?;
            ctx.sql(" + ");
            render_value_operand(amount, ctx)?;
            ctx.sql(")");
            Ok(())
        }
        DateUnit::Month | DateUnit::Year => {
            ctx.keyword("ADD_MONTHS");
            ctx.sql("(");
            render_value_operand(date, ctx)?;
            ctx.sql(", ");
            if unit == DateUnit::Year {
                // Years scale through the month form.
                render_operand(amount, BinaryOp::Mul, ctx)?;
                ctx.sql(" * 12");
            } else {
                render_value_operand(amount, ctx)?;
            }
            ctx.sql(")");
            Ok(())
        }
    }
}
