//! Context behavior: parameter modes, scoped state, clause assembly,
//! flattening and the paren policy.

use super::{binds, inline, sql};
use crate::ast::build::*;
use crate::ast::operators::{BinaryOp, CmpOp, SortOrder};
use crate::ast::stmt::{OrderTerm, Select, TableRef};
use crate::ast::values::Value;
use crate::dialect::Dialect;
use crate::error::SqlError;
use crate::render::{
    KeywordCase, ParamMode, Position, Render, RenderConfig, RenderContext, ScopeKey, ScopeValue,
};
use pretty_assertions::assert_eq;

#[test]
fn placeholder_mode_collects_binds_in_emission_order() {
    let e = and(
        eq(col("a"), lit(1)),
        between(col("b"), lit(2), lit(3)),
    );
    assert_eq!(sql(&e, Dialect::Postgres), r#""a" = $1 AND "b" BETWEEN $2 AND $3"#);
    assert_eq!(
        binds(&e, Dialect::Postgres),
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn inline_mode_embeds_escaped_literals() {
    let e = eq(col("name"), lit("o'brien"));
    assert_eq!(inline(&e, Dialect::Postgres), r#""name" = 'o''brien'"#);
    assert!(binds(&e, Dialect::Postgres).len() == 1);

    let (text, params) = e
        .to_sql_with(
            Dialect::Postgres,
            RenderConfig {
                param_mode: ParamMode::Inline,
                ..RenderConfig::default()
            },
        )
        .unwrap();
    assert_eq!(text, r#""name" = 'o''brien'"#);
    assert!(params.is_empty());
}

#[test]
fn null_never_becomes_a_placeholder() {
    let e = eq(col("x"), null());
    assert_eq!(sql(&e, Dialect::Postgres), r#""x" = NULL"#);
    assert!(binds(&e, Dialect::Postgres).is_empty());
}

#[test]
fn select_assembles_all_clauses() {
    let stmt = Select {
        columns: vec![col("id"), alias(col("name"), "n")],
        from: Some(TableRef::new("users")),
        where_clause: Some(gt(col("age"), lit(18))),
        order_by: vec![OrderTerm {
            expr: col("id"),
            order: SortOrder::Asc,
        }],
        limit: Some(10),
        offset: Some(5),
        ..Select::default()
    };
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT "id", "name" AS "n" FROM "users" WHERE "age" > $1 ORDER BY "id" ASC LIMIT 10 OFFSET 5"#
    );
    assert_eq!(binds(&stmt, Dialect::Postgres), vec![Value::Int(18)]);
}

#[test]
fn empty_projection_renders_star() {
    let stmt = Select::from_table("t");
    assert_eq!(sql(&stmt, Dialect::Postgres), r#"SELECT * FROM "t""#);
}

#[test]
fn distinct_and_group_by() {
    let stmt = Select {
        distinct: true,
        columns: vec![col("dept"), count_star()],
        from: Some(TableRef::new("emp")),
        group_by: vec![col("dept")],
        ..Select::default()
    };
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT DISTINCT "dept", COUNT(*) FROM "emp" GROUP BY "dept""#
    );
}

#[test]
fn table_alias_declared_without_as_keyword() {
    let stmt = Select {
        columns: vec![qcol("u", "id")],
        from: Some(TableRef::aliased("users", "u")),
        ..Select::default()
    };
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT "u"."id" FROM "users" "u""#
    );
}

#[test]
fn alias_outside_projection_is_a_reference() {
    let stmt = Select {
        columns: vec![alias(sum(col("amount")), "total")],
        from: Some(TableRef::new("orders")),
        order_by: vec![OrderTerm {
            expr: alias(sum(col("amount")), "total"),
            order: SortOrder::Desc,
        }],
        ..Select::default()
    };
    // Declared once in the projection, referenced by name in ORDER BY.
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT SUM("amount") AS "total" FROM "orders" ORDER BY "total" DESC"#
    );
}

#[test]
fn keyword_case_lower() {
    let stmt = Select {
        columns: vec![col("id")],
        from: Some(TableRef::new("users")),
        where_clause: Some(is_null(col("deleted"))),
        limit: Some(10),
        ..Select::default()
    };
    let config = RenderConfig {
        keyword_case: KeywordCase::Lower,
        param_mode: ParamMode::Inline,
        ..RenderConfig::default()
    };
    let (text, _) = stmt.to_sql_with(Dialect::Postgres, config).unwrap();
    assert_eq!(
        text,
        r#"select "id" from "users" where "deleted" is null limit 10"#
    );
}

#[test]
fn pretty_printing_splits_clauses() {
    let stmt = Select {
        columns: vec![col("id")],
        from: Some(TableRef::new("users")),
        where_clause: Some(gt(col("age"), lit(18))),
        limit: Some(10),
        ..Select::default()
    };
    let config = RenderConfig {
        pretty: true,
        param_mode: ParamMode::Inline,
        ..RenderConfig::default()
    };
    let (text, _) = stmt.to_sql_with(Dialect::Postgres, config).unwrap();
    assert_eq!(
        text,
        "SELECT \"id\"\nFROM \"users\"\nWHERE \"age\" > 18\nLIMIT 10"
    );
}

#[test]
fn pretty_printing_indents_subqueries() {
    let inner = Select {
        columns: vec![count_star()],
        from: Some(TableRef::new("orders")),
        ..Select::default()
    };
    let stmt = Select {
        columns: vec![alias(subquery(inner), "cnt")],
        from: Some(TableRef::new("users")),
        ..Select::default()
    };
    let config = RenderConfig {
        pretty: true,
        ..RenderConfig::default()
    };
    let (text, _) = stmt.to_sql_with(Dialect::Postgres, config).unwrap();
    assert_eq!(
        text,
        "SELECT (SELECT COUNT(*)\n  FROM \"orders\") AS \"cnt\"\nFROM \"users\""
    );
}

#[test]
fn associative_chains_render_independent_of_nesting() {
    let left_nested = add(add(col("a"), col("b")), col("c"));
    let right_nested = add(col("a"), add(col("b"), col("c")));
    let flat = r#""a" + "b" + "c""#;
    assert_eq!(sql(&left_nested, Dialect::Postgres), flat);
    assert_eq!(sql(&right_nested, Dialect::Postgres), flat);
}

#[test]
fn mixed_operator_compounds_are_parenthesized() {
    let e = add(col("a"), binary(BinaryOp::Mul, col("b"), col("c")));
    assert_eq!(sql(&e, Dialect::Postgres), r#""a" + ("b" * "c")"#);
}

#[test]
fn logical_chains_flatten_with_minimal_parens() {
    let p = eq(col("p"), lit(1));
    let q = eq(col("q"), lit(2));
    let r = eq(col("r"), lit(3));
    let chain = and(and(p.clone(), q.clone()), r.clone());
    assert_eq!(
        inline(&chain, Dialect::Postgres),
        r#""p" = 1 AND "q" = 2 AND "r" = 3"#
    );
    let mixed = and(or(p, q), r);
    assert_eq!(
        inline(&mixed, Dialect::Postgres),
        r#"("p" = 1 OR "q" = 2) AND "r" = 3"#
    );
}

#[test]
fn like_builders_escape_metacharacters() {
    assert_eq!(escape_like_text("50%_off!"), "50!%!_off!!");
    let e = contains(col("name"), "50%_off");
    assert_eq!(
        inline(&e, Dialect::Postgres),
        r#""name" LIKE '%50!%!_off%' ESCAPE '!'"#
    );
}

#[test]
fn empty_in_list_renders_constant_truth() {
    let e = in_list(col("id"), vec![]);
    assert_eq!(sql(&e, Dialect::Postgres), "1 = 0");

    let negated = crate::ast::expr::Expr::InList {
        expr: Box::new(col("id")),
        list: vec![],
        negated: true,
    };
    assert_eq!(sql(&negated, Dialect::Postgres), "1 = 1");
}

#[test]
fn not_parenthesizes_its_operand() {
    let e = not(and(eq(col("a"), lit(1)), eq(col("b"), lit(2))));
    assert_eq!(inline(&e, Dialect::Postgres), r#"NOT ("a" = 1 AND "b" = 2)"#);
}

#[test]
fn zero_arity_extremum_is_rejected() {
    let err = greatest(vec![]).to_sql(Dialect::Postgres).unwrap_err();
    assert!(matches!(err, SqlError::MalformedArgument(_)));
}

#[test]
fn aggregate_without_argument_is_rejected() {
    let e = crate::ast::expr::Expr::Aggregate {
        func: crate::ast::operators::AggFunc::Sum,
        expr: None,
        distinct: false,
        filter: None,
    };
    let err = e.to_sql(Dialect::Postgres).unwrap_err();
    assert!(matches!(err, SqlError::MalformedArgument(_)));
}

#[test]
fn row_against_scalar_is_rejected() {
    let e = cmp(CmpOp::Eq, row(vec![col("a"), col("b")]), lit(1));
    let err = e.to_sql(Dialect::Postgres).unwrap_err();
    assert!(matches!(err, SqlError::MalformedArgument(_)));
}

#[test]
fn scoped_state_survives_failed_sub_renders() {
    let mut ctx = RenderContext::new(Dialect::Postgres);
    let failing = greatest(vec![]);
    let result = ctx.with_position(Position::Predicate, |c| failing.render(c));
    assert!(result.is_err());
    // The scope entry is popped even though the body failed.
    assert_eq!(ctx.position(), Position::Value);
    assert_eq!(ctx.lookup(ScopeKey::Position), None);

    let result: crate::error::Result<()> = ctx.with_param_mode(ParamMode::Inline, |_| {
        Err(SqlError::malformed("boom"))
    });
    assert!(result.is_err());
    assert_eq!(ctx.param_mode(), ParamMode::Placeholder);
}

#[test]
fn inner_scopes_shadow_outer_ones() {
    let mut ctx = RenderContext::new(Dialect::Postgres);
    ctx.with_position(Position::Predicate, |c| {
        assert_eq!(c.position(), Position::Predicate);
        c.with_position(Position::Value, |c| {
            assert_eq!(c.position(), Position::Value);
            Ok(())
        })?;
        assert_eq!(c.position(), Position::Predicate);
        assert_eq!(
            c.lookup(ScopeKey::Position),
            Some(ScopeValue::Position(Position::Predicate))
        );
        Ok(())
    })
    .unwrap();
}
