//! Per-dialect spelling: quoting, placeholders, literals, limits, and a
//! whole-catalog sweep over every supported dialect.

use super::{inline, sql};
use crate::ast::build::*;
use crate::ast::operators::{BinaryOp, CmpOp, DateUnit, SortOrder};
use crate::ast::stmt::{OrderTerm, Select, TableRef};
use crate::dialect::Dialect;
use crate::render::{ParamMode, Render, RenderConfig};
use pretty_assertions::assert_eq;

/// One of everything the expression catalog offers, valid on all dialects.
fn catalog_select() -> Select {
    let inner = Select {
        columns: vec![count_star()],
        from: Some(TableRef::new("orders")),
        ..Select::default()
    };
    Select {
        distinct: false,
        columns: vec![
            alias(col("id"), "key"),
            qcol("u", "name"),
            case_when(
                vec![(gt(col("age"), lit(21)), lit("adult"))],
                Some(lit("minor")),
            ),
            cast(col("age"), "BIGINT"),
            coalesce(vec![col("nick"), col("name")]),
            greatest(vec![col("a"), col("b"), col("c")]),
            least(vec![col("a"), col("b")]),
            substring(col("name"), lit(1), Some(lit(3))),
            overlay(col("name"), lit("xx"), lit(2), Some(lit(2))),
            date_add(col("created"), lit(7), DateUnit::Day),
            filtered(sum(col("amount")), gt(col("amount"), lit(0))),
            binary(BinaryOp::BitXor, col("flags"), lit(5)),
            binary(BinaryOp::Shl, col("mask"), lit(2)),
            binary(BinaryOp::Rem, col("n"), lit(7)),
            concat(concat(col("first"), lit(" ")), col("last")),
            alias(subquery(inner), "order_count"),
        ],
        from: Some(TableRef::aliased("users", "u")),
        where_clause: Some(and(
            and(
                or(
                    eq(col("status"), lit("active")),
                    contains(col("name"), "o_o"),
                ),
                and(
                    in_list(col("role"), vec![lit("admin"), lit("editor")]),
                    between(col("age"), lit(18), lit(65)),
                ),
            ),
            and(
                cmp(
                    CmpOp::Lt,
                    row(vec![col("birth_year"), col("birth_month")]),
                    row(vec![lit(2006), lit(6)]),
                ),
                and(is_not_null(col("email")), not(eq(col("banned"), lit(true)))),
            ),
        )),
        group_by: vec![col("id"), qcol("u", "name")],
        order_by: vec![
            OrderTerm {
                expr: col("id"),
                order: SortOrder::Asc,
            },
            OrderTerm {
                expr: col("name"),
                order: SortOrder::DescNullsLast,
            },
        ],
        limit: Some(50),
        offset: Some(10),
    }
}

#[test]
fn every_dialect_renders_the_full_catalog() {
    let stmt = catalog_select();
    for dialect in Dialect::ALL {
        let (text, params) = stmt
            .to_sql(dialect)
            .unwrap_or_else(|e| panic!("{dialect:?}: {e}"));
        assert!(!text.is_empty(), "{dialect:?} produced empty SQL");
        assert!(!params.is_empty(), "{dialect:?} collected no binds");

        let config = RenderConfig {
            param_mode: ParamMode::Inline,
            ..RenderConfig::default()
        };
        let (text, params) = stmt
            .to_sql_with(dialect, config)
            .unwrap_or_else(|e| panic!("{dialect:?} inline: {e}"));
        assert!(!text.is_empty());
        assert!(params.is_empty(), "{dialect:?} bound params in inline mode");
    }
}

#[test]
fn identifier_quoting_styles() {
    let e = col("from");
    assert_eq!(sql(&e, Dialect::Postgres), r#""from""#);
    assert_eq!(sql(&e, Dialect::MySql), "`from`");
    assert_eq!(sql(&e, Dialect::BigQuery), "`from`");
    assert_eq!(sql(&e, Dialect::SqlServer), "[from]");

    let tricky = col(r#"we"ird"#);
    assert_eq!(sql(&tricky, Dialect::Postgres), r#""we""ird""#);
}

#[test]
fn placeholder_styles() {
    let e = eq(col("a"), lit(1));
    assert_eq!(sql(&e, Dialect::Postgres), r#""a" = $1"#);
    assert_eq!(sql(&e, Dialect::DuckDb), r#""a" = $1"#);
    assert_eq!(sql(&e, Dialect::MySql), "`a` = ?");
    assert_eq!(sql(&e, Dialect::SqlServer), "[a] = @p1");
    assert_eq!(sql(&e, Dialect::Oracle), r#""a" = :1"#);
}

#[test]
fn bool_literal_styles() {
    assert_eq!(inline(&lit(true), Dialect::Postgres), "TRUE");
    assert_eq!(inline(&lit(true), Dialect::MySql), "1");
    assert_eq!(inline(&lit(false), Dialect::Oracle), "0");
}

#[test]
fn date_literal_styles() {
    let d = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(inline(&lit(d), Dialect::Postgres), "DATE '2024-01-15'");
    assert_eq!(inline(&lit(d), Dialect::Sqlite), "'2024-01-15'");
    assert_eq!(inline(&lit(d), Dialect::SqlServer), "'2024-01-15'");
}

#[test]
fn limit_offset_spellings() {
    let mut stmt = Select::from_table("t");
    stmt.limit = Some(10);
    stmt.offset = Some(5);
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT * FROM "t" LIMIT 10 OFFSET 5"#
    );
    assert_eq!(
        sql(&stmt, Dialect::SqlServer),
        "SELECT * FROM [t] OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"
    );
    assert_eq!(
        sql(&stmt, Dialect::Firebird),
        r#"SELECT * FROM "t" OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY"#
    );

    // Limit without offset still needs the OFFSET anchor on Oracle.
    stmt.offset = None;
    assert_eq!(
        sql(&stmt, Dialect::Oracle),
        r#"SELECT * FROM "t" OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"#
    );
}

#[test]
fn nulls_ordering_native_and_emulated() {
    let stmt = Select {
        columns: vec![col("x")],
        from: Some(TableRef::new("t")),
        order_by: vec![OrderTerm {
            expr: col("x"),
            order: SortOrder::AscNullsLast,
        }],
        ..Select::default()
    };
    assert_eq!(
        sql(&stmt, Dialect::Postgres),
        r#"SELECT "x" FROM "t" ORDER BY "x" ASC NULLS LAST"#
    );
    // No NULLS LAST on MySQL: a CASE sort key takes its place.
    assert_eq!(
        sql(&stmt, Dialect::MySql),
        "SELECT `x` FROM `t` ORDER BY CASE WHEN `x` IS NULL THEN 1 ELSE 0 END, `x` ASC"
    );
    assert_eq!(
        sql(&stmt, Dialect::Sqlite),
        r#"SELECT "x" FROM "t" ORDER BY "x" ASC NULLS LAST"#
    );
}

#[test]
fn predicates_in_value_position_get_case_wrappers() {
    let stmt = Select {
        columns: vec![alias(gt(col("age"), lit(18)), "is_adult")],
        from: Some(TableRef::new("users")),
        ..Select::default()
    };
    assert_eq!(
        inline(&stmt, Dialect::Postgres),
        r#"SELECT "age" > 18 AS "is_adult" FROM "users""#
    );
    assert_eq!(
        inline(&stmt, Dialect::Oracle),
        r#"SELECT CASE WHEN "age" > 18 THEN 1 ELSE 0 END AS "is_adult" FROM "users""#
    );
    assert_eq!(
        inline(&stmt, Dialect::SqlServer),
        "SELECT CASE WHEN [age] > 18 THEN 1 ELSE 0 END AS [is_adult] FROM [users]"
    );
}

#[test]
fn predicates_in_predicate_position_stay_native() {
    let stmt = Select {
        columns: vec![col("id")],
        from: Some(TableRef::new("users")),
        where_clause: Some(gt(col("age"), lit(18))),
        ..Select::default()
    };
    assert_eq!(
        inline(&stmt, Dialect::Oracle),
        r#"SELECT "id" FROM "users" WHERE "age" > 18"#
    );
}

#[test]
fn standalone_predicates_render_bare_everywhere() {
    // A predicate rendered on its own is a condition, not a value, so no
    // CASE wrapper even on dialects without a boolean type.
    let e = eq(col("a"), lit(1));
    assert_eq!(sql(&e, Dialect::SqlServer), "[a] = @p1");
    assert_eq!(sql(&e, Dialect::Oracle), r#""a" = :1"#);
    // In value position the same node still gets the wrapper.
    let projected = Select {
        columns: vec![e],
        from: Some(TableRef::new("t")),
        ..Select::default()
    };
    assert_eq!(
        inline(&projected, Dialect::SqlServer),
        "SELECT CASE WHEN [a] = 1 THEN 1 ELSE 0 END FROM [t]"
    );
}

#[test]
fn bind_markers_number_per_dialect_convention() {
    let e = and(eq(col("a"), lit(1)), eq(col("b"), lit(2)));
    assert_eq!(sql(&e, Dialect::Postgres), r#""a" = $1 AND "b" = $2"#);
    assert_eq!(sql(&e, Dialect::Oracle), r#""a" = :1 AND "b" = :2"#);
    assert_eq!(sql(&e, Dialect::SqlServer), "[a] = @p1 AND [b] = @p2");
    assert_eq!(sql(&e, Dialect::MySql), "`a` = ? AND `b` = ?");
}
