pub mod build;
pub mod expr;
pub mod operators;
pub mod stmt;
pub mod values;

pub use self::expr::Expr;
pub use self::operators::{AggFunc, BinaryOp, CmpOp, DateUnit, LogicalOp, SortOrder};
pub use self::stmt::{OrderTerm, Select, TableRef};
pub use self::values::Value;
