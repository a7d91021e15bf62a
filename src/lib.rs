pub mod ast;
pub mod dialect;
pub mod error;
pub mod fold;
pub mod render;
pub mod syntax;
pub mod visit;

pub use dialect::Dialect;
pub use render::{Render, RenderConfig, RenderContext};

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::dialect::{CapabilitySet, Dialect, DialectFamily};
    pub use crate::error::SqlError;
    pub use crate::render::{ParamMode, Render, RenderConfig, RenderContext};
    pub use crate::visit::AstNode;
}
