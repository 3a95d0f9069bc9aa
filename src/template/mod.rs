//! Template language: `{{path}}` and `{{func()}}` tokens inside section templates.

pub mod expr;
pub mod lexer;
pub mod section;

pub use expr::Expr;
pub use lexer::{scan, Segment, TokenSpan};
pub use section::{GridTemplates, SectionKind, Template, TemplateNode, ROW_TAG};

/// Structural template errors. These are authoring mistakes, not missing data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unterminated token at byte {position} in {source_text:?}")]
    Unterminated { position: usize, source_text: String },
    #[error("template has no <{0}> section")]
    MissingSection(&'static str),
}
