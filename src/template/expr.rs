//! Token expressions: path tokens and function tokens.

use crate::path::PropertyPath;

/// Suffix marking a function token.
const CALL_SUFFIX: &str = "()";

/// The parsed body of a `{{...}}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `{{a.b.c}}`: a property path into the row.
    Path(PropertyPath),
    /// `{{name()}}`: a call into the grid's function table.
    Function(String),
}

impl Expr {
    /// Classify a raw token body. Never fails; an expression that is neither a
    /// valid call nor a sensible path simply resolves to nothing later.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_suffix(CALL_SUFFIX) {
            Some(name) => Expr::Function(name.trim().to_owned()),
            None => Expr::Path(PropertyPath::parse(raw)),
        }
    }

    /// The path, for path tokens.
    pub fn as_path(&self) -> Option<&PropertyPath> {
        match self {
            Expr::Path(path) => Some(path),
            Expr::Function(_) => None,
        }
    }
}
