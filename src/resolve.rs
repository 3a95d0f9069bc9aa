//! Token resolution against a row or the grid's function table.
//!
//! Resolution never fails: an absent property or an unregistered function
//! yields `None`, which renders as empty text. Only the lexer can reject a
//! template (see [`crate::template::TemplateError`]).

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::template::lexer::{scan, Segment};
use crate::template::{Expr, TemplateError};

/// A computed cell value: receives the whole row collection and the row index.
///
/// In header and footer sections the index is `rows.len()`, one past the last
/// row. Index with `rows.get(i)` rather than `rows[i]` when a function can
/// appear there. Functions may be impure; results are never cached.
pub type CustomFunction = Rc<dyn Fn(&[Value], usize) -> Value>;

// ---------------------------------------------------------------------------
// FunctionTable
// ---------------------------------------------------------------------------

/// Named computations callable as `{{name()}}`.
#[derive(Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<String, CustomFunction>,
}

impl FunctionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. A repeated name replaces the earlier function.
    ///
    /// See [`CustomFunction`] for the index passed from header and footer.
    pub fn insert(&mut self, name: impl Into<String>, f: impl Fn(&[Value], usize) -> Value + 'static) {
        self.functions.insert(name.into(), Rc::new(f));
    }

    /// Look up a function by name.
    pub fn get(&self, name: &str) -> Option<&CustomFunction> {
        self.functions.get(name)
    }

    /// Whether a function with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionTable").field("functions", &names).finish()
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Everything a token may read: the collection, the row index and the function table.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub rows: &'a [Value],
    pub row_index: usize,
    pub functions: &'a FunctionTable,
}

impl<'a> Scope<'a> {
    pub fn new(rows: &'a [Value], row_index: usize, functions: &'a FunctionTable) -> Self {
        Self {
            rows,
            row_index,
            functions,
        }
    }

    /// The row being rendered, if the index is in range.
    pub fn row(&self) -> Option<&'a Value> {
        self.rows.get(self.row_index)
    }

    /// Resolve a raw token body.
    pub fn resolve(&self, raw: &str) -> Option<Value> {
        self.resolve_expr(&Expr::parse(raw))
    }

    /// Resolve a parsed expression.
    pub fn resolve_expr(&self, expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Function(name) => {
                let f = self.functions.get(name)?;
                match f(self.rows, self.row_index) {
                    Value::Null => None,
                    value => Some(value),
                }
            }
            Expr::Path(path) => path.lookup(self.row()?).cloned(),
        }
    }

    /// Replace every token in `input` with its display text.
    ///
    /// # Errors
    ///
    /// [`TemplateError::Unterminated`] for a `{{` without a closing `}}`.
    pub fn interpolate(&self, input: &str) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(input.len());
        for segment in scan(input)? {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Token(token) => {
                    if let Some(value) = self.resolve(&token.expr) {
                        out.push_str(&display_text(&value));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Resolve a presentation value (`model-src`, `model-style`).
    ///
    /// A value consisting of exactly one token yields the raw resolved value;
    /// anything else is interpolated as text.
    pub fn resolve_raw(&self, input: &str) -> Result<Option<Value>, TemplateError> {
        let segments = scan(input)?;
        if let [Segment::Token(token)] = segments.as_slice() {
            return Ok(self.resolve(&token.expr));
        }
        self.interpolate(input).map(|s| Some(Value::String(s)))
    }
}

/// Textual representation of a resolved value.
///
/// Strings are verbatim, null is empty, everything else is compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Truthiness used for boolean controls.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
