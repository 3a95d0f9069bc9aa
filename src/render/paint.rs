//! Row background painting: palette rotation, colour overrides, hover.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Per-row colour override: `(rows, index) -> Some(colour)` to replace the palette colour.
pub type RowColorFn = Rc<dyn Fn(&[Value], usize) -> Option<String>>;

/// Decides the background of each data row.
///
/// The palette assignment is fixed (`palette[i mod k]`); overrides are layered
/// on top at paint time and never change it.
#[derive(Clone, Default)]
pub struct RowPainter {
    palette: Vec<String>,
    mouse_over: Option<String>,
    override_fn: Option<RowColorFn>,
}

impl RowPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the palette. An empty palette leaves rows unpainted.
    pub fn set_palette(&mut self, palette: Vec<String>) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn set_mouse_over(&mut self, color: Option<String>) {
        self.mouse_over = color;
    }

    pub fn mouse_over(&self) -> Option<&str> {
        self.mouse_over.as_deref()
    }

    pub fn set_override(&mut self, f: Option<RowColorFn>) {
        self.override_fn = f;
    }

    /// The palette colour assigned to row `index`.
    pub fn palette_color(&self, index: usize) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        Some(self.palette[index % self.palette.len()].as_str())
    }

    /// Background of a row at rest: override first, then palette.
    pub fn base_color(&self, rows: &[Value], index: usize) -> Option<String> {
        self.override_fn
            .as_ref()
            .and_then(|f| f(rows, index))
            .or_else(|| self.palette_color(index).map(str::to_owned))
    }

    /// Background of a row under the pointer.
    pub fn hover_color(&self, rows: &[Value], index: usize) -> Option<String> {
        self.mouse_over
            .clone()
            .or_else(|| self.base_color(rows, index))
    }
}

impl fmt::Debug for RowPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowPainter")
            .field("palette", &self.palette)
            .field("mouse_over", &self.mouse_over)
            .field("override_fn", &self.override_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
