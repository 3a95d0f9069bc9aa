//! Rendering: template instantiation per row and row painting.

pub mod paint;
pub mod row;

pub use paint::{RowColorFn, RowPainter};
pub use row::{RenderError, RowRenderer, MODEL_ATTR, MODEL_SRC_ATTR, MODEL_STYLE_ATTR};
