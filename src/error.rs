//! Crate-level error type.

use crate::render::RenderError;
use crate::sync::SyncError;
use crate::template::TemplateError;

/// Errors surfaced by [`Grid`](crate::grid::Grid) operations.
///
/// Missing data never appears here: absent properties and unknown functions
/// render as empty text, and unbound or missing elements are skipped.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("adopting host markup requires a grid id")]
    MissingGridId,
    #[error("no element with id `{0}` to adopt as a grid")]
    GridNotFound(String),
    #[error("row {index} is not visible on the current page")]
    RowNotVisible { index: usize },
    #[error("invalid grid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
