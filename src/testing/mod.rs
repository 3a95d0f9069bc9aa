//! Headless testing helpers: GridPilot, snapshot helpers.
//!
//! Use the [`GridPilot`] to drive a [`Grid`](crate::grid::Grid) the way a user
//! would. Use [`grid_to_lines`] and related helpers to capture rendered markup
//! for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::GridPilot;
pub use snapshot::{grid_to_lines, grid_to_markup, row_texts};
