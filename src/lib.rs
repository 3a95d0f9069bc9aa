//! # gridbind
//!
//! A data-bound grid: row templates with `{{path}}` and `{{func()}}` tokens,
//! client-side pagination and two-way binding between form controls and the
//! rows they were rendered from.
//!
//! The grid renders into a slotmap-backed element arena ([`dom`]) that stands
//! in for the host document. The host updates control state in the arena and
//! reports events; the grid commits edits to its row collection and tracks
//! which rows changed.
//!
//! ## Core Systems
//!
//! - **[`template`]**: Token lexer, expressions, header/data/footer sections
//! - **[`path`]**: Dot-separated property paths over JSON records
//! - **[`resolve`]**: Token resolution against a row and custom functions
//! - **[`render`]**: Row template instantiation and row painting
//! - **[`binding`]**: Registry of bound controls from the latest render
//! - **[`sync`]**: Input kinds, listeners, edit commits, pending changes
//! - **[`pagination`]**: Page count, visible window, clamping
//! - **[`grid`]**: Configuration, hooks, pager and the [`Grid`] controller
//! - **[`event`]**: Host events routed to a grid
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod dom;
pub mod error;
pub mod path;

// Templates and rendering
pub mod render;
pub mod resolve;
pub mod template;

// Binding and sync
pub mod binding;
pub mod event;
pub mod sync;

// Grid
pub mod grid;
pub mod pagination;

// Test tooling
pub mod testing;

pub use error::GridError;
pub use grid::{Grid, GridConfig, GridOptions};
