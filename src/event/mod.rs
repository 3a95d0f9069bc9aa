//! Host events: what the surrounding environment reports to a grid.

pub mod input;

pub use input::{DomEvent, EventKind};
