//! Element arena: slotmap-backed markup tree with id/tag queries.
//!
//! This is the headless stand-in for the host document. Templates are read
//! from it, rendered rows are written into it, and the host mutates control
//! state (`value`, `checked`) on it before dispatching events to the grid.

pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{ElementData, NodeId};
pub use tree::Dom;
