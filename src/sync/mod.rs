//! Two-way sync: control kinds, listeners, edit commits, pending rows.

pub mod engine;
pub mod kind;
pub mod pending;

pub use engine::{commit, Edit, Listener, SyncEngine, SyncError};
pub use kind::{InputKind, KindEntry, INPUT_KINDS};
pub use pending::{DataUpdate, PendingChanges};
