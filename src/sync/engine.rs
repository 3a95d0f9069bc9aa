//! Listener wiring and edit commits.
//!
//! [`SyncEngine`] turns registry entries into listeners on live elements.
//! When the host reports an event on a listened element, the engine reads the
//! control's value ([`SyncEngine::extract`]) and [`commit`] writes it into the
//! row collection and marks the row pending.

use std::collections::HashMap;

use serde_json::Value;

use crate::binding::{BindingRegistry, BoundElement};
use crate::dom::{Dom, NodeId};
use crate::event::EventKind;
use crate::path::{PathError, PropertyPath};

use super::kind::InputKind;
use super::pending::PendingChanges;

/// Errors from committing an edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("row {index} is out of range (collection has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Path(#[from] PathError),
}

// ---------------------------------------------------------------------------
// Listener / Edit
// ---------------------------------------------------------------------------

/// A change notification attached to one bound element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub node: NodeId,
    pub kind: InputKind,
    pub row_index: usize,
    pub path: PropertyPath,
}

impl Listener {
    /// The event this listener reacts to.
    pub fn trigger(&self) -> EventKind {
        self.kind.trigger()
    }
}

/// A value read off a control, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub element_id: String,
    pub row_index: usize,
    pub path: PropertyPath,
    pub value: Value,
}

// ---------------------------------------------------------------------------
// SyncEngine
// ---------------------------------------------------------------------------

/// Listeners keyed by element id.
#[derive(Debug, Default)]
pub struct SyncEngine {
    listeners: HashMap<String, Listener>,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all listeners with one per attachable registry entry.
    ///
    /// Entries whose element is missing or is not a recognized input are skipped.
    pub fn attach(&mut self, registry: &BindingRegistry, dom: &Dom) {
        self.listeners.clear();
        for entry in registry.entries() {
            self.attach_entry(entry, dom);
        }
        log::debug!(
            "attached {} of {} bindings",
            self.listeners.len(),
            registry.len()
        );
    }

    /// Replace the listeners of one row, leaving other rows untouched.
    pub fn attach_row(&mut self, registry: &BindingRegistry, dom: &Dom, row_index: usize) {
        self.detach_row(row_index);
        for entry in registry.entries_for_row(row_index) {
            self.attach_entry(entry, dom);
        }
    }

    /// Drop the listeners of one row.
    pub fn detach_row(&mut self, row_index: usize) {
        self.listeners.retain(|_, l| l.row_index != row_index);
    }

    /// Drop every listener.
    pub fn detach_all(&mut self) {
        self.listeners.clear();
    }

    fn attach_entry(&mut self, entry: &BoundElement, dom: &Dom) {
        let Some(node) = dom.query_by_id(&entry.element_id) else {
            log::warn!("no element #{} for binding; skipped", entry.element_id);
            return;
        };
        let Some(kind) = dom.get(node).and_then(InputKind::of) else {
            log::warn!("element #{} is not a recognized input; skipped", entry.element_id);
            return;
        };
        self.listeners.insert(
            entry.element_id.clone(),
            Listener {
                node,
                kind,
                row_index: entry.row_index,
                path: entry.path.clone(),
            },
        );
    }

    /// The listener attached to an element id.
    pub fn listener(&self, element_id: &str) -> Option<&Listener> {
        self.listeners.get(element_id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Read the edit carried by `event` on `element_id`, if a listener reacts to it.
    pub fn extract(&self, dom: &Dom, element_id: &str, event: EventKind) -> Option<Edit> {
        let listener = self.listeners.get(element_id)?;
        if listener.trigger() != event {
            return None;
        }
        let data = dom.get(listener.node)?;
        Some(Edit {
            element_id: element_id.to_owned(),
            row_index: listener.row_index,
            path: listener.path.clone(),
            value: listener.kind.extract(data),
        })
    }
}

/// Write an edit into the collection and mark the row pending.
///
/// Nothing is marked if the write fails.
///
/// # Errors
///
/// [`SyncError::RowOutOfRange`] for an index past the collection,
/// [`SyncError::Path`] when the path cannot be written.
pub fn commit(rows: &mut [Value], pending: &mut PendingChanges, edit: Edit) -> Result<(), SyncError> {
    let len = rows.len();
    let row = rows.get_mut(edit.row_index).ok_or(SyncError::RowOutOfRange {
        index: edit.row_index,
        len,
    })?;
    edit.path.assign(row, edit.value)?;
    pending.mark(edit.row_index);
    log::debug!(
        "commit #{} -> row {} `{}`",
        edit.element_id,
        edit.row_index,
        edit.path
    );
    Ok(())
}
