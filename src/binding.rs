//! Binding registry: which rendered control edits which row property.
//!
//! [`BindingRegistry`] is filled while rows are rendered and read when
//! listeners are attached. A full render starts with [`BindingRegistry::clear`];
//! a single-row render starts with [`BindingRegistry::clear_row`] so entries of
//! other visible rows survive.

use crate::path::PropertyPath;

// ---------------------------------------------------------------------------
// BoundElement
// ---------------------------------------------------------------------------

/// A rendered control tied to a row property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundElement {
    /// Id of the rendered element.
    pub element_id: String,
    /// Index of the owning row in the collection.
    pub row_index: usize,
    /// Property written on edit.
    pub path: PropertyPath,
}

// ---------------------------------------------------------------------------
// BindingRegistry
// ---------------------------------------------------------------------------

/// Ordered set of bound elements, unique by element id.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    entries: Vec<BoundElement>,
}

impl BindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bound element.
    ///
    /// If the element id is already registered, its entry is replaced in place.
    pub fn register(&mut self, element_id: impl Into<String>, row_index: usize, path: PropertyPath) {
        let entry = BoundElement {
            element_id: element_id.into(),
            row_index,
            path,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.element_id == entry.element_id)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop the entries of one row, keeping the others.
    pub fn clear_row(&mut self, row_index: usize) {
        self.entries.retain(|e| e.row_index != row_index);
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[BoundElement] {
        &self.entries
    }

    /// Entries belonging to one row.
    pub fn entries_for_row(&self, row_index: usize) -> impl Iterator<Item = &BoundElement> {
        self.entries.iter().filter(move |e| e.row_index == row_index)
    }

    /// Look up the entry for an element id.
    pub fn get(&self, element_id: &str) -> Option<&BoundElement> {
        self.entries.iter().find(|e| e.element_id == element_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
