//! Pending changes: the rows edited since the last explicit flush.

use std::collections::BTreeSet;

use serde_json::Value;

/// One edited row, borrowed from the collection.
///
/// `row` is the collection's own record, not a copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataUpdate<'a> {
    pub row_index: usize,
    pub row: &'a Value,
}

/// Set of edited row indices. Each index appears once; re-editing a row
/// leaves the set unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingChanges {
    rows: BTreeSet<usize>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a row as edited.
    pub fn mark(&mut self, row_index: usize) {
        self.rows.insert(row_index);
    }

    pub fn contains(&self, row_index: usize) -> bool {
        self.rows.contains(&row_index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Edited rows in index order. Indices no longer in `rows` are skipped.
    pub fn updates<'a>(&self, rows: &'a [Value]) -> Vec<DataUpdate<'a>> {
        self.rows
            .iter()
            .filter_map(|&row_index| {
                rows.get(row_index)
                    .map(|row| DataUpdate { row_index, row })
            })
            .collect()
    }
}
