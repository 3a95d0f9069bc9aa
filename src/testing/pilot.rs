//! GridPilot: programmatic interaction with a grid.
//!
//! The `GridPilot` plays the host: it changes control state in the arena the
//! way a user would (typing, toggling a checkbox), then reports the matching
//! event to the grid.

use crate::error::GridError;
use crate::event::{DomEvent, EventKind};
use crate::grid::{pager, Dispatched, Grid};

use super::snapshot;

// ---------------------------------------------------------------------------
// GridPilot
// ---------------------------------------------------------------------------

/// A headless grid driver for testing.
///
/// # Examples
///
/// ```ignore
/// let mut pilot = GridPilot::drawn(grid)?;
/// pilot.type_into("name-0", "Grace")?;
/// assert_eq!(pilot.grid().rows()[0]["name"], "Grace");
/// ```
pub struct GridPilot {
    grid: Grid,
}

impl GridPilot {
    /// Wrap a grid as is.
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Wrap a grid and draw it.
    pub fn drawn(mut grid: Grid) -> Result<Self, GridError> {
        grid.draw()?;
        Ok(Self { grid })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Replace the value of control `element_id` and fire a change event.
    ///
    /// A missing element is reported as [`Dispatched::Ignored`].
    pub fn type_into(&mut self, element_id: &str, text: &str) -> Result<Dispatched, GridError> {
        let Some(node) = self.grid.dom().query_by_id(element_id) else {
            return Ok(Dispatched::Ignored);
        };
        if let Some(data) = self.grid.dom_mut().get_mut(node) {
            data.value = Some(text.to_owned());
        }
        self.grid.dispatch(&DomEvent::change(element_id))
    }

    /// Flip checkbox `element_id` and fire a click event.
    pub fn toggle(&mut self, element_id: &str) -> Result<Dispatched, GridError> {
        let Some(node) = self.grid.dom().query_by_id(element_id) else {
            return Ok(Dispatched::Ignored);
        };
        if let Some(data) = self.grid.dom_mut().get_mut(node) {
            data.checked = !data.checked;
        }
        self.grid.dispatch(&DomEvent::click(element_id))
    }

    /// Click the link to page `page`.
    pub fn click_page(&mut self, page: usize) -> Result<Dispatched, GridError> {
        let link = pager::page_link_id(self.grid.id(), page);
        self.grid.dispatch(&DomEvent::click(link))
    }

    /// Move the pointer onto row `index`.
    pub fn hover(&mut self, index: usize) -> Result<Dispatched, GridError> {
        self.pointer(index, EventKind::MouseEnter)
    }

    /// Move the pointer off row `index`.
    pub fn leave(&mut self, index: usize) -> Result<Dispatched, GridError> {
        self.pointer(index, EventKind::MouseLeave)
    }

    fn pointer(&mut self, index: usize, kind: EventKind) -> Result<Dispatched, GridError> {
        let Some(target) = self
            .grid
            .row_node(index)
            .and_then(|node| self.grid.dom().get(node))
            .and_then(|data| data.id.clone())
        else {
            return Ok(Dispatched::Ignored);
        };
        self.grid.dispatch(&DomEvent::new(kind, target))
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Unwrap the driven grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The grid element as markup.
    pub fn markup(&self) -> String {
        self.grid.to_markup()
    }

    /// Text of each rendered data row, in page order.
    pub fn row_texts(&self) -> Vec<String> {
        snapshot::row_texts(&self.grid)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
