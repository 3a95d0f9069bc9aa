//! Grid lifecycle: hooks and the event log.
//!
//! [`GridHooks`] holds the optional host callbacks. Every lifecycle step is
//! also recorded as a [`GridEvent`] that can be drained by the host loop,
//! whether or not a hook is installed.

use std::fmt;

// ---------------------------------------------------------------------------
// GridEvent
// ---------------------------------------------------------------------------

/// Lifecycle steps of a grid, in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// The first full draw completed.
    Loaded,
    /// The current page moved and the grid was redrawn.
    PageChanged { from: usize, to: usize },
    /// A page change was refused by the `before` hook.
    PageChangeRefused { from: usize, to: usize },
    /// One row was re-rendered in place.
    RowRedrawn { index: usize },
}

// ---------------------------------------------------------------------------
// GridHooks
// ---------------------------------------------------------------------------

pub type LoadedHook = Box<dyn FnMut()>;
pub type BeforePageChangeHook = Box<dyn FnMut(usize, usize) -> bool>;
pub type PageChangeHook = Box<dyn FnMut(usize, usize)>;
pub type RowRedrawHook = Box<dyn FnMut(usize)>;

/// Optional host callbacks.
#[derive(Default)]
pub struct GridHooks {
    pub on_grid_loaded: Option<LoadedHook>,
    pub before_grid_page_change: Option<BeforePageChangeHook>,
    pub on_grid_page_change: Option<PageChangeHook>,
    pub on_row_redraw_complete: Option<RowRedrawHook>,
}

impl GridHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn loaded(&mut self) {
        if let Some(hook) = self.on_grid_loaded.as_mut() {
            hook();
        }
    }

    /// Ask the `before` hook whether `from -> to` may proceed. No hook allows it.
    pub(crate) fn allow_page_change(&mut self, from: usize, to: usize) -> bool {
        self.before_grid_page_change
            .as_mut()
            .map_or(true, |hook| hook(from, to))
    }

    pub(crate) fn page_changed(&mut self, from: usize, to: usize) {
        if let Some(hook) = self.on_grid_page_change.as_mut() {
            hook(from, to);
        }
    }

    pub(crate) fn row_redrawn(&mut self, index: usize) {
        if let Some(hook) = self.on_row_redraw_complete.as_mut() {
            hook(index);
        }
    }
}

impl fmt::Debug for GridHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridHooks")
            .field("on_grid_loaded", &self.on_grid_loaded.is_some())
            .field("before_grid_page_change", &self.before_grid_page_change.is_some())
            .field("on_grid_page_change", &self.on_grid_page_change.is_some())
            .field("on_row_redraw_complete", &self.on_row_redraw_complete.is_some())
            .finish()
    }
}
