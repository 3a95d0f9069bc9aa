//! Host event types.
//!
//! The host owns real input handling. It updates control state in the
//! [`Dom`](crate::dom::Dom) (typed text, toggled checkbox) and then reports
//! the event to the grid as a [`DomEvent`] naming the target element id.

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Kinds of host events the grid listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A control's value was committed (text-like inputs).
    Change,
    /// An element was activated (checkboxes, page links).
    Click,
    /// The pointer entered an element.
    MouseEnter,
    /// The pointer left an element.
    MouseLeave,
}

// ---------------------------------------------------------------------------
// DomEvent
// ---------------------------------------------------------------------------

/// An event targeted at an element by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: String,
}

impl DomEvent {
    /// Create an event of the given kind.
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }

    /// A change event on `target`.
    pub fn change(target: impl Into<String>) -> Self {
        Self::new(EventKind::Change, target)
    }

    /// A click event on `target`.
    pub fn click(target: impl Into<String>) -> Self {
        Self::new(EventKind::Click, target)
    }
}
