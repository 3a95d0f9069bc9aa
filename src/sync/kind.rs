//! Input kinds: which event a control fires and how its value is read.
//!
//! [`INPUT_KINDS`] is the single table mapping a control's `type` to its
//! trigger event and value extractor. Adding a kind means adding a row.

use serde_json::Value;

use crate::dom::ElementData;
use crate::event::EventKind;

/// Recognized form-control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Number,
    Password,
    Checkbox,
    Search,
    Tel,
    Url,
    Email,
    Time,
    Datetime,
    Date,
    Month,
    Week,
}

/// How one kind of control participates in two-way sync.
pub struct KindEntry {
    pub kind: InputKind,
    /// Value of the `type` attribute.
    pub type_name: &'static str,
    /// Event that carries an edit.
    pub trigger: EventKind,
    /// Reads the edited value off the control.
    pub extract: fn(&ElementData) -> Value,
}

fn text_value(data: &ElementData) -> Value {
    Value::String(data.value.clone().unwrap_or_default())
}

fn checked_state(data: &ElementData) -> Value {
    Value::Bool(data.checked)
}

macro_rules! text_kind {
    ($kind:ident, $name:literal) => {
        KindEntry {
            kind: InputKind::$kind,
            type_name: $name,
            trigger: EventKind::Change,
            extract: text_value,
        }
    };
}

/// Kind table. Text-like controls sync on change with their verbatim value;
/// checkboxes sync on click with their checked state.
pub const INPUT_KINDS: &[KindEntry] = &[
    text_kind!(Text, "text"),
    text_kind!(Number, "number"),
    text_kind!(Password, "password"),
    KindEntry {
        kind: InputKind::Checkbox,
        type_name: "checkbox",
        trigger: EventKind::Click,
        extract: checked_state,
    },
    text_kind!(Search, "search"),
    text_kind!(Tel, "tel"),
    text_kind!(Url, "url"),
    text_kind!(Email, "email"),
    text_kind!(Time, "time"),
    text_kind!(Datetime, "datetime"),
    text_kind!(Date, "date"),
    text_kind!(Month, "month"),
    text_kind!(Week, "week"),
];

impl InputKind {
    /// Look up a kind by its `type` attribute value (case-insensitive).
    pub fn from_type(type_name: &str) -> Option<Self> {
        INPUT_KINDS
            .iter()
            .find(|entry| entry.type_name.eq_ignore_ascii_case(type_name))
            .map(|entry| entry.kind)
    }

    /// The kind of a control element, if it is a recognized input.
    pub fn of(data: &ElementData) -> Option<Self> {
        Self::from_type(&data.input_type()?)
    }

    /// The table row for this kind.
    pub fn entry(self) -> &'static KindEntry {
        INPUT_KINDS
            .iter()
            .find(|entry| entry.kind == self)
            .unwrap_or(&INPUT_KINDS[0])
    }

    /// The event that carries an edit for this kind.
    pub fn trigger(self) -> EventKind {
        self.entry().trigger
    }

    /// Read the current value off a control of this kind.
    pub fn extract(self, data: &ElementData) -> Value {
        (self.entry().extract)(data)
    }
}
