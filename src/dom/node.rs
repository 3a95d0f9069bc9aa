//! Node types: NodeId, ElementData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an element in the arena. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element.
///
/// Form-control state (`value`, `checked`) and the painted row background are
/// kept outside `attributes` because the host mutates them independently of
/// the markup (user typing, toggling, hovering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name (e.g. "tr", "input", "dataRow").
    pub tag: String,
    /// Optional unique id (`#id` lookups).
    pub id: Option<String>,
    /// Attributes in insertion order. Names are unique.
    pub attributes: Vec<(String, String)>,
    /// Text content, if any.
    pub text: Option<String>,
    /// Current value of a form control.
    pub value: Option<String>,
    /// Checked state of a boolean control.
    pub checked: bool,
    /// Painted background colour.
    pub background: Option<String>,
}

impl ElementData {
    /// Create a new `ElementData` with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attributes: Vec::new(),
            text: None,
            value: None,
            checked: false,
            background: None,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute (builder). Replaces an existing attribute of the same name.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// The `type` attribute of a form control, lowercased. Inputs default to `text`.
    pub fn input_type(&self) -> Option<String> {
        match self.attr("type") {
            Some(t) => Some(t.to_ascii_lowercase()),
            None if self.tag.eq_ignore_ascii_case("input") => Some("text".to_owned()),
            None => None,
        }
    }
}
