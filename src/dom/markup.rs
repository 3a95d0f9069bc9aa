//! Markup serialization of element subtrees.
//!
//! The output is deterministic: attributes in insertion order, followed by the
//! control state (`value`, `checked`) and the painted background (`bgcolor`).

use std::fmt::Write;

use super::node::NodeId;
use super::tree::Dom;

impl Dom {
    /// Serialize `id` and its subtree to markup text.
    ///
    /// Returns an empty string for a node that does not exist.
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.get(id) else {
            return;
        };
        let _ = write!(out, "<{}", data.tag);
        if let Some(el_id) = &data.id {
            let _ = write!(out, " id=\"{}\"", escape(el_id));
        }
        for (name, value) in &data.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if let Some(value) = &data.value {
            let _ = write!(out, " value=\"{}\"", escape(value));
        }
        if data.checked {
            out.push_str(" checked");
        }
        if let Some(color) = &data.background {
            let _ = write!(out, " bgcolor=\"{}\"", escape(color));
        }
        out.push('>');
        if let Some(text) = &data.text {
            out.push_str(&escape(text));
        }
        for &child in self.children(id) {
            self.write_markup(child, out);
        }
        let _ = write!(out, "</{}>", data.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
