//! Row templates: header, data and footer sections.
//!
//! A [`Template`] is an immutable tree of [`TemplateNode`]s whose text and
//! attribute values may contain `{{...}}` tokens. Templates are built either
//! with the builder API or adopted once from host markup with
//! [`GridTemplates::from_dom`].

use crate::dom::{Dom, NodeId};

use super::TemplateError;

/// Tag marking the header section in host markup.
pub const HEADER_ROW_TAG: &str = "headerRow";
/// Tag marking the data row section in host markup.
pub const DATA_ROW_TAG: &str = "dataRow";
/// Tag marking the footer section in host markup.
pub const FOOTER_ROW_TAG: &str = "footerRow";
/// Tag adopted sections render as.
pub const ROW_TAG: &str = "tr";

// ---------------------------------------------------------------------------
// TemplateNode
// ---------------------------------------------------------------------------

/// One element of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<TemplateNode>,
}

impl TemplateNode {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Set the element id (builder). The id may itself contain tokens.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an attribute (builder). A repeated name replaces the earlier value.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element (builder).
    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    /// Copy an element subtree out of the arena.
    ///
    /// Control state (`value`, `checked`) and painted backgrounds are not part
    /// of a template and are dropped.
    pub fn from_dom(dom: &Dom, node: NodeId) -> Option<Self> {
        let data = dom.get(node)?;
        Some(Self {
            tag: data.tag.clone(),
            id: data.id.clone(),
            attributes: data.attributes.clone(),
            text: data.text.clone(),
            children: dom
                .children(node)
                .iter()
                .filter_map(|&child| Self::from_dom(dom, child))
                .collect(),
        })
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute lookup.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements.
    pub fn children(&self) -> &[TemplateNode] {
        &self.children
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// Which part of the grid a template draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Data,
    Footer,
}

/// An immutable section template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: SectionKind,
    root: TemplateNode,
}

impl Template {
    /// Wrap a node tree as a section template.
    pub fn new(kind: SectionKind, root: TemplateNode) -> Self {
        Self { kind, root }
    }

    /// The section this template draws.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The root element.
    pub fn root(&self) -> &TemplateNode {
        &self.root
    }
}

// ---------------------------------------------------------------------------
// GridTemplates
// ---------------------------------------------------------------------------

/// The three sections of a grid. Only the data row is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplates {
    pub header: Option<Template>,
    pub data: Template,
    pub footer: Option<Template>,
}

impl GridTemplates {
    /// Templates with only a data row.
    pub fn new(data_row: TemplateNode) -> Self {
        Self {
            header: None,
            data: Template::new(SectionKind::Data, data_row),
            footer: None,
        }
    }

    /// Add a header section (builder).
    pub fn with_header(mut self, header: TemplateNode) -> Self {
        self.header = Some(Template::new(SectionKind::Header, header));
        self
    }

    /// Add a footer section (builder).
    pub fn with_footer(mut self, footer: TemplateNode) -> Self {
        self.footer = Some(Template::new(SectionKind::Footer, footer));
        self
    }

    /// Read the `headerRow` / `dataRow` / `footerRow` sections below `grid`.
    ///
    /// Each section element becomes a [`ROW_TAG`] row; its attributes and
    /// children are kept.
    ///
    /// # Errors
    ///
    /// [`TemplateError::MissingSection`] if there is no data row section.
    pub fn from_dom(dom: &Dom, grid: NodeId) -> Result<Self, TemplateError> {
        let section = |tag: &str| {
            dom.query_first_by_tag_within(grid, tag)
                .and_then(|node| TemplateNode::from_dom(dom, node))
                .map(|mut node| {
                    node.tag = ROW_TAG.to_owned();
                    node
                })
        };
        let data = section(DATA_ROW_TAG).ok_or(TemplateError::MissingSection(DATA_ROW_TAG))?;
        Ok(Self {
            header: section(HEADER_ROW_TAG).map(|n| Template::new(SectionKind::Header, n)),
            data: Template::new(SectionKind::Data, data),
            footer: section(FOOTER_ROW_TAG).map(|n| Template::new(SectionKind::Footer, n)),
        })
    }
}
