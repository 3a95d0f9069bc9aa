//! Row template rendering.
//!
//! [`RowRenderer`] materializes a [`Template`] into the element arena for one
//! row: tokens in ids, text and attribute values are replaced, presentation
//! markers (`model-src`, `model-style`) are applied to their target attribute,
//! and controls carrying a `model` marker get their current value and are
//! recorded in the [`BindingRegistry`].

use serde_json::Value;

use crate::binding::BindingRegistry;
use crate::dom::{Dom, ElementData, NodeId};
use crate::resolve::{display_text, is_truthy, FunctionTable, Scope};
use crate::sync::kind::InputKind;
use crate::template::lexer::{has_tokens, scan, Segment};
use crate::template::{Expr, SectionKind, Template, TemplateError, TemplateNode};

/// Binding marker: the value is a path token naming the bound property.
pub const MODEL_ATTR: &str = "model";
/// Presentation marker resolved into `src`.
pub const MODEL_SRC_ATTR: &str = "model-src";
/// Presentation marker resolved into `style`.
pub const MODEL_STYLE_ATTR: &str = "model-style";

/// Errors surfaced by a render pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("malformed {section:?} template (row {row:?}): {source}")]
    Template {
        section: SectionKind,
        row: Option<usize>,
        #[source]
        source: TemplateError,
    },
}

// ---------------------------------------------------------------------------
// RowRenderer
// ---------------------------------------------------------------------------

/// Renders section templates against a row collection.
pub struct RowRenderer<'a> {
    rows: &'a [Value],
    functions: &'a FunctionTable,
    id_prefix: &'a str,
    bind_inputs: bool,
}

impl<'a> RowRenderer<'a> {
    /// `id_prefix` scopes generated element ids to one grid.
    pub fn new(rows: &'a [Value], functions: &'a FunctionTable, id_prefix: &'a str) -> Self {
        Self {
            rows,
            functions,
            id_prefix,
            bind_inputs: true,
        }
    }

    /// Whether `model` controls are registered for two-way sync (builder).
    pub fn bind_inputs(mut self, bind: bool) -> Self {
        self.bind_inputs = bind;
        self
    }

    /// Render the data template for `row_index` as the last child of `parent`.
    ///
    /// Bound controls are registered in `registry`. The caller clears stale
    /// entries (whole registry or this row) beforehand.
    pub fn render_row(
        &self,
        dom: &mut Dom,
        parent: NodeId,
        template: &Template,
        row_index: usize,
        registry: &mut BindingRegistry,
    ) -> Result<NodeId, RenderError> {
        let scope = Scope::new(self.rows, row_index, self.functions);
        let mut pass = Pass {
            renderer: self,
            scope,
            row: Some(row_index),
            registry,
            generated: 0,
        };
        pass.instantiate(dom, parent, template.root())
            .map_err(|source| RenderError::Template {
                section: template.kind(),
                row: Some(row_index),
                source,
            })
    }

    /// Render a header or footer template as the last child of `parent`.
    ///
    /// Path tokens resolve to nothing. Function tokens receive the whole
    /// collection and `rows.len()` as index. Controls are never bound.
    pub fn render_section(
        &self,
        dom: &mut Dom,
        parent: NodeId,
        template: &Template,
    ) -> Result<NodeId, RenderError> {
        let scope = Scope::new(self.rows, self.rows.len(), self.functions);
        let mut unused = BindingRegistry::new();
        let mut pass = Pass {
            renderer: self,
            scope,
            row: None,
            registry: &mut unused,
            generated: 0,
        };
        pass.instantiate(dom, parent, template.root())
            .map_err(|source| RenderError::Template {
                section: template.kind(),
                row: None,
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Pass
// ---------------------------------------------------------------------------

/// State of one template instantiation.
struct Pass<'r, 'a> {
    renderer: &'r RowRenderer<'a>,
    scope: Scope<'a>,
    row: Option<usize>,
    registry: &'r mut BindingRegistry,
    /// Counter for ids generated for bound controls without one.
    generated: usize,
}

impl Pass<'_, '_> {
    fn instantiate(
        &mut self,
        dom: &mut Dom,
        parent: NodeId,
        node: &TemplateNode,
    ) -> Result<NodeId, TemplateError> {
        let mut data = ElementData::new(node.tag.clone());
        data.text = node
            .text
            .as_deref()
            .map(|t| self.scope.interpolate(t))
            .transpose()?;

        let mut model = None;
        for (name, raw) in &node.attributes {
            match name.as_str() {
                MODEL_ATTR => {
                    model = Some(raw.as_str());
                    data.set_attr(name.clone(), raw.clone());
                }
                MODEL_SRC_ATTR => {
                    let value = self.scope.resolve_raw(raw)?;
                    data.set_attr("src", value.as_ref().map(display_text).unwrap_or_default());
                }
                MODEL_STYLE_ATTR => {
                    let value = self.scope.resolve_raw(raw)?;
                    data.set_attr("style", value.as_ref().map(display_text).unwrap_or_default());
                }
                _ => data.set_attr(name.clone(), self.scope.interpolate(raw)?),
            }
        }

        data.id = match &node.id {
            Some(raw) => {
                let id = self.scope.interpolate(raw)?;
                match (model, self.row) {
                    // A literal id repeats on every row; make it row-unique.
                    (Some(_), Some(row)) if !has_tokens(raw) => Some(format!("{id}-{row}")),
                    _ => Some(id),
                }
            }
            None => None,
        };

        if let Some(model) = model {
            self.bind(&mut data, model)?;
        }

        let id = dom.insert_child(parent, data);
        for child in &node.children {
            if let Err(err) = self.instantiate(dom, id, child) {
                // Never leave a half-built subtree behind.
                dom.remove(id);
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Fill a bound control with its current value and register it.
    fn bind(&mut self, data: &mut ElementData, model: &str) -> Result<(), TemplateError> {
        let Some(expr) = scan(model)?.into_iter().find_map(|segment| match segment {
            Segment::Token(token) => Some(Expr::parse(&token.expr)),
            Segment::Literal(_) => None,
        }) else {
            log::warn!("model marker {model:?} has no token; control left unbound");
            return Ok(());
        };

        let value = self.scope.resolve_expr(&expr);
        match InputKind::of(data) {
            Some(InputKind::Checkbox) => data.checked = value.as_ref().is_some_and(is_truthy),
            _ => data.value = Some(value.as_ref().map(display_text).unwrap_or_default()),
        }

        let (Some(row), Some(path)) = (self.row, expr.as_path()) else {
            return Ok(());
        };
        if !self.renderer.bind_inputs {
            return Ok(());
        }
        // Bound ids must be unique across the registry; a resolved id that
        // another control already holds falls back to a generated one.
        let element_id = match data.id.clone() {
            Some(id) if self.registry.get(&id).is_none() => id,
            taken => {
                if let Some(id) = taken {
                    log::warn!("bound id #{id} is already registered; row {row} gets a generated id");
                }
                let id = format!("{}-r{row}-b{}", self.renderer.id_prefix, self.generated);
                self.generated += 1;
                data.id = Some(id.clone());
                id
            }
        };
        log::trace!("bind #{element_id} -> row {row} `{path}`");
        self.registry.register(element_id, row, path.clone());
        Ok(())
    }
}
