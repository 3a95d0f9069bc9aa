//! The grid controller.
//!
//! A [`Grid`] owns the element arena, the row collection and every piece of
//! per-grid state: templates, pagination, binding registry, listeners,
//! pending changes, painter, custom functions and hooks. Nothing is global;
//! two grids never share state.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::binding::BindingRegistry;
use crate::dom::{Dom, ElementData, NodeId};
use crate::error::GridError;
use crate::event::{DomEvent, EventKind};
use crate::pagination::{PageChange, PageWindow, Pagination};
use crate::render::{RowColorFn, RowPainter, RowRenderer};
use crate::resolve::FunctionTable;
use crate::sync::{self, DataUpdate, Edit, PendingChanges, SyncEngine};
use crate::template::GridTemplates;

use super::config::{GridConfig, PageButtonCss, DEFAULT_GRID_ID};
use super::hooks::{GridEvent, GridHooks};
use super::pager;

/// Attribute carrying the cell padding on the grid element.
pub const CELL_PADDING_ATTR: &str = "cellpadding";

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a page change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page moved (or was re-entered) and the grid was redrawn.
    Moved(PageChange),
    /// The `before` hook refused the move.
    Refused(PageChange),
    /// Page changes are disabled for this grid.
    Disabled,
}

/// What a dispatched host event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// No listener or link reacts to the event.
    Ignored,
    /// A bound control's value was committed to its row.
    Edited { row_index: usize },
    /// A page link was clicked.
    Page(PageOutcome),
    /// A visible row was repainted for hover.
    Hover { row_index: usize, entered: bool },
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A data-bound grid.
pub struct Grid {
    id: String,
    dom: Dom,
    root: NodeId,
    templates: GridTemplates,
    rows: Vec<Value>,
    pending: PendingChanges,
    pagination: Pagination,
    registry: BindingRegistry,
    sync: SyncEngine,
    functions: FunctionTable,
    painter: RowPainter,
    hooks: GridHooks,
    events: Vec<GridEvent>,
    cell_padding: u32,
    page_button_css: PageButtonCss,
    allow_page_change: bool,
    update_row_on_input_change: bool,
    bind_inputs: bool,
    /// Rendered data rows of the current page, by row index.
    row_nodes: BTreeMap<usize, NodeId>,
    /// Row currently under the pointer.
    hovered: Option<usize>,
    loaded: bool,
}

impl Grid {
    /// Create a grid with its own arena. The grid element is a `table` whose
    /// id is the configured grid id (or `"grid"`).
    pub fn new(config: GridConfig, templates: GridTemplates) -> Self {
        let id = config
            .options
            .grid_id
            .clone()
            .unwrap_or_else(|| DEFAULT_GRID_ID.to_owned());
        let mut dom = Dom::new();
        let root = dom.insert(ElementData::new("table").with_id(id.clone()));
        Self::assemble(id, dom, root, templates, config)
    }

    /// Adopt host markup: find the element with the configured grid id and
    /// read its `headerRow` / `dataRow` / `footerRow` sections as templates.
    ///
    /// # Errors
    ///
    /// [`GridError::MissingGridId`] without a grid id,
    /// [`GridError::GridNotFound`] when no element carries it, and
    /// [`GridError::Template`] when the data row section is missing.
    pub fn adopt(dom: Dom, config: GridConfig) -> Result<Self, GridError> {
        let id = config.options.grid_id.clone().ok_or(GridError::MissingGridId)?;
        let root = dom
            .query_by_id(&id)
            .ok_or_else(|| GridError::GridNotFound(id.clone()))?;
        let templates = GridTemplates::from_dom(&dom, root)?;
        let mut grid = Self::assemble(id, dom, root, templates, config);
        grid.dom.clear_children(root);
        Ok(grid)
    }

    fn assemble(id: String, dom: Dom, root: NodeId, templates: GridTemplates, config: GridConfig) -> Self {
        let GridConfig {
            options,
            hooks,
            functions,
            row_color,
        } = config;
        let mut painter = RowPainter::new();
        painter.set_palette(options.data_row_colors.clone());
        painter.set_mouse_over(options.mouse_over_color.clone());
        painter.set_override(row_color);
        let pagination = Pagination::new(options.data_source.len(), options.page_size());
        Self {
            id,
            dom,
            root,
            templates,
            rows: options.data_source,
            pending: PendingChanges::new(),
            pagination,
            registry: BindingRegistry::new(),
            sync: SyncEngine::new(),
            functions,
            painter,
            hooks,
            events: Vec::new(),
            cell_padding: options.cell_padding,
            page_button_css: options.page_button_css,
            allow_page_change: options.allow_page_change,
            update_row_on_input_change: options.update_data_row_on_input_change,
            bind_inputs: !options.disable_input_bindings,
            row_nodes: BTreeMap::new(),
            hovered: None,
            loaded: false,
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Render header, the rows of the current page, footer and pager, then
    /// attach listeners for every bound control.
    ///
    /// The registry is rebuilt from scratch; nothing from a previous draw
    /// survives. On error the grid element is left empty.
    pub fn draw(&mut self) -> Result<(), GridError> {
        let window = self.pagination.current_window();
        log::debug!(
            "draw #{}: rows {}..{} (page {}/{})",
            self.id,
            window.start,
            window.end,
            window.page,
            window.page_count
        );
        if let Err(err) = self.draw_pass(&window) {
            self.dom.clear_children(self.root);
            self.registry.clear();
            self.sync.detach_all();
            self.row_nodes.clear();
            self.hovered = None;
            return Err(err);
        }
        self.sync.attach(&self.registry, &self.dom);
        if !self.loaded {
            self.loaded = true;
            self.events.push(GridEvent::Loaded);
            self.hooks.loaded();
        }
        Ok(())
    }

    fn draw_pass(&mut self, window: &PageWindow) -> Result<(), GridError> {
        self.dom.clear_children(self.root);
        self.registry.clear();
        self.sync.detach_all();
        self.row_nodes.clear();
        self.hovered = None;
        if let Some(root) = self.dom.get_mut(self.root) {
            root.set_attr(CELL_PADDING_ATTR, self.cell_padding.to_string());
        }

        let renderer = RowRenderer::new(&self.rows, &self.functions, &self.id).bind_inputs(self.bind_inputs);
        if let Some(header) = &self.templates.header {
            renderer.render_section(&mut self.dom, self.root, header)?;
        }
        for index in window.range() {
            let node = renderer.render_row(&mut self.dom, self.root, &self.templates.data, index, &mut self.registry)?;
            self.row_nodes.insert(index, node);
        }
        if let Some(footer) = &self.templates.footer {
            renderer.render_section(&mut self.dom, self.root, footer)?;
        }
        pager::render_pager(&mut self.dom, self.root, &self.id, window, &self.page_button_css);

        let nodes: Vec<_> = self.row_nodes.iter().map(|(&i, &n)| (i, n)).collect();
        for (index, node) in nodes {
            self.finish_row(index, node);
        }
        Ok(())
    }

    /// Re-render one visible row in place and re-attach its listeners.
    ///
    /// Other rows, their bindings and the pending set are untouched.
    ///
    /// # Errors
    ///
    /// [`GridError::RowNotVisible`] when `index` is not on the current page,
    /// is past the end of the collection, or has not been drawn since the
    /// collection was last replaced.
    pub fn redraw_row(&mut self, index: usize) -> Result<(), GridError> {
        if index >= self.rows.len() || !self.pagination.current_window().contains(index) {
            return Err(GridError::RowNotVisible { index });
        }
        let old = *self
            .row_nodes
            .get(&index)
            .ok_or(GridError::RowNotVisible { index })?;
        let position = self.dom.index_in_parent(old).unwrap_or(0);

        self.registry.clear_row(index);
        self.sync.detach_row(index);
        let renderer = RowRenderer::new(&self.rows, &self.functions, &self.id).bind_inputs(self.bind_inputs);
        let node = renderer.render_row(&mut self.dom, self.root, &self.templates.data, index, &mut self.registry)?;
        self.dom.remove(old);
        self.dom.move_to(node, position);
        self.row_nodes.insert(index, node);
        self.finish_row(index, node);

        self.sync.attach_row(&self.registry, &self.dom, index);
        log::debug!("redraw #{} row {index}", self.id);
        self.events.push(GridEvent::RowRedrawn { index });
        self.hooks.row_redrawn(index);
        Ok(())
    }

    /// Give a rendered row its id and background. A row under the pointer
    /// keeps the hover colour.
    fn finish_row(&mut self, index: usize, node: NodeId) {
        let color = if self.hovered == Some(index) {
            self.painter.hover_color(&self.rows, index)
        } else {
            self.painter.base_color(&self.rows, index)
        };
        let row_id = self.row_id(index);
        if let Some(data) = self.dom.get_mut(node) {
            if data.id.is_none() {
                data.id = Some(row_id);
            }
            data.background = color;
        }
    }

    /// Default id of the rendered row `index`.
    pub fn row_id(&self, index: usize) -> String {
        format!("{}-row-{index}", self.id)
    }

    fn row_from_id(&self, element_id: &str) -> Option<usize> {
        self.row_nodes
            .iter()
            .find(|&(_, &node)| {
                self.dom
                    .get(node)
                    .and_then(|d| d.id.as_deref())
                    .is_some_and(|id| id == element_id)
            })
            .map(|(&index, _)| index)
    }

    // ── Paging ───────────────────────────────────────────────────────

    /// Request a move to `page` (clamped into range).
    ///
    /// Disabled grids ignore the request. Otherwise the `before` hook may
    /// refuse; an accepted move redraws and then fires the page change hook.
    pub fn go_to_page(&mut self, page: usize) -> Result<PageOutcome, GridError> {
        if !self.allow_page_change {
            log::debug!("page change to {page} ignored: disabled on #{}", self.id);
            return Ok(PageOutcome::Disabled);
        }
        let change = self.pagination.plan(page);
        if !self.hooks.allow_page_change(change.from, change.to) {
            log::debug!("page change {} -> {} refused on #{}", change.from, change.to, self.id);
            self.events.push(GridEvent::PageChangeRefused {
                from: change.from,
                to: change.to,
            });
            return Ok(PageOutcome::Refused(change));
        }
        self.pagination.apply(change);
        self.draw()?;
        log::debug!("page change {} -> {} on #{}", change.from, change.to, self.id);
        self.events.push(GridEvent::PageChanged {
            from: change.from,
            to: change.to,
        });
        self.hooks.page_changed(change.from, change.to);
        Ok(PageOutcome::Moved(change))
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// The rows shown on the current page.
    pub fn window(&self) -> PageWindow {
        self.pagination.current_window()
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Route a host event.
    ///
    /// Clicks on page links request a page change; change/click events on
    /// bound controls commit an edit; pointer enter/leave on a rendered row
    /// repaints it.
    pub fn dispatch(&mut self, event: &DomEvent) -> Result<Dispatched, GridError> {
        if event.kind == EventKind::Click {
            if let Some(page) = pager::page_from_link(&self.id, &event.target) {
                return self.go_to_page(page).map(Dispatched::Page);
            }
        }
        match event.kind {
            EventKind::Change | EventKind::Click => {
                let Some(edit) = self.sync.extract(&self.dom, &event.target, event.kind) else {
                    return Ok(Dispatched::Ignored);
                };
                let row_index = edit.row_index;
                self.commit(edit)?;
                Ok(Dispatched::Edited { row_index })
            }
            EventKind::MouseEnter | EventKind::MouseLeave => {
                let entered = event.kind == EventKind::MouseEnter;
                match self.row_from_id(&event.target) {
                    Some(row_index) if self.hover_row(row_index, entered) => {
                        Ok(Dispatched::Hover { row_index, entered })
                    }
                    _ => Ok(Dispatched::Ignored),
                }
            }
        }
    }

    /// Write an edit into its row, mark the row pending and, when enabled,
    /// re-render the row.
    pub fn commit(&mut self, edit: Edit) -> Result<(), GridError> {
        let row_index = edit.row_index;
        sync::commit(&mut self.rows, &mut self.pending, edit)?;
        if self.update_row_on_input_change && self.row_nodes.contains_key(&row_index) {
            self.redraw_row(row_index)?;
        }
        Ok(())
    }

    /// Paint the hover colour on a visible row (`entered`) or restore its
    /// resting colour. Returns `false` if the row is not rendered.
    pub fn hover_row(&mut self, index: usize, entered: bool) -> bool {
        let Some(&node) = self.row_nodes.get(&index) else {
            return false;
        };
        if entered {
            self.hovered = Some(index);
        } else if self.hovered == Some(index) {
            self.hovered = None;
        }
        let color = if entered {
            self.painter.hover_color(&self.rows, index)
        } else {
            self.painter.base_color(&self.rows, index)
        };
        match self.dom.get_mut(node) {
            Some(data) => {
                data.background = color;
                true
            }
            None => false,
        }
    }

    /// Drain recorded lifecycle events.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Data ─────────────────────────────────────────────────────────

    /// Replace the row collection. Pending changes are discarded and
    /// listeners detached; call [`draw`](Self::draw) to show the new rows.
    ///
    /// Rows still in the arena from the previous draw are no longer tracked:
    /// they cannot be redrawn or hovered until the next draw.
    pub fn set_data_source(&mut self, rows: Vec<Value>) -> &mut Self {
        self.pagination.set_total(rows.len());
        self.rows = rows;
        self.pending.clear();
        self.registry.clear();
        self.sync.detach_all();
        self.row_nodes.clear();
        self.hovered = None;
        self
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Value> {
        self.rows.get(index)
    }

    /// Rows edited since the last flush, in index order. Each entry is the
    /// collection's own record.
    pub fn get_data_updates(&self) -> Vec<DataUpdate<'_>> {
        self.pending.updates(&self.rows)
    }

    pub fn clear_data_updates(&mut self) {
        self.pending.clear();
    }

    /// Clone the edited rows and clear the pending set.
    pub fn take_data_updates(&mut self) -> Vec<(usize, Value)> {
        let updates = self
            .pending
            .updates(&self.rows)
            .into_iter()
            .map(|u| (u.row_index, u.row.clone()))
            .collect();
        self.pending.clear();
        updates
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Set the page size; `0` disables pagination. Takes effect on the next draw.
    pub fn set_pagination(&mut self, page_size: usize) -> &mut Self {
        self.pagination.set_page_size(Some(page_size));
        self
    }

    pub fn set_data_row_colors(&mut self, colors: Vec<String>) -> &mut Self {
        self.painter.set_palette(colors);
        self
    }

    pub fn set_cell_padding(&mut self, padding: u32) -> &mut Self {
        self.cell_padding = padding;
        self
    }

    pub fn set_mouse_over_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.painter.set_mouse_over(Some(color.into()));
        self
    }

    /// Register a `{{name()}}` function. Replaces one with the same name.
    /// Header and footer calls pass `rows.len()` as the index.
    pub fn add_custom_function(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value], usize) -> Value + 'static,
    ) -> &mut Self {
        self.functions.insert(name, f);
        self
    }

    pub fn set_page_button_css(&mut self, normal: impl Into<String>, active: impl Into<String>) -> &mut Self {
        self.page_button_css = PageButtonCss {
            normal_css: normal.into(),
            active_css: active.into(),
        };
        self
    }

    pub fn allow_page_change(&mut self, allow: bool) -> &mut Self {
        self.allow_page_change = allow;
        self
    }

    pub fn update_data_row_on_input_change(&mut self, update: bool) -> &mut Self {
        self.update_row_on_input_change = update;
        self
    }

    /// Stop (or resume) registering `model` controls. Takes effect on the next draw.
    pub fn disable_input_bindings(&mut self, disable: bool) -> &mut Self {
        self.bind_inputs = !disable;
        self
    }

    pub fn on_grid_loaded(&mut self, f: impl FnMut() + 'static) -> &mut Self {
        self.hooks.on_grid_loaded = Some(Box::new(f));
        self
    }

    pub fn before_grid_page_change(&mut self, f: impl FnMut(usize, usize) -> bool + 'static) -> &mut Self {
        self.hooks.before_grid_page_change = Some(Box::new(f));
        self
    }

    pub fn on_grid_page_change(&mut self, f: impl FnMut(usize, usize) + 'static) -> &mut Self {
        self.hooks.on_grid_page_change = Some(Box::new(f));
        self
    }

    pub fn on_row_redraw_complete(&mut self, f: impl FnMut(usize) + 'static) -> &mut Self {
        self.hooks.on_row_redraw_complete = Some(Box::new(f));
        self
    }

    pub fn on_row_addition(&mut self, f: impl Fn(&[Value], usize) -> Option<String> + 'static) -> &mut Self {
        let f: RowColorFn = std::rc::Rc::new(f);
        self.painter.set_override(Some(f));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable arena access, for hosts updating control state before
    /// dispatching an event.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The grid element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn templates(&self) -> &GridTemplates {
        &self.templates
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn listeners(&self) -> &SyncEngine {
        &self.sync
    }

    /// The rendered node of row `index`, if it is on the current page.
    pub fn row_node(&self, index: usize) -> Option<NodeId> {
        self.row_nodes.get(&index).copied()
    }

    /// Rendered rows of the current page, by index.
    pub fn row_nodes(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.row_nodes.iter().map(|(&i, &n)| (i, n))
    }

    /// Serialize the grid element to markup.
    pub fn to_markup(&self) -> String {
        self.dom.to_markup(self.root)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("rows", &self.rows.len())
            .field("page", &self.pagination.current_page())
            .field("bindings", &self.registry.len())
            .field("pending", &self.pending.len())
            .field("functions", &self.functions)
            .field("hooks", &self.hooks)
            .finish()
    }
}
