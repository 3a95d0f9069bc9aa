//! Grid configuration.
//!
//! [`GridOptions`] holds the plain-data options and deserializes from the
//! camelCase JSON shape (`gridId`, `pagination`, `dataRowColors`, ...).
//! [`GridConfig`] adds what cannot be data: lifecycle hooks, custom
//! functions and the row colour override.

use serde::Deserialize;
use serde_json::Value;

use crate::render::RowColorFn;
use crate::resolve::FunctionTable;

use super::hooks::GridHooks;

/// Default cell padding.
pub const DEFAULT_CELL_PADDING: u32 = 5;

/// Id used for grids built without a `gridId`.
pub const DEFAULT_GRID_ID: &str = "grid";

// ---------------------------------------------------------------------------
// PageButtonCss
// ---------------------------------------------------------------------------

/// Inline styles for the pager links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageButtonCss {
    pub normal_css: String,
    pub active_css: String,
}

// ---------------------------------------------------------------------------
// GridOptions
// ---------------------------------------------------------------------------

/// Plain-data grid options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Id of the host element whose sections are adopted.
    pub grid_id: Option<String>,
    /// Initial row collection.
    pub data_source: Vec<Value>,
    /// Rows per page. Absent, zero or negative disables pagination.
    pub pagination: Option<i64>,
    /// Row background palette, rotated by row index.
    pub data_row_colors: Vec<String>,
    /// Cell spacing, passed through to the grid element.
    pub cell_padding: u32,
    /// Row background while hovered.
    pub mouse_over_color: Option<String>,
    pub page_button_css: PageButtonCss,
    /// When `false`, page transitions are ignored.
    pub allow_page_change: bool,
    /// Re-render an edited row immediately after the commit.
    pub update_data_row_on_input_change: bool,
    /// When `true`, `model` controls are filled but not synced back.
    pub disable_input_bindings: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            grid_id: None,
            data_source: Vec::new(),
            pagination: None,
            data_row_colors: Vec::new(),
            cell_padding: DEFAULT_CELL_PADDING,
            mouse_over_color: None,
            page_button_css: PageButtonCss::default(),
            allow_page_change: true,
            update_data_row_on_input_change: true,
            disable_input_bindings: false,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The page size, if pagination is enabled.
    pub fn page_size(&self) -> Option<usize> {
        self.pagination
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n > 0)
    }

    /// Set the grid id (builder).
    pub fn with_grid_id(mut self, id: impl Into<String>) -> Self {
        self.grid_id = Some(id.into());
        self
    }

    /// Set the data source (builder).
    pub fn with_data_source(mut self, rows: Vec<Value>) -> Self {
        self.data_source = rows;
        self
    }

    /// Enable pagination (builder).
    pub fn with_pagination(mut self, page_size: usize) -> Self {
        self.pagination = i64::try_from(page_size).ok();
        self
    }

    /// Set the row palette (builder).
    pub fn with_data_row_colors(mut self, colors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.data_row_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the hover colour (builder).
    pub fn with_mouse_over_color(mut self, color: impl Into<String>) -> Self {
        self.mouse_over_color = Some(color.into());
        self
    }

    /// Set the cell padding (builder).
    pub fn with_cell_padding(mut self, padding: u32) -> Self {
        self.cell_padding = padding;
        self
    }

    /// Set the pager link styles (builder).
    pub fn with_page_button_css(mut self, normal: impl Into<String>, active: impl Into<String>) -> Self {
        self.page_button_css = PageButtonCss {
            normal_css: normal.into(),
            active_css: active.into(),
        };
        self
    }

    /// Allow or forbid page changes (builder).
    pub fn with_allow_page_change(mut self, allow: bool) -> Self {
        self.allow_page_change = allow;
        self
    }

    /// Re-render rows on edit (builder).
    pub fn with_update_data_row_on_input_change(mut self, update: bool) -> Self {
        self.update_data_row_on_input_change = update;
        self
    }

    /// Disable two-way bindings (builder).
    pub fn with_disable_input_bindings(mut self, disable: bool) -> Self {
        self.disable_input_bindings = disable;
        self
    }
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Options plus callbacks.
#[derive(Default)]
pub struct GridConfig {
    pub options: GridOptions,
    pub hooks: GridHooks,
    pub functions: FunctionTable,
    pub row_color: Option<RowColorFn>,
}

impl GridConfig {
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parse options from JSON; callbacks start empty.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        GridOptions::from_json(json).map(Self::new)
    }

    /// Register a `{{name()}}` function (builder). Header and footer calls
    /// pass `rows.len()` as the index.
    pub fn with_function(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&[Value], usize) -> Value + 'static,
    ) -> Self {
        self.functions.insert(name, f);
        self
    }

    /// Called once after the first successful draw (builder).
    pub fn on_grid_loaded(mut self, f: impl FnMut() + 'static) -> Self {
        self.hooks.on_grid_loaded = Some(Box::new(f));
        self
    }

    /// Called with `(old, new)` before a page change; `false` refuses it (builder).
    pub fn before_grid_page_change(mut self, f: impl FnMut(usize, usize) -> bool + 'static) -> Self {
        self.hooks.before_grid_page_change = Some(Box::new(f));
        self
    }

    /// Called with `(old, new)` after a page change and redraw (builder).
    pub fn on_grid_page_change(mut self, f: impl FnMut(usize, usize) + 'static) -> Self {
        self.hooks.on_grid_page_change = Some(Box::new(f));
        self
    }

    /// Called with the row index after a single-row redraw (builder).
    pub fn on_row_redraw_complete(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.hooks.on_row_redraw_complete = Some(Box::new(f));
        self
    }

    /// Per-row colour override consulted whenever a row is painted (builder).
    pub fn on_row_addition(mut self, f: impl Fn(&[Value], usize) -> Option<String> + 'static) -> Self {
        self.row_color = Some(std::rc::Rc::new(f));
        self
    }
}
