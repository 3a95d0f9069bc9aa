//! The grid: configuration, lifecycle hooks, pager and the controller.

pub mod config;
pub mod controller;
pub mod hooks;
pub mod pager;

pub use config::{GridConfig, GridOptions, PageButtonCss, DEFAULT_CELL_PADDING, DEFAULT_GRID_ID};
pub use controller::{Dispatched, Grid, PageOutcome, CELL_PADDING_ATTR};
pub use hooks::{GridEvent, GridHooks};
