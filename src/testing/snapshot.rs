//! Snapshot helpers.
//!
//! Functions turning a grid's arena into plain strings for snapshot tests
//! and assertions.

use crate::dom::{Dom, NodeId};
use crate::grid::Grid;

/// Markup of the grid element.
pub fn grid_to_markup(grid: &Grid) -> String {
    grid.to_markup()
}

/// Markup of each direct child of the grid element, one per line.
///
/// Header, rows, footer and pager each land on their own line, which keeps
/// snapshot diffs readable.
pub fn grid_to_lines(grid: &Grid) -> String {
    children_to_lines(grid.dom(), grid.root())
}

/// Markup of each child of `parent`, joined with `'\n'`.
pub fn children_to_lines(dom: &Dom, parent: NodeId) -> String {
    dom.children(parent)
        .iter()
        .map(|&child| dom.to_markup(child))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text content of each rendered data row, in page order.
pub fn row_texts(grid: &Grid) -> Vec<String> {
    let dom = grid.dom();
    let mut rows: Vec<_> = grid
        .row_nodes()
        .filter_map(|(_, node)| dom.index_in_parent(node).map(|pos| (pos, node)))
        .collect();
    rows.sort_by_key(|&(pos, _)| pos);
    rows.into_iter().map(|(_, node)| dom.text_content(node)).collect()
}
