//! Page links rendered after the footer.

use crate::dom::{Dom, ElementData, NodeId};
use crate::pagination::PageWindow;

use super::config::PageButtonCss;

/// Id of the pager container of grid `grid_id`.
pub fn pager_id(grid_id: &str) -> String {
    format!("{grid_id}-pager")
}

/// Id of the link to page `page` of grid `grid_id`.
pub fn page_link_id(grid_id: &str, page: usize) -> String {
    format!("{grid_id}-page-{page}")
}

/// The page a link id points to, if `element_id` is a page link of `grid_id`.
pub fn page_from_link(grid_id: &str, element_id: &str) -> Option<usize> {
    element_id
        .strip_prefix(grid_id)?
        .strip_prefix("-page-")?
        .parse()
        .ok()
        .filter(|&page| page > 0)
}

/// Render the pager as the last child of `parent`.
///
/// Nothing is rendered unless pagination is on and there is more than one page.
pub fn render_pager(
    dom: &mut Dom,
    parent: NodeId,
    grid_id: &str,
    window: &PageWindow,
    css: &PageButtonCss,
) -> Option<NodeId> {
    if window.page_size.is_none() || window.page_count < 2 {
        return None;
    }
    let pager = dom.insert_child(parent, ElementData::new("div").with_id(pager_id(grid_id)));
    for page in 1..=window.page_count {
        let style = if page == window.page {
            &css.active_css
        } else {
            &css.normal_css
        };
        let mut link = ElementData::new("a")
            .with_id(page_link_id(grid_id, page))
            .with_attr("href", "#")
            .with_text(page.to_string());
        if !style.is_empty() {
            link.set_attr("style", style.clone());
        }
        dom.insert_child(pager, link);
    }
    Some(pager)
}
