//! Element queries: by id, by tag, within a subtree.

use super::node::{ElementData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` field matches the given string.
    ///
    /// Iterates all nodes in the arena (not just the tree rooted at `root`).
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_nodes()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes whose tag matches (ASCII case-insensitive).
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| data.tag.eq_ignore_ascii_case(tag))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Find the first descendant of `scope` (document order, excluding `scope`)
    /// whose tag matches.
    pub fn query_first_by_tag_within(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .find(|&n| {
                self.get(n)
                    .is_some_and(|data| data.tag.eq_ignore_ascii_case(tag))
            })
    }

    /// Iterate over all `(NodeId, &ElementData)` pairs in the arena.
    ///
    /// Slotmap order is deterministic but not tree order.
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::ElementData;
    use crate::dom::tree::Dom;

    /// ```text
    ///   div #host
    ///    ├── table #people
    ///    │     ├── headerRow
    ///    │     └── dataRow
    ///    │           └── input #name (model)
    ///    └── table #other
    ///          └── dataRow
    /// ```
    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let host = dom.insert(ElementData::new("div").with_id("host"));
        let people = dom.insert_child(host, ElementData::new("table").with_id("people"));
        dom.insert_child(people, ElementData::new("headerRow"));
        let data = dom.insert_child(people, ElementData::new("dataRow"));
        dom.insert_child(
            data,
            ElementData::new("input")
                .with_id("name")
                .with_attr("model", "{{name}}"),
        );
        let other = dom.insert_child(host, ElementData::new("table").with_id("other"));
        dom.insert_child(other, ElementData::new("DATAROW"));
        dom
    }

    #[test]
    fn query_by_id_found() {
        let dom = build_query_tree();
        let id = dom.query_by_id("people").unwrap();
        assert_eq!(dom.get(id).unwrap().tag, "table");
    }

    #[test]
    fn query_by_id_not_found() {
        let dom = build_query_tree();
        assert!(dom.query_by_id("nonexistent").is_none());
    }

    #[test]
    fn query_by_tag_is_case_insensitive() {
        let dom = build_query_tree();
        assert_eq!(dom.query_by_tag("datarow").len(), 2);
        assert_eq!(dom.query_by_tag("headerRow").len(), 1);
        assert!(dom.query_by_tag("footerRow").is_empty());
    }

    #[test]
    fn query_first_by_tag_within_scope() {
        let dom = build_query_tree();
        let people = dom.query_by_id("people").unwrap();
        let other = dom.query_by_id("other").unwrap();
        let a = dom.query_first_by_tag_within(people, "dataRow").unwrap();
        let b = dom.query_first_by_tag_within(other, "dataRow").unwrap();
        assert_ne!(a, b);
        assert_eq!(dom.parent(a), Some(people));
        assert!(dom.query_first_by_tag_within(other, "headerRow").is_none());
    }

    #[test]
    fn query_within_excludes_scope() {
        let dom = build_query_tree();
        let people = dom.query_by_id("people").unwrap();
        assert!(dom.query_first_by_tag_within(people, "table").is_none());
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_id("x").is_none());
        assert!(dom.query_by_tag("x").is_empty());
    }
}
