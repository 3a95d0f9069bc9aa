//! Tree operations: insert, remove, reorder, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{ElementData, NodeId};

/// The element tree, backed by a slotmap arena.
///
/// Elements live in one `SlotMap`; child lists and parent links are kept in
/// secondary maps keyed by the same ids. A removed element's id is never
/// reused for a different element, so stale ids held by a grid simply miss.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, ElementData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a detached element. The first one inserted becomes the root.
    pub fn insert(&mut self, data: ElementData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.root.get_or_insert(id);
        id
    }

    /// Append an element as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "unknown parent element");
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
            self.parent.insert(id, parent);
        }
        id
    }

    /// Remove an element with its whole subtree and return its data.
    pub fn remove(&mut self, id: NodeId) -> Option<ElementData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if let Some(parent) = self.parent.get(id).copied() {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let subtree = self.walk_depth_first(id);
        let mut data = None;
        for node in subtree {
            self.children.remove(node);
            self.parent.remove(node);
            let removed = self.nodes.remove(node);
            if node == id {
                data = removed;
            }
        }
        data
    }

    /// Remove every child subtree of `id`, keeping `id` itself.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }

    /// Move `node` to position `index` among its siblings (clamped to the
    /// last position). Detached elements are left alone.
    pub fn move_to(&mut self, node: NodeId, index: usize) {
        let Some(parent) = self.parent.get(node).copied() else {
            return;
        };
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&child| child != node);
            siblings.insert(index.min(siblings.len()), node);
        }
    }

    /// Position of `node` among its siblings.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&child| child == node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children in document order; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and its descendants in document order.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !self.contains(node) {
                continue;
            }
            order.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        order
    }

    /// Text of `id` and its descendants, concatenated in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|node| self.nodes.get(node)?.text.as_deref())
            .collect()
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    ///        table#people
    ///        /          \
    ///     tr#r0        tr#r1
    ///    /     \
    ///  td(Ada) td(Lovelace)
    /// ```
    struct Fixture {
        dom: Dom,
        table: NodeId,
        r0: NodeId,
        r1: NodeId,
        first: NodeId,
        last: NodeId,
    }

    fn fixture() -> Fixture {
        let mut dom = Dom::new();
        let table = dom.insert(ElementData::new("table").with_id("people"));
        let r0 = dom.insert_child(table, ElementData::new("tr").with_id("r0"));
        let r1 = dom.insert_child(table, ElementData::new("tr").with_id("r1"));
        let first = dom.insert_child(r0, ElementData::new("td").with_text("Ada"));
        let last = dom.insert_child(r0, ElementData::new("td").with_text("Lovelace"));
        Fixture { dom, table, r0, r1, first, last }
    }

    #[test]
    fn first_insert_is_root() {
        let mut dom = Dom::new();
        let table = dom.insert(ElementData::new("table"));
        dom.insert(ElementData::new("template"));
        assert_eq!(dom.root(), Some(table));
    }

    #[test]
    fn parents_and_children() {
        let f = fixture();
        assert_eq!(f.dom.children(f.table), &[f.r0, f.r1]);
        assert_eq!(f.dom.children(f.r0), &[f.first, f.last]);
        assert_eq!(f.dom.parent(f.first), Some(f.r0));
        assert_eq!(f.dom.parent(f.table), None);
        assert!(f.dom.children(f.last).is_empty());
    }

    #[test]
    fn remove_row_drops_cells() {
        let mut f = fixture();
        assert_eq!(f.dom.remove(f.r0).unwrap().tag, "tr");
        assert!(!f.dom.contains(f.first));
        assert!(!f.dom.contains(f.last));
        assert_eq!(f.dom.children(f.table), &[f.r1]);
        assert_eq!(f.dom.len(), 2);
        assert!(f.dom.remove(f.r0).is_none());
    }

    #[test]
    fn remove_root_clears_it() {
        let mut f = fixture();
        f.dom.remove(f.table);
        assert!(f.dom.is_empty());
        assert_eq!(f.dom.root(), None);
    }

    #[test]
    fn clear_children_keeps_table() {
        let mut f = fixture();
        f.dom.clear_children(f.table);
        assert!(f.dom.children(f.table).is_empty());
        assert_eq!(f.dom.len(), 1);
    }

    #[test]
    fn move_to_reorders_rows() {
        let mut f = fixture();
        f.dom.move_to(f.r1, 0);
        assert_eq!(f.dom.children(f.table), &[f.r1, f.r0]);
        assert_eq!(f.dom.index_in_parent(f.r0), Some(1));
        f.dom.move_to(f.r1, 42);
        assert_eq!(f.dom.children(f.table), &[f.r0, f.r1]);
        f.dom.move_to(f.table, 1);
        assert_eq!(f.dom.index_in_parent(f.table), None);
    }

    #[test]
    fn walk_and_text_follow_document_order() {
        let f = fixture();
        assert_eq!(
            f.dom.walk_depth_first(f.table),
            vec![f.table, f.r0, f.first, f.last, f.r1]
        );
        assert_eq!(f.dom.text_content(f.r0), "AdaLovelace");
    }
}
