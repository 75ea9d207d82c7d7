use std::collections::BTreeMap;

use derive_more::Display;

/// Handle of a directory stored in a [`DirectoryTree`](super::DirectoryTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct NodeId(pub(super) usize);

/// A single named directory.
///
/// The parent is a plain back-reference; ownership flows from the tree arena
/// down through `children`, which is kept sorted by name so that walks are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    name: String,
    parent: Option<NodeId>,
    children: BTreeMap<String, NodeId>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        DirectoryNode {
            name: name.into(),
            parent,
            children: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(super) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Inserts `child` under `name`, replacing any previous entry.
    /// Returns the replaced child, if there was one.
    pub fn add_child(&mut self, name: impl Into<String>, child: NodeId) -> Option<NodeId> {
        self.children.insert(name.into(), child)
    }

    pub fn get_child(&self, name: &str) -> Option<NodeId> {
        if !self.has_children() {
            return None;
        }
        self.children.get(name).copied()
    }

    pub fn remove_child(&mut self, name: &str) -> Option<NodeId> {
        self.children.remove(name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children in ascending name order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_no_children() {
        let node = DirectoryNode::new("fruits", Some(NodeId(0)));

        assert_eq!(node.name(), "fruits");
        assert_eq!(node.parent(), Some(NodeId(0)));
        assert!(!node.has_children());
        assert_eq!(node.get_child("apples"), None);
    }

    #[test]
    fn test_add_and_get_child() {
        let mut node = DirectoryNode::new("fruits", None);

        assert_eq!(node.add_child("apples", NodeId(1)), None);

        assert!(node.has_children());
        assert_eq!(node.get_child("apples"), Some(NodeId(1)));
        assert_eq!(node.get_child("pears"), None);
    }

    #[test]
    fn test_add_child_overwrites_same_name() {
        let mut node = DirectoryNode::new("fruits", None);
        node.add_child("apples", NodeId(1));

        let replaced = node.add_child("apples", NodeId(2));

        assert_eq!(replaced, Some(NodeId(1)));
        assert_eq!(node.get_child("apples"), Some(NodeId(2)));
        assert_eq!(node.children().count(), 1);
    }

    #[test]
    fn test_remove_child_is_noop_when_absent() {
        let mut node = DirectoryNode::new("fruits", None);
        node.add_child("apples", NodeId(1));

        assert_eq!(node.remove_child("pears"), None);
        assert_eq!(node.remove_child("apples"), Some(NodeId(1)));
        assert_eq!(node.remove_child("apples"), None);
        assert!(!node.has_children());
    }

    #[test]
    fn test_children_are_sorted_by_name() {
        let mut node = DirectoryNode::new("", None);
        node.add_child("vegetables", NodeId(1));
        node.add_child("fruits", NodeId(2));
        node.add_child("grains", NodeId(3));

        let names = node.children().map(|(name, _)| name).collect::<Vec<_>>();

        assert_eq!(names, vec!["fruits", "grains", "vegetables"]);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
