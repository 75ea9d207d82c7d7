use std::collections::HashMap;

use snafu::{OptionExt, Snafu, ensure};
use tracing::debug;

use super::node::{DirectoryNode, NodeId};
use crate::ext::PathSegmentsExt;

/// Arena holding every directory of the namespace.
///
/// Nodes are addressed by [`NodeId`]; the sentinel root has an empty name, no
/// parent, and is never removed. Everything else is reachable from the root
/// through `children` links, and removed subtrees are dropped from the arena
/// right away. Ids are never reused, so a stale id resolves to nothing.
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    nodes: HashMap<NodeId, DirectoryNode>,
    root: NodeId,
    next_id: usize,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, DirectoryNode::new("", None));

        DirectoryTree {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of directories, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.nodes.get(&id)
    }

    /// Walks `path` from the root without creating anything.
    ///
    /// An empty path resolves to nothing; a path consisting only of slashes
    /// resolves to the root.
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        path.path_segments()
            .try_fold(self.root(), |current, segment| {
                self.node(current)?.get_child(segment)
            })
    }

    /// Creates every missing directory along `path`, like `mkdir -p`.
    pub fn create(&mut self, path: &str) -> Result<NodeId, DirectoryError> {
        ensure!(!path.is_empty(), InvalidPathSnafu { path });

        let mut current = self.root();
        for segment in path.path_segments() {
            current = match self.node(current).and_then(|node| node.get_child(segment)) {
                Some(child) => child,
                None => self.attach_new(current, segment),
            };
        }

        Ok(current)
    }

    /// Re-parents the directory at `source_path` under `destination_path`.
    ///
    /// A child of the destination with the same name is replaced and its
    /// subtree dropped. Nothing is mutated unless every check passes.
    pub fn move_directory(
        &mut self,
        source_path: &str,
        destination_path: &str,
    ) -> Result<NodeId, DirectoryError> {
        let source = self
            .resolve(source_path)
            .context(SourceNotFoundSnafu { path: source_path })?;
        let destination = self
            .resolve(destination_path)
            .context(DestinationNotFoundSnafu { path: source_path })?;

        ensure!(
            source != self.root,
            RootDirectorySnafu {
                action: "move",
                path: source_path,
            }
        );
        ensure!(
            !self.is_within(destination, source),
            MoveIntoItselfSnafu {
                path: source_path,
                destination: destination_path,
            }
        );

        let name = self.detach(source).context(SourceNotFoundSnafu { path: source_path })?;

        let replaced = self
            .nodes
            .get_mut(&destination)
            .and_then(|node| node.add_child(name.clone(), source));
        if let Some(node) = self.nodes.get_mut(&source) {
            node.set_parent(Some(destination));
        }

        if let Some(replaced) = replaced.filter(|replaced| *replaced != source) {
            let reclaimed = self.reclaim(replaced);
            debug!(
                "Moving '{}' replaced an existing '{}' under '{}', dropped {} directories",
                source_path, name, destination_path, reclaimed
            );
        }
        debug!(
            "Moved '{}' to '{}'",
            source_path,
            self.path_of(source).unwrap_or_default()
        );

        Ok(source)
    }

    /// Removes the directory at `path` together with its subtree.
    ///
    /// Returns `Ok(false)` when the path does not exist.
    pub fn delete(&mut self, path: &str) -> Result<bool, DirectoryError> {
        let Some(target) = self.resolve(path) else {
            return Ok(false);
        };
        ensure!(
            target != self.root,
            RootDirectorySnafu {
                action: "delete",
                path,
            }
        );

        self.detach(target);
        let reclaimed = self.reclaim(target);
        debug!("Deleted '{}' ({} directories)", path, reclaimed);

        Ok(true)
    }

    /// Full slash-separated path of `id`, or `None` for ids no longer in the tree.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent() {
            names.push(current.name());
            current = self.node(parent)?;
        }
        names.reverse();
        Some(names.join("/"))
    }

    /// Depth-first pre-order walk below the root, siblings in name order.
    ///
    /// The visitor receives the depth (1 for children of the root) and the node.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(usize, &DirectoryNode),
    {
        let mut pending = vec![(self.root(), 0)];

        while let Some((id, depth)) = pending.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if depth > 0 {
                visitor(depth, node);
            }
            // Reversed so the smallest name is popped first.
            pending.extend(node.children().rev().map(|(_, child)| (child, depth + 1)));
        }
    }

    fn attach_new(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes.insert(id, DirectoryNode::new(name, Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.add_child(name, id);
        }
        debug!("Created directory '{}' as {} under {}", name, id, parent);

        id
    }

    /// Unlinks `id` from its parent and returns its name. The node stays in the arena.
    fn detach(&mut self, id: NodeId) -> Option<String> {
        let node = self.nodes.get_mut(&id)?;
        let name = node.name().to_string();
        let parent = node.parent();
        node.set_parent(None);

        if let Some(parent_node) = parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent_node.remove_child(&name);
        }

        Some(name)
    }

    /// Drops `id` and all of its descendants from the arena.
    fn reclaim(&mut self, id: NodeId) -> usize {
        let mut pending = vec![id];
        let mut reclaimed = 0;

        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children().map(|(_, child)| child));
                reclaimed += 1;
            }
        }

        reclaimed
    }

    /// Whether `candidate` is `ancestor` itself or lies somewhere below it.
    fn is_within(&self, candidate: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(DirectoryNode::parent);
        }
        false
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum DirectoryError {
    #[snafu(display("Invalid path: {path}"))]
    InvalidPath { path: String },
    #[snafu(display("Cannot move {path} - source does not exist"))]
    SourceNotFound { path: String },
    #[snafu(display("Cannot move {path} - destination does not exist"))]
    DestinationNotFound { path: String },
    #[snafu(display("Cannot move {path} - destination {destination} is inside it"))]
    MoveIntoItself { path: String, destination: String },
    #[snafu(display("Cannot {action} {path} - it is the root directory"))]
    RootDirectory { action: &'static str, path: String },
}
