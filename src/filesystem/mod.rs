//! In-memory directory namespace.
//!
//! Directories live in an arena ([`DirectoryTree`]) and refer to each other by
//! [`NodeId`](node::NodeId): each [`DirectoryNode`](node::DirectoryNode) keeps
//! its children in name order plus a non-owning link back to its parent.

mod node;
mod tree;

pub use tree::{DirectoryError, DirectoryTree};
