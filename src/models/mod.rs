//! Data model layer

pub mod node;
pub mod workspace_tree;

pub use node::{Node, NodeId, NodeKind, ROOT_ID};
pub use workspace_tree::{NodeRef, TreeError, TreeRow, WorkspaceTree};
