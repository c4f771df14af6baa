//! Owned workspace nodes, as persisted and as handed to tree-view consumers.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROOT_ID: &str = "root";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(CompactString);

impl NodeId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn root() -> Self {
        Self(CompactString::new(ROOT_ID))
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Folder,
}

/// A file or folder with its whole subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        id: NodeId,
        name: String,
        #[serde(default)]
        content: String,
    },
    Folder {
        id: NodeId,
        name: String,
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn file(id: impl Into<NodeId>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::File {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Folder {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Self::File { id, .. } | Self::Folder { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File { .. } => NodeKind::File,
            Self::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::File { .. } => &[],
            Self::Folder { children, .. } => children,
        }
    }
}
