//! Workspace tree: the folder/file hierarchy and its structural invariants.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};

use super::node::{Node, NodeId, NodeKind};

new_key_type! { struct NodeKey; }

const FILE_ID_PREFIX: &str = "file";
const FOLDER_ID_PREFIX: &str = "folder";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NotFound(NodeId),
    #[error("not a folder: {0}")]
    InvalidTarget(NodeId),
    #[error("cannot move {id} into its own subtree at {target}")]
    CycleDetected { id: NodeId, target: NodeId },
    #[error("moving {0} would not change the tree")]
    NoOp(NodeId),
    #[error("malformed workspace: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
enum Body {
    File { content: String },
    Folder { children: Vec<NodeKey> },
}

#[derive(Debug, Clone)]
struct Entry {
    id: NodeId,
    name: String,
    parent: Option<NodeKey>,
    body: Body,
}

impl Entry {
    fn kind(&self) -> NodeKind {
        match self.body {
            Body::File { .. } => NodeKind::File,
            Body::Folder { .. } => NodeKind::Folder,
        }
    }

    fn children(&self) -> &[NodeKey] {
        match &self.body {
            Body::File { .. } => &[],
            Body::Folder { children } => children,
        }
    }
}

/// Arena-backed workspace tree.
///
/// Nodes carry an explicit parent key and are indexed by id, but callers only
/// ever see ids and read-only [`NodeRef`] views; parent links stay internal.
#[derive(Debug, Clone)]
pub struct WorkspaceTree {
    arena: SlotMap<NodeKey, Entry>,
    root: NodeKey,
    index: FxHashMap<NodeId, NodeKey>,
    next_seq: u64,
}

impl WorkspaceTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut arena = SlotMap::with_key();
        let root_id = NodeId::root();
        let root = arena.insert(Entry {
            id: root_id.clone(),
            name: root_name.into(),
            parent: None,
            body: Body::Folder {
                children: Vec::new(),
            },
        });

        let mut index = FxHashMap::default();
        index.insert(root_id, root);

        Self {
            arena,
            root,
            index,
            next_seq: 1,
        }
    }

    /// Rebuilds a tree from its owned form.
    ///
    /// The root must be a folder with id `root` and every id must be unique.
    pub fn from_snapshot(root: &Node) -> Result<Self, TreeError> {
        let Node::Folder { id, name, children } = root else {
            return Err(TreeError::Malformed("root is not a folder".into()));
        };
        if !id.is_root() {
            return Err(TreeError::Malformed(format!("unexpected root id {id}")));
        }

        let mut tree = Self::new(name.clone());
        let mut stack: Vec<(NodeKey, &Node)> =
            children.iter().rev().map(|child| (tree.root, child)).collect();

        while let Some((parent, node)) = stack.pop() {
            if tree.index.contains_key(node.id()) {
                return Err(TreeError::Malformed(format!("duplicate id {}", node.id())));
            }
            let body = match node {
                Node::File { content, .. } => Body::File {
                    content: content.clone(),
                },
                Node::Folder { .. } => Body::Folder {
                    children: Vec::new(),
                },
            };
            let key = tree.attach(parent, node.id().clone(), node.name().to_string(), body);
            for child in node.children().iter().rev() {
                stack.push((key, child));
            }
            tree.reserve(node.id());
        }

        Ok(tree)
    }

    /// Rebuilds the owned recursive form of the whole tree.
    pub fn snapshot(&self) -> Node {
        self.build_node(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        NodeId::root()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            key: self.root,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Makes sure future ids never collide with `id`, even after it is deleted.
    pub fn reserve(&mut self, id: &NodeId) {
        let raw = id.as_str();
        let suffix = raw
            .strip_prefix(FOLDER_ID_PREFIX)
            .or_else(|| raw.strip_prefix(FILE_ID_PREFIX));
        if let Some(next) = suffix
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(|seq| seq.checked_add(1))
        {
            self.next_seq = self.next_seq.max(next);
        }
    }

    pub fn reserve_seq(&mut self, next_seq: u64) {
        self.next_seq = self.next_seq.max(next_seq);
    }

    fn mint(&mut self, kind: NodeKind) -> NodeId {
        let prefix = match kind {
            NodeKind::File => FILE_ID_PREFIX,
            NodeKind::Folder => FOLDER_ID_PREFIX,
        };
        loop {
            let seq = self.next_seq;
            let Some(next) = seq.checked_add(1) else {
                return self.mint_unused(prefix);
            };
            self.next_seq = next;
            let id = NodeId::new(format!("{prefix}{seq}"));
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Lowest free id once the sequence is exhausted.
    fn mint_unused(&self, prefix: &str) -> NodeId {
        let mut seq: u64 = 1;
        loop {
            let id = NodeId::new(format!("{prefix}{seq}"));
            if !self.index.contains_key(&id) {
                return id;
            }
            seq += 1;
        }
    }

    fn key(&self, id: &NodeId) -> Result<NodeKey, TreeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    fn folder_key(&self, id: &NodeId) -> Result<NodeKey, TreeError> {
        let key = self.index.get(id).copied();
        match key.and_then(|k| self.arena.get(k).map(|e| (k, e.kind()))) {
            Some((key, NodeKind::Folder)) => Ok(key),
            _ => Err(TreeError::InvalidTarget(id.clone())),
        }
    }

    fn attach(&mut self, parent: NodeKey, id: NodeId, name: String, body: Body) -> NodeKey {
        let key = self.arena.insert(Entry {
            id: id.clone(),
            name,
            parent: Some(parent),
            body,
        });
        if let Some(Body::Folder { children }) = self.arena.get_mut(parent).map(|e| &mut e.body) {
            children.push(key);
        }
        self.index.insert(id, key);
        key
    }

    fn detach(&mut self, key: NodeKey) {
        let Some(parent) = self.arena.get(key).and_then(|e| e.parent) else {
            return;
        };
        if let Some(Body::Folder { children }) = self.arena.get_mut(parent).map(|e| &mut e.body) {
            children.retain(|&child| child != key);
        }
    }

    pub fn create_file(
        &mut self,
        parent: &NodeId,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let parent = self.folder_key(parent)?;
        let id = self.mint(NodeKind::File);
        self.attach(
            parent,
            id.clone(),
            name.into(),
            Body::File {
                content: content.into(),
            },
        );
        Ok(id)
    }

    /// Appends a file directly under the root, which is always a folder.
    pub fn create_root_file(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> NodeId {
        let id = self.mint(NodeKind::File);
        let root = self.root;
        self.attach(
            root,
            id.clone(),
            name.into(),
            Body::File {
                content: content.into(),
            },
        );
        id
    }

    pub fn create_folder(
        &mut self,
        parent: &NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        let parent = self.folder_key(parent)?;
        let id = self.mint(NodeKind::Folder);
        self.attach(
            parent,
            id.clone(),
            name.into(),
            Body::Folder {
                children: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Sibling names are not required to be unique.
    pub fn rename(&mut self, id: &NodeId, new_name: impl Into<String>) -> Result<(), TreeError> {
        let key = self.key(id)?;
        if let Some(entry) = self.arena.get_mut(key) {
            entry.name = new_name.into();
        }
        Ok(())
    }

    /// Overwrites a file's content. Folders have no content.
    pub fn set_content(&mut self, id: &NodeId, content: impl Into<String>) -> Result<(), TreeError> {
        let key = self.key(id)?;
        match self.arena.get_mut(key).map(|e| &mut e.body) {
            Some(Body::File { content: slot }) => {
                *slot = content.into();
                Ok(())
            }
            _ => Err(TreeError::InvalidTarget(id.clone())),
        }
    }

    /// Removes `id` and its whole subtree, returning every removed id
    /// (the node itself first).
    pub fn delete(&mut self, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if id.is_root() {
            return Err(TreeError::NotFound(id.clone()));
        }
        let key = self.key(id)?;
        self.detach(key);

        let mut removed = Vec::new();
        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            if let Some(entry) = self.arena.remove(key) {
                if let Body::Folder { children } = &entry.body {
                    stack.extend(children.iter().rev().copied());
                }
                self.index.remove(&entry.id);
                removed.push(entry.id);
            }
        }
        Ok(removed)
    }

    /// Relocates `id` to the end of `target`'s children.
    pub fn move_node(&mut self, id: &NodeId, target: &NodeId) -> Result<(), TreeError> {
        let key = self.key(id)?;
        let target_key = self.key(target)?;
        if key == target_key {
            return Err(TreeError::NoOp(id.clone()));
        }
        if self.arena.get(target_key).map(Entry::kind) != Some(NodeKind::Folder) {
            return Err(TreeError::InvalidTarget(target.clone()));
        }
        if self.is_ancestor(key, target_key) {
            return Err(TreeError::CycleDetected {
                id: id.clone(),
                target: target.clone(),
            });
        }
        let old_parent = self.arena.get(key).and_then(|e| e.parent);
        if old_parent == Some(target_key) {
            return Err(TreeError::NoOp(id.clone()));
        }

        self.detach(key);
        if let Some(Body::Folder { children }) =
            self.arena.get_mut(target_key).map(|e| &mut e.body)
        {
            children.push(key);
        }
        if let Some(entry) = self.arena.get_mut(key) {
            entry.parent = Some(target_key);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeKey, mut descendant: NodeKey) -> bool {
        while let Some(node) = self.arena.get(descendant) {
            match node.parent {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => descendant = parent,
                None => break,
            }
        }
        false
    }

    pub fn find(&self, id: &NodeId) -> Option<NodeRef<'_>> {
        self.index.get(id).map(|&key| NodeRef { tree: self, key })
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<NodeRef<'_>> {
        self.find(id).and_then(|node| node.parent())
    }

    /// Every id strictly below `id`, in depth-first pre-order.
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(&key) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.arena[key].children().iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            if let Some(entry) = self.arena.get(key) {
                out.push(entry.id.clone());
                stack.extend(entry.children().iter().rev().copied());
            }
        }
        out
    }

    /// All files in depth-first pre-order.
    pub fn files(&self) -> Vec<NodeRef<'_>> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            if let Some(entry) = self.arena.get(key) {
                if entry.kind() == NodeKind::File {
                    out.push(NodeRef { tree: self, key });
                }
                stack.extend(entry.children().iter().rev().copied());
            }
        }
        out
    }

    fn build_node(&self, key: NodeKey) -> Node {
        let entry = &self.arena[key];
        match &entry.body {
            Body::File { content } => Node::file(entry.id.clone(), entry.name.clone(), content.clone()),
            Body::Folder { children } => Node::folder(
                entry.id.clone(),
                entry.name.clone(),
                children.iter().map(|&child| self.build_node(child)).collect(),
            ),
        }
    }
}

/// Read-only view of one node in a [`WorkspaceTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a WorkspaceTree,
    key: NodeKey,
}

impl<'a> NodeRef<'a> {
    fn entry(&self) -> &'a Entry {
        &self.tree.arena[self.key]
    }

    pub fn id(&self) -> &'a NodeId {
        &self.entry().id
    }

    pub fn name(&self) -> &'a str {
        &self.entry().name
    }

    pub fn kind(&self) -> NodeKind {
        self.entry().kind()
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn content(&self) -> Option<&'a str> {
        match &self.entry().body {
            Body::File { content } => Some(content),
            Body::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.entry()
            .children()
            .iter()
            .map(move |&key| NodeRef { tree, key })
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        self.entry().parent.map(|key| NodeRef { tree, key })
    }

    pub fn to_node(&self) -> Node {
        self.tree.build_node(self.key)
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", self.id())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: String,
    pub kind: NodeKind,
    pub is_expanded: bool,
}

impl WorkspaceTree {
    /// Visible rows for a tree view, children in insertion order.
    /// The root itself is not emitted.
    pub fn flatten_for_view(&self, expanded: &FxHashSet<NodeId>) -> Vec<TreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeKey, u16)> = vec![(self.root, 0)];

        while let Some((key, depth)) = stack.pop() {
            let Some(entry) = self.arena.get(key) else {
                continue;
            };
            let is_expanded = key == self.root || expanded.contains(&entry.id);
            if key != self.root {
                result.push(TreeRow {
                    id: entry.id.clone(),
                    depth,
                    name: entry.name.clone(),
                    kind: entry.kind(),
                    is_expanded: is_expanded && entry.kind() == NodeKind::Folder,
                });
            }
            if is_expanded {
                let child_depth = if key == self.root { depth } else { depth + 1 };
                for &child in entry.children().iter().rev() {
                    stack.push((child, child_depth));
                }
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/workspace_tree.rs"]
mod tests;
