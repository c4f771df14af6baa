use super::language::CPP_TEMPLATE;
use super::preferences::LayoutPreferences;
use super::session::{OpenFile, Session};
use crate::models::WorkspaceTree;

pub const DEFAULT_ROOT_NAME: &str = "Workspace";
pub const DEFAULT_FILE_NAME: &str = "main.cpp";

/// Everything the workspace persists: the tree, the editing session and the
/// layout preferences.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    pub tree: WorkspaceTree,
    pub session: Session,
    pub preferences: LayoutPreferences,
}

impl WorkspaceState {
    pub fn new(tree: WorkspaceTree, session: Session, preferences: LayoutPreferences) -> Self {
        Self {
            tree,
            session,
            preferences,
        }
    }

    /// A root folder holding one C++ starter file, opened and active.
    pub fn default_tree_and_session() -> (WorkspaceTree, Session) {
        let mut tree = WorkspaceTree::new(DEFAULT_ROOT_NAME);
        let id = tree.create_root_file(DEFAULT_FILE_NAME, CPP_TEMPLATE);
        let session = Session::new(OpenFile::new(id, DEFAULT_FILE_NAME, CPP_TEMPLATE));
        (tree, session)
    }

    /// Session opened on the first file of `tree`, or on a fresh starter file
    /// added to it when the tree has none.
    pub fn session_for_tree(tree: &mut WorkspaceTree) -> Session {
        let first = tree
            .files()
            .first()
            .map(|node| OpenFile::new(node.id().clone(), node.name(), node.content().unwrap_or_default()));
        match first {
            Some(file) => Session::new(file),
            None => {
                let id = tree.create_root_file(DEFAULT_FILE_NAME, CPP_TEMPLATE);
                Session::new(OpenFile::new(id, DEFAULT_FILE_NAME, CPP_TEMPLATE))
            }
        }
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        let (tree, session) = Self::default_tree_and_session();
        Self::new(tree, session, LayoutPreferences::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
