//! Load/save policy on top of a [`KeyValueStore`].
//!
//! Every key is a JSON blob. Loads never fail: a missing or unreadable key
//! falls back to its default and the rest of the state still loads. Saves are
//! attempted once; failures are logged and left for the next change.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::kernel::preferences::{LayoutPreferences, MIN_OUTPUT_HEIGHT};
use crate::kernel::services::ports::storage::{KeyValueStore, Result, StorageKey};
use crate::kernel::session::{OpenFile, Session, DEFAULT_SPLIT_RATIO};
use crate::kernel::{Effect, WorkspaceState};
use crate::models::{Node, NodeId, WorkspaceTree};

#[derive(Debug, Serialize, Deserialize)]
struct WorkspaceBlob {
    root: Node,
    #[serde(default)]
    next_seq: u64,
}

/// Older saves hold the bare root node without the id sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredWorkspace {
    Current(WorkspaceBlob),
    Bare(Node),
}

pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load_json<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        match self.store.load(key) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(%key, error = %e, "discarding malformed stored value");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(%key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn load_tree(&self) -> Option<WorkspaceTree> {
        let (root, next_seq) = match self.load_json::<StoredWorkspace>(StorageKey::Workspace)? {
            StoredWorkspace::Current(blob) => (blob.root, blob.next_seq),
            StoredWorkspace::Bare(root) => (root, 0),
        };
        match WorkspaceTree::from_snapshot(&root) {
            Ok(mut tree) => {
                tree.reserve_seq(next_seq);
                Some(tree)
            }
            Err(e) => {
                warn!(error = %e, "stored workspace is invalid; using default");
                None
            }
        }
    }

    fn load_session(&self) -> Option<Session> {
        let files: Vec<OpenFile> = self.load_json(StorageKey::OpenFiles)?;
        let active: Option<NodeId> = self.load_json(StorageKey::ActiveFileId);
        let secondary: Option<NodeId> = self.load_json::<Option<NodeId>>(StorageKey::SecondaryFileId).flatten();
        let split_view: bool = self.load_json(StorageKey::SplitView).unwrap_or(false);
        let split_ratio: f32 = self
            .load_json(StorageKey::SplitRatio)
            .unwrap_or(DEFAULT_SPLIT_RATIO);
        Session::restore(files, active, secondary, split_view, split_ratio)
    }

    fn load_preferences(&self, tree: &WorkspaceTree) -> LayoutPreferences {
        let mut prefs = LayoutPreferences::default();
        if let Some(width) = self.load_json::<u32>(StorageKey::ExplorerWidth) {
            prefs.set_explorer_width(width);
        }
        if let Some(height) = self.load_json::<u32>(StorageKey::OutputHeight) {
            prefs.output_height = height.max(MIN_OUTPUT_HEIGHT);
        }
        if let Some(folders) = self.load_json::<Vec<NodeId>>(StorageKey::ExpandedFolders) {
            prefs.set_expanded_folders(folders.into_iter().filter(|id| tree.contains(id)).collect());
        }
        prefs.execution_language_id = self
            .load_json::<Option<u32>>(StorageKey::ExecutionLanguageId)
            .flatten();
        if let Some(input) = self.load_json::<String>(StorageKey::Input) {
            prefs.input = input;
        }
        prefs
    }

    /// Rehydrates everything, repairing or defaulting what cannot be used.
    pub fn load_state(&self) -> WorkspaceState {
        let (mut tree, session) = match (self.load_tree(), self.load_session()) {
            (Some(tree), Some(session)) => (tree, session),
            (Some(mut tree), None) => {
                let session = WorkspaceState::session_for_tree(&mut tree);
                (tree, session)
            }
            // Saved tab ids would collide with the ids the default tree mints.
            (None, Some(session)) => {
                warn!(open = session.len(), "stored tabs have no workspace; using default session");
                WorkspaceState::default_tree_and_session()
            }
            (None, None) => WorkspaceState::default_tree_and_session(),
        };
        // Stale tabs may still name deleted nodes.
        for file in session.open_files() {
            tree.reserve(&file.id);
        }

        let preferences = self.load_preferences(&tree);
        debug!(nodes = tree.len(), open = session.len(), "workspace loaded");
        WorkspaceState::new(tree, session, preferences)
    }

    pub fn save(&mut self, key: StorageKey, state: &WorkspaceState) -> Result<()> {
        let blob = encode(key, state)?;
        self.store.save(key, &blob)
    }

    pub fn save_all(&mut self, state: &WorkspaceState) -> usize {
        self.save_keys(StorageKey::ALL.iter().copied(), state)
    }

    /// Writes every key named by `effects`. Returns how many writes failed.
    pub fn apply(&mut self, effects: &[Effect], state: &WorkspaceState) -> usize {
        self.save_keys(
            effects.iter().map(|effect| match effect {
                Effect::Persist(key) => *key,
            }),
            state,
        )
    }

    fn save_keys(&mut self, keys: impl Iterator<Item = StorageKey>, state: &WorkspaceState) -> usize {
        let mut failed = 0;
        for key in keys {
            if let Err(e) = self.save(key, state) {
                warn!(%key, error = %e, "failed to save");
                failed += 1;
            }
        }
        failed
    }
}

fn encode(key: StorageKey, state: &WorkspaceState) -> serde_json::Result<String> {
    let session = &state.session;
    let prefs = &state.preferences;
    match key {
        StorageKey::Workspace => serde_json::to_string(&WorkspaceBlob {
            root: state.tree.snapshot(),
            next_seq: state.tree.next_seq(),
        }),
        StorageKey::OpenFiles => serde_json::to_string(session.open_files()),
        StorageKey::ActiveFileId => serde_json::to_string(session.active_id()),
        StorageKey::SecondaryFileId => serde_json::to_string(&session.secondary_id()),
        StorageKey::SplitView => serde_json::to_string(&session.split_view()),
        StorageKey::SplitRatio => serde_json::to_string(&session.split_ratio()),
        StorageKey::ExplorerWidth => serde_json::to_string(&prefs.explorer_width),
        StorageKey::OutputHeight => serde_json::to_string(&prefs.output_height),
        StorageKey::ExpandedFolders => serde_json::to_string(prefs.expanded_folders()),
        StorageKey::ExecutionLanguageId => serde_json::to_string(&prefs.execution_language_id),
        StorageKey::Input => serde_json::to_string(&prefs.input),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/persistence.rs"]
mod tests;
