//! The only place that writes into both the tree and the session for a single
//! logical action.
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! tree, the session and the preferences exactly as they were. Each state
//! change queues an [`Effect::Persist`] for the storage key it touched.

use tracing::{debug, warn};

use super::language::{
    execution_language_for_file, fallback_execution_languages, pick_execution_language,
    starter_template, ExecutionLanguage, LanguageTag, DEFAULT_EXTENSION,
};
use super::preferences::LayoutPreferences;
use super::services::ports::storage::StorageKey;
use super::session::{EditorPane, OpenFile, Session, SessionError};
use super::{Action, Effect, WorkspaceState};
use crate::models::{NodeId, TreeError, WorkspaceTree};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl StoreError {
    /// A move that would not change anything. Reported, but not a failure.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Tree(TreeError::NoOp(_)))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
    pub created: Option<NodeId>,
}

struct SelectionMark {
    active: NodeId,
    secondary: Option<NodeId>,
    split_view: bool,
    split_ratio: f32,
}

pub struct Store {
    state: WorkspaceState,
    languages: Vec<ExecutionLanguage>,
    pending: Vec<Effect>,
}

impl Store {
    pub fn new(state: WorkspaceState) -> Self {
        Self {
            state,
            languages: fallback_execution_languages(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    pub fn into_state(self) -> WorkspaceState {
        self.state
    }

    pub fn tree(&self) -> &WorkspaceTree {
        &self.state.tree
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn preferences(&self) -> &LayoutPreferences {
        &self.state.preferences
    }

    pub fn execution_languages(&self) -> &[ExecutionLanguage] {
        &self.languages
    }

    pub fn selected_execution_language(&self) -> Option<&ExecutionLanguage> {
        let id = self.state.preferences.execution_language_id?;
        self.languages.iter().find(|lang| lang.id == id)
    }

    /// Drains the persistence effects queued by direct calls.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    fn persist(&mut self, key: StorageKey) {
        let effect = Effect::Persist(key);
        if !self.pending.contains(&effect) {
            self.pending.push(effect);
        }
    }

    fn mark(&self) -> SelectionMark {
        let session = &self.state.session;
        SelectionMark {
            active: session.active_id().clone(),
            secondary: session.secondary_id().cloned(),
            split_view: session.split_view(),
            split_ratio: session.split_ratio(),
        }
    }

    fn persist_selection(&mut self, before: SelectionMark) {
        let after = self.mark();
        if after.active != before.active {
            self.persist(StorageKey::ActiveFileId);
        }
        if after.secondary != before.secondary {
            self.persist(StorageKey::SecondaryFileId);
        }
        if after.split_view != before.split_view {
            self.persist(StorageKey::SplitView);
        }
        if after.split_ratio != before.split_ratio {
            self.persist(StorageKey::SplitRatio);
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult> {
        let created = match action {
            Action::CreateFile {
                parent,
                name,
                content,
            } => Some(self.create_file(&parent, name, content)?),
            Action::CreateFolder { parent, name } => Some(self.create_folder(&parent, name)?),
            Action::NewFile { parent } => Some(self.new_file(&parent)?),
            Action::ImportFile {
                name,
                content,
                pane,
            } => Some(self.import_file(name, content, pane)?),
            Action::Rename { id, name } => {
                self.rename(&id, name)?;
                None
            }
            Action::Delete { id } => {
                self.delete(&id)?;
                None
            }
            Action::Move { id, target } => {
                self.move_node(&id, &target)?;
                None
            }
            Action::OpenNode { id } => {
                self.open_from_node(&id)?;
                None
            }
            Action::SelectFile { id } => {
                self.select_file(&id)?;
                None
            }
            Action::SetActive { id } => {
                self.set_active(&id)?;
                None
            }
            Action::SetSecondary { id } => {
                self.set_secondary(id.as_ref())?;
                None
            }
            Action::AssignToPane { pane, id } => {
                self.assign_to_pane(pane, &id)?;
                None
            }
            Action::CloseFile { id } => {
                self.close(&id)?;
                None
            }
            Action::UpdateContent { id, content } => {
                self.update_content(&id, content)?;
                None
            }
            Action::SetLanguage {
                id,
                language,
                language_id,
            } => {
                self.set_language(&id, language, language_id)?;
                None
            }
            Action::SwapPanes => {
                self.swap_active_and_secondary()?;
                None
            }
            Action::ToggleSplitView => {
                self.toggle_split_view()?;
                None
            }
            Action::SetSplitRatio { ratio } => {
                self.set_split_ratio(ratio);
                None
            }
            Action::ToggleFolder { id } => {
                self.toggle_folder(&id)?;
                None
            }
            Action::SetExplorerWidth { width } => {
                self.set_explorer_width(width);
                None
            }
            Action::SetOutputHeight {
                height,
                viewport_height,
            } => {
                self.set_output_height(height, viewport_height);
                None
            }
            Action::SetExecutionLanguage { id } => {
                self.set_execution_language(id);
                None
            }
            Action::SetInput { text } => {
                self.set_input(text);
                None
            }
        };

        let effects = self.take_effects();
        Ok(DispatchResult {
            state_changed: !effects.is_empty(),
            effects,
            created,
        })
    }

    pub fn create_file(
        &mut self,
        parent: &NodeId,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<NodeId> {
        let id = self.state.tree.create_file(parent, name, content)?;
        debug!(%id, %parent, "file created");
        self.persist(StorageKey::Workspace);
        Ok(id)
    }

    pub fn create_folder(&mut self, parent: &NodeId, name: impl Into<String>) -> Result<NodeId> {
        let id = self.state.tree.create_folder(parent, name)?;
        debug!(%id, %parent, "folder created");
        self.persist(StorageKey::Workspace);
        Ok(id)
    }

    /// Renames in the tree and, when the file is open, in its tab too.
    pub fn rename(&mut self, id: &NodeId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.state.tree.rename(id, name.clone())?;
        self.persist(StorageKey::Workspace);
        if self.state.session.rename_file(id, name).is_ok() {
            self.persist(StorageKey::OpenFiles);
        }
        debug!(%id, "renamed");
        Ok(())
    }

    /// Deletes `id` with its subtree and closes the tabs that pointed into it.
    ///
    /// When a removed file is the only open tab it stays open, detached from
    /// the tree.
    pub fn delete(&mut self, id: &NodeId) -> Result<Vec<NodeId>> {
        let removed = self.state.tree.delete(id)?;
        self.persist(StorageKey::Workspace);

        let before = self.mark();
        let mut files_changed = false;
        for removed_id in &removed {
            if !self.state.session.is_open(removed_id) {
                continue;
            }
            match self.state.session.close(removed_id) {
                Ok(()) => files_changed = true,
                Err(SessionError::LastFileProtected) => {
                    warn!(id = %removed_id, "deleted file is the last open tab; keeping it open");
                }
                Err(e) => warn!(id = %removed_id, error = %e, "failed to close deleted file"),
            }
        }
        if files_changed {
            self.persist(StorageKey::OpenFiles);
        }
        self.persist_selection(before);

        if self.state.preferences.forget(&removed) {
            self.persist(StorageKey::ExpandedFolders);
        }
        debug!(%id, removed = removed.len(), "deleted");
        Ok(removed)
    }

    pub fn move_node(&mut self, id: &NodeId, target: &NodeId) -> Result<()> {
        self.state.tree.move_node(id, target)?;
        debug!(%id, %target, "moved");
        self.persist(StorageKey::Workspace);
        Ok(())
    }

    fn open_file_for(&self, id: &NodeId) -> Result<OpenFile> {
        let node = self
            .state
            .tree
            .find(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let content = node
            .content()
            .ok_or_else(|| TreeError::InvalidTarget(id.clone()))?;
        Ok(OpenFile::new(id.clone(), node.name(), content)
            .with_language_id(self.state.preferences.execution_language_id))
    }

    /// Opens a tree file as a tab without activating it. Returns whether a
    /// tab was added.
    pub fn open_from_node(&mut self, id: &NodeId) -> Result<bool> {
        let file = self.open_file_for(id)?;
        let added = self.state.session.open(file);
        if added {
            self.persist(StorageKey::OpenFiles);
        }
        Ok(added)
    }

    /// Opens a tree file if needed and makes it the active tab.
    pub fn select_file(&mut self, id: &NodeId) -> Result<()> {
        let file = self.open_file_for(id)?;
        let before = self.mark();
        if self.state.session.open(file) {
            self.persist(StorageKey::OpenFiles);
        }
        self.state.session.set_active(id)?;
        self.persist_selection(before);
        Ok(())
    }

    pub fn set_active(&mut self, id: &NodeId) -> Result<()> {
        let before = self.mark();
        self.state.session.set_active(id)?;
        self.persist_selection(before);
        Ok(())
    }

    pub fn set_secondary(&mut self, id: Option<&NodeId>) -> Result<()> {
        let before = self.mark();
        self.state.session.set_secondary(id)?;
        self.persist_selection(before);
        Ok(())
    }

    pub fn assign_to_pane(&mut self, pane: EditorPane, id: &NodeId) -> Result<()> {
        let before = self.mark();
        self.state.session.assign_to_pane(pane, id)?;
        self.persist_selection(before);
        Ok(())
    }

    pub fn close(&mut self, id: &NodeId) -> Result<()> {
        let before = self.mark();
        self.state.session.close(id)?;
        self.persist(StorageKey::OpenFiles);
        self.persist_selection(before);
        Ok(())
    }

    /// The single entry point for typed edits; mirrored into the tree file
    /// when one backs the tab.
    pub fn update_content(&mut self, id: &NodeId, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        self.state.session.update_content(id, content.as_str())?;
        self.persist(StorageKey::OpenFiles);
        if self.state.tree.set_content(id, content).is_ok() {
            self.persist(StorageKey::Workspace);
        }
        Ok(())
    }

    pub fn set_language(
        &mut self,
        id: &NodeId,
        language: LanguageTag,
        language_id: Option<u32>,
    ) -> Result<()> {
        self.state.session.set_language(id, language, language_id)?;
        self.persist(StorageKey::OpenFiles);
        Ok(())
    }

    pub fn swap_active_and_secondary(&mut self) -> Result<()> {
        let before = self.mark();
        self.state.session.swap_active_and_secondary()?;
        self.persist_selection(before);
        Ok(())
    }

    pub fn set_split_ratio(&mut self, ratio: f32) -> bool {
        let changed = self.state.session.set_split_ratio(ratio);
        if changed {
            self.persist(StorageKey::SplitRatio);
        }
        changed
    }

    /// Turning split view on without a secondary file picks the first other
    /// open file, or creates a fresh untitled file under the root.
    pub fn toggle_split_view(&mut self) -> Result<()> {
        let before = self.mark();
        let session = &self.state.session;
        if session.split_view() {
            self.state.session.set_split_view(false);
        } else if session.secondary_id().is_some() {
            self.state.session.set_split_view(true);
        } else {
            let other = session.first_inactive().map(|f| f.id.clone());
            let secondary = match other {
                Some(id) => id,
                None => {
                    let (name, content) = self.untitled();
                    let id = self.state.tree.create_root_file(name.as_str(), content);
                    self.persist(StorageKey::Workspace);
                    self.state.session.open(
                        OpenFile::new(id.clone(), name, content)
                            .with_language_id(self.state.preferences.execution_language_id),
                    );
                    self.persist(StorageKey::OpenFiles);
                    id
                }
            };
            self.state.session.set_secondary(Some(&secondary))?;
        }
        self.persist_selection(before);
        Ok(())
    }

    fn untitled(&self) -> (String, &'static str) {
        let ext = self
            .selected_execution_language()
            .map(ExecutionLanguage::default_extension)
            .unwrap_or(DEFAULT_EXTENSION);
        (format!("untitled.{ext}"), starter_template(ext))
    }

    /// Creates `untitled.<ext>` for the selected execution language, seeded
    /// with its starter template, and makes it the active tab.
    pub fn new_file(&mut self, parent: &NodeId) -> Result<NodeId> {
        let (name, content) = self.untitled();
        let id = self.state.tree.create_file(parent, name.as_str(), content)?;
        self.persist(StorageKey::Workspace);

        let before = self.mark();
        self.state.session.open(
            OpenFile::new(id.clone(), name, content)
                .with_language_id(self.state.preferences.execution_language_id),
        );
        self.persist(StorageKey::OpenFiles);
        self.state.session.set_active(&id)?;
        self.persist_selection(before);
        debug!(%id, %parent, "new file");
        Ok(id)
    }

    /// Brings in a file from outside the workspace: it gets a fresh id, lands
    /// under the root and is shown in `pane`.
    pub fn import_file(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        pane: EditorPane,
    ) -> Result<NodeId> {
        let name = name.into();
        let content = content.into();
        let language_id = execution_language_for_file(&self.languages, &name)
            .map(|lang| lang.id)
            .or(self.state.preferences.execution_language_id);

        let id = self.state.tree.create_root_file(name.as_str(), content.as_str());
        self.persist(StorageKey::Workspace);

        let before = self.mark();
        self.state
            .session
            .open(OpenFile::new(id.clone(), name, content).with_language_id(language_id));
        self.persist(StorageKey::OpenFiles);
        self.state.session.assign_to_pane(pane, &id)?;
        self.persist_selection(before);
        debug!(%id, ?pane, "imported file");
        Ok(id)
    }

    /// Returns the folder's new expansion state.
    pub fn toggle_folder(&mut self, id: &NodeId) -> Result<bool> {
        match self.state.tree.find(id) {
            Some(node) if node.is_folder() => {}
            Some(_) => return Err(TreeError::InvalidTarget(id.clone()).into()),
            None => return Err(TreeError::NotFound(id.clone()).into()),
        }
        let expanded = self.state.preferences.toggle_folder(id);
        self.persist(StorageKey::ExpandedFolders);
        Ok(expanded)
    }

    pub fn set_explorer_width(&mut self, width: u32) -> bool {
        let changed = self.state.preferences.set_explorer_width(width);
        if changed {
            self.persist(StorageKey::ExplorerWidth);
        }
        changed
    }

    pub fn set_output_height(&mut self, height: u32, viewport_height: u32) -> bool {
        let changed = self
            .state
            .preferences
            .set_output_height(height, viewport_height);
        if changed {
            self.persist(StorageKey::OutputHeight);
        }
        changed
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.state.preferences.input == text {
            return false;
        }
        self.state.preferences.input = text;
        self.persist(StorageKey::Input);
        true
    }

    /// Remembers the execution language and stamps it on the active tab.
    pub fn set_execution_language(&mut self, id: u32) -> bool {
        let mut changed = false;
        if self.state.preferences.execution_language_id != Some(id) {
            self.state.preferences.execution_language_id = Some(id);
            self.persist(StorageKey::ExecutionLanguageId);
            changed = true;
        }
        let active = self.state.session.active_id().clone();
        if let Ok(true) = self.state.session.set_language_id(&active, Some(id)) {
            self.persist(StorageKey::OpenFiles);
            changed = true;
        }
        changed
    }

    /// Installs the backend's language list and settles the selection on
    /// the saved id, the configured id or a C++ default, in that order.
    pub fn set_execution_languages(
        &mut self,
        languages: Vec<ExecutionLanguage>,
        configured: Option<u32>,
    ) {
        self.languages = languages;
        let picked = pick_execution_language(
            &self.languages,
            self.state.preferences.execution_language_id,
            configured,
        )
        .map(|lang| lang.id);
        if picked.is_some() && picked != self.state.preferences.execution_language_id {
            self.state.preferences.execution_language_id = picked;
            self.persist(StorageKey::ExecutionLanguageId);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
