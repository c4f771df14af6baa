//! Editing session: open files, active/secondary selection and split view.

use serde::{Deserialize, Serialize};

use super::language::LanguageTag;
use crate::models::NodeId;

pub const MIN_SPLIT_RATIO: f32 = 0.2;
pub const MAX_SPLIT_RATIO: f32 = 0.8;
pub const DEFAULT_SPLIT_RATIO: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("file is not open: {0}")]
    NotFound(NodeId),
    #[error("cannot close the last open file")]
    LastFileProtected,
    #[error("split view is not active")]
    SplitViewInactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenFile {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: LanguageTag,
    #[serde(default, rename = "languageId")]
    pub language_id: Option<u32>,
}

impl OpenFile {
    pub fn new(id: NodeId, name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            language: LanguageTag::from_file_name(&name),
            name,
            content: content.into(),
            language_id: None,
        }
    }

    pub fn with_language_id(mut self, language_id: Option<u32>) -> Self {
        self.language_id = language_id;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPane {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    open_files: Vec<OpenFile>,
    active: NodeId,
    secondary: Option<NodeId>,
    split_view: bool,
    split_ratio: f32,
}

impl Session {
    pub fn new(first: OpenFile) -> Self {
        Self {
            active: first.id.clone(),
            open_files: vec![first],
            secondary: None,
            split_view: false,
            split_ratio: DEFAULT_SPLIT_RATIO,
        }
    }

    /// Rebuilds a session from persisted parts, repairing whatever no longer
    /// holds: duplicate entries are dropped, a dangling active id falls back to
    /// the first entry, a dangling secondary is cleared and the ratio is clamped.
    ///
    /// Returns `None` when there is no file to open.
    pub fn restore(
        open_files: Vec<OpenFile>,
        active: Option<NodeId>,
        secondary: Option<NodeId>,
        split_view: bool,
        split_ratio: f32,
    ) -> Option<Self> {
        let mut files: Vec<OpenFile> = Vec::with_capacity(open_files.len());
        for file in open_files {
            if !files.iter().any(|f| f.id == file.id) {
                files.push(file);
            }
        }
        let first = files.first()?.id.clone();

        let mut session = Self {
            active: first,
            open_files: files,
            secondary: None,
            split_view,
            split_ratio: DEFAULT_SPLIT_RATIO,
        };
        session.set_split_ratio(split_ratio);
        if let Some(active) = active.filter(|id| session.is_open(id)) {
            session.active = active;
        }
        session.secondary = secondary.filter(|id| session.is_open(id));
        session.split_view = split_view && session.secondary.is_some();
        Some(session)
    }

    pub fn open_files(&self) -> &[OpenFile] {
        &self.open_files
    }

    pub fn len(&self) -> usize {
        self.open_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_files.is_empty()
    }

    pub fn active_id(&self) -> &NodeId {
        &self.active
    }

    pub fn secondary_id(&self) -> Option<&NodeId> {
        self.secondary.as_ref()
    }

    pub fn split_view(&self) -> bool {
        self.split_view
    }

    pub fn split_ratio(&self) -> f32 {
        self.split_ratio
    }

    pub fn is_open(&self, id: &NodeId) -> bool {
        self.open_files.iter().any(|f| &f.id == id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&OpenFile> {
        self.open_files.iter().find(|f| &f.id == id)
    }

    fn get_mut(&mut self, id: &NodeId) -> Result<&mut OpenFile, SessionError> {
        self.open_files
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))
    }

    pub fn active_file(&self) -> Option<&OpenFile> {
        self.get(&self.active)
    }

    /// The file shown in the second pane, only while split view is on.
    pub fn secondary_file(&self) -> Option<&OpenFile> {
        if !self.split_view {
            return None;
        }
        self.secondary.as_ref().and_then(|id| self.get(id))
    }

    /// Appends `file` unless an entry with its id is already open.
    /// Never changes the active file. Returns whether anything was added.
    pub fn open(&mut self, file: OpenFile) -> bool {
        if self.is_open(&file.id) {
            return false;
        }
        self.open_files.push(file);
        true
    }

    pub fn set_active(&mut self, id: &NodeId) -> Result<bool, SessionError> {
        if !self.is_open(id) {
            return Err(SessionError::NotFound(id.clone()));
        }
        if &self.active == id {
            return Ok(false);
        }
        self.active = id.clone();
        Ok(true)
    }

    /// `Some` also turns split view on; `None` only clears the secondary.
    pub fn set_secondary(&mut self, id: Option<&NodeId>) -> Result<bool, SessionError> {
        let prev = (self.secondary.clone(), self.split_view);
        match id {
            Some(id) => {
                if !self.is_open(id) {
                    return Err(SessionError::NotFound(id.clone()));
                }
                self.secondary = Some(id.clone());
                self.split_view = true;
            }
            None => self.secondary = None,
        }
        Ok(prev != (self.secondary.clone(), self.split_view))
    }

    /// Puts `id` into one of the two editor panes.
    pub fn assign_to_pane(&mut self, pane: EditorPane, id: &NodeId) -> Result<bool, SessionError> {
        match pane {
            EditorPane::Primary => self.set_active(id),
            EditorPane::Secondary => self.set_secondary(Some(id)),
        }
    }

    pub fn close(&mut self, id: &NodeId) -> Result<(), SessionError> {
        let index = self
            .open_files
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        if self.open_files.len() == 1 {
            return Err(SessionError::LastFileProtected);
        }

        self.open_files.remove(index);
        if &self.active == id {
            if let Some(first) = self.open_files.first() {
                self.active = first.id.clone();
            }
        }
        if self.secondary.as_ref() == Some(id) {
            self.secondary = None;
            self.split_view = false;
        }
        Ok(())
    }

    pub fn update_content(&mut self, id: &NodeId, content: impl Into<String>) -> Result<(), SessionError> {
        self.get_mut(id)?.content = content.into();
        Ok(())
    }

    /// Renames an open file and re-derives its language tag from the new name.
    pub fn rename_file(&mut self, id: &NodeId, name: impl Into<String>) -> Result<(), SessionError> {
        let file = self.get_mut(id)?;
        file.name = name.into();
        file.language = LanguageTag::from_file_name(&file.name);
        Ok(())
    }

    /// Explicit language override from the language picker.
    pub fn set_language(
        &mut self,
        id: &NodeId,
        language: LanguageTag,
        language_id: Option<u32>,
    ) -> Result<(), SessionError> {
        let file = self.get_mut(id)?;
        file.language = language;
        file.language_id = language_id;
        Ok(())
    }

    pub fn set_language_id(&mut self, id: &NodeId, language_id: Option<u32>) -> Result<bool, SessionError> {
        let file = self.get_mut(id)?;
        let changed = file.language_id != language_id;
        file.language_id = language_id;
        Ok(changed)
    }

    pub fn swap_active_and_secondary(&mut self) -> Result<(), SessionError> {
        let secondary = match (&self.secondary, self.split_view) {
            (Some(secondary), true) => secondary.clone(),
            _ => return Err(SessionError::SplitViewInactive),
        };
        self.secondary = Some(std::mem::replace(&mut self.active, secondary));
        Ok(())
    }

    /// Clamps into `[0.2, 0.8]`; non-finite values are ignored.
    pub fn set_split_ratio(&mut self, ratio: f32) -> bool {
        if !ratio.is_finite() {
            return false;
        }
        let ratio = ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO);
        let changed = ratio != self.split_ratio;
        self.split_ratio = ratio;
        changed
    }

    pub fn set_split_view(&mut self, on: bool) -> bool {
        let changed = self.split_view != on;
        self.split_view = on;
        changed
    }

    /// First open file other than the active one.
    pub fn first_inactive(&self) -> Option<&OpenFile> {
        self.open_files.iter().find(|f| f.id != self.active)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
