use crate::models::NodeId;

pub const DEFAULT_EXPLORER_WIDTH: u32 = 240;
pub const MIN_EXPLORER_WIDTH: u32 = 100;
pub const MAX_EXPLORER_WIDTH: u32 = 500;
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 192;
pub const MIN_OUTPUT_HEIGHT: u32 = 100;

/// Layout and console state that survives reloads but is not part of the
/// workspace or the editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPreferences {
    pub explorer_width: u32,
    pub output_height: u32,
    expanded_folders: Vec<NodeId>,
    pub execution_language_id: Option<u32>,
    pub input: String,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            explorer_width: DEFAULT_EXPLORER_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            expanded_folders: vec![NodeId::root()],
            execution_language_id: None,
            input: String::new(),
        }
    }
}

impl LayoutPreferences {
    pub fn expanded_folders(&self) -> &[NodeId] {
        &self.expanded_folders
    }

    pub fn set_expanded_folders(&mut self, folders: Vec<NodeId>) {
        self.expanded_folders.clear();
        for id in folders {
            if !self.expanded_folders.contains(&id) {
                self.expanded_folders.push(id);
            }
        }
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded_folders.contains(id)
    }

    /// Returns the new expansion state.
    pub fn toggle_folder(&mut self, id: &NodeId) -> bool {
        if let Some(pos) = self.expanded_folders.iter().position(|f| f == id) {
            self.expanded_folders.remove(pos);
            false
        } else {
            self.expanded_folders.push(id.clone());
            true
        }
    }

    /// Drops expansion entries for ids that no longer exist.
    pub fn forget(&mut self, removed: &[NodeId]) -> bool {
        let before = self.expanded_folders.len();
        self.expanded_folders.retain(|id| !removed.contains(id));
        before != self.expanded_folders.len()
    }

    pub fn set_explorer_width(&mut self, width: u32) -> bool {
        let width = width.clamp(MIN_EXPLORER_WIDTH, MAX_EXPLORER_WIDTH);
        let changed = width != self.explorer_width;
        self.explorer_width = width;
        changed
    }

    /// The console may grow up to 80% of the viewport height.
    pub fn set_output_height(&mut self, height: u32, viewport_height: u32) -> bool {
        let max = (viewport_height.saturating_mul(4) / 5).max(MIN_OUTPUT_HEIGHT);
        let height = height.clamp(MIN_OUTPUT_HEIGHT, max);
        let changed = height != self.output_height;
        self.output_height = height;
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preferences.rs"]
mod tests;
