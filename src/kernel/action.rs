use super::language::LanguageTag;
use super::session::EditorPane;
use crate::models::NodeId;

/// User intents reported by the tree view, tab strip and panels.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateFile {
        parent: NodeId,
        name: String,
        content: String,
    },
    CreateFolder {
        parent: NodeId,
        name: String,
    },
    NewFile {
        parent: NodeId,
    },
    ImportFile {
        name: String,
        content: String,
        pane: EditorPane,
    },
    Rename {
        id: NodeId,
        name: String,
    },
    Delete {
        id: NodeId,
    },
    Move {
        id: NodeId,
        target: NodeId,
    },
    OpenNode {
        id: NodeId,
    },
    SelectFile {
        id: NodeId,
    },
    SetActive {
        id: NodeId,
    },
    SetSecondary {
        id: Option<NodeId>,
    },
    AssignToPane {
        pane: EditorPane,
        id: NodeId,
    },
    CloseFile {
        id: NodeId,
    },
    UpdateContent {
        id: NodeId,
        content: String,
    },
    SetLanguage {
        id: NodeId,
        language: LanguageTag,
        language_id: Option<u32>,
    },
    SwapPanes,
    ToggleSplitView,
    SetSplitRatio {
        ratio: f32,
    },
    ToggleFolder {
        id: NodeId,
    },
    SetExplorerWidth {
        width: u32,
    },
    SetOutputHeight {
        height: u32,
        viewport_height: u32,
    },
    SetExecutionLanguage {
        id: u32,
    },
    SetInput {
        text: String,
    },
}
