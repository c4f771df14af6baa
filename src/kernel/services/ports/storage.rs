//! Key-value persistence contract.

use std::fmt;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Logical names under which workspace state is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Workspace,
    OpenFiles,
    ActiveFileId,
    SecondaryFileId,
    SplitView,
    SplitRatio,
    ExplorerWidth,
    OutputHeight,
    ExpandedFolders,
    ExecutionLanguageId,
    Input,
}

impl StorageKey {
    pub const ALL: [StorageKey; 11] = [
        Self::Workspace,
        Self::OpenFiles,
        Self::ActiveFileId,
        Self::SecondaryFileId,
        Self::SplitView,
        Self::SplitRatio,
        Self::ExplorerWidth,
        Self::OutputHeight,
        Self::ExpandedFolders,
        Self::ExecutionLanguageId,
        Self::Input,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "ide_workspace",
            Self::OpenFiles => "ide_files",
            Self::ActiveFileId => "ide_active_file_id",
            Self::SecondaryFileId => "ide_secondary_file_id",
            Self::SplitView => "ide_split_view",
            Self::SplitRatio => "ide_split_ratio",
            Self::ExplorerWidth => "ide_explorer_width",
            Self::OutputHeight => "ide_output_height",
            Self::ExpandedFolders => "ide_expanded_folders",
            Self::ExecutionLanguageId => "ide_selected_language_id",
            Self::Input => "ide_input",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string blobs keyed by [`StorageKey`].
pub trait KeyValueStore {
    fn load(&self, key: StorageKey) -> Result<Option<String>>;
    fn save(&mut self, key: StorageKey, blob: &str) -> Result<()>;
}
