//! Contract with the remote code runner.
//!
//! The core only prepares submissions and renders finished results; talking
//! to the runner and polling it belong to the backend implementation.

use serde::{Deserialize, Serialize};

use super::language::ExecutionLanguage;
use super::store::Store;

pub const STATUS_IN_QUEUE: u32 = 1;
pub const STATUS_PROCESSING: u32 = 2;
pub const STATUS_ACCEPTED: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("no execution language selected")]
    NoLanguage,
    #[error("no code to run")]
    EmptySource,
    #[error("no submission token received")]
    MissingToken,
    #[error("execution backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub language_id: u32,
    pub source_code: String,
    pub stdin: String,
}

impl SubmissionRequest {
    /// Builds a run of the active tab with the console input as stdin.
    ///
    /// The tab's own language choice wins over the workspace-wide one.
    pub fn from_store(store: &Store) -> Result<Self, ExecutionError> {
        let file = store
            .session()
            .active_file()
            .ok_or(ExecutionError::EmptySource)?;
        if file.content.trim().is_empty() {
            return Err(ExecutionError::EmptySource);
        }
        let language_id = file
            .language_id
            .or(store.preferences().execution_language_id)
            .ok_or(ExecutionError::NoLanguage)?;

        Ok(Self {
            language_id,
            source_code: file.content.clone(),
            stdin: store.preferences().input.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionToken(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self.id, STATUS_IN_QUEUE | STATUS_PROCESSING)
    }

    pub fn is_accepted(&self) -> bool {
        self.id == STATUS_ACCEPTED
    }
}

/// A decoded runner result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<u64>,
}

impl SubmissionResult {
    /// Console text for a finished run. Empty sections are left out.
    pub fn summary(&self) -> String {
        let description = if self.status.description.is_empty() {
            "Unknown status"
        } else {
            self.status.description.as_str()
        };
        let mut out = format!("Status: {description}\n\n");

        let sections = [
            ("Compilation output:\n", &self.compile_output),
            ("Standard output:\n", &self.stdout),
            ("Standard error:\n", &self.stderr),
            ("Message: ", &self.message),
        ];
        for (label, text) in sections {
            if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
                out.push_str(label);
                out.push_str(text);
                out.push_str("\n\n");
            }
        }

        if let Some(time) = self.time.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!("Execution time: {time} seconds\n"));
        }
        if let Some(memory) = self.memory.filter(|&m| m > 0) {
            out.push_str(&format!("Memory used: {memory} KB\n"));
        }
        out
    }

    /// One-line status for the status bar.
    pub fn status_line(&self) -> String {
        if self.status.is_accepted() {
            "Execution completed successfully".to_string()
        } else {
            format!("Execution completed with status: {}", self.status.description)
        }
    }
}

pub trait ExecutionBackend {
    fn languages(&mut self) -> Result<Vec<ExecutionLanguage>, ExecutionError>;

    fn submit(&mut self, request: &SubmissionRequest) -> Result<SubmissionToken, ExecutionError>;

    /// Current state of a submission; callers poll again while
    /// [`SubmissionStatus::is_pending`] holds.
    fn poll(&mut self, token: &SubmissionToken) -> Result<SubmissionResult, ExecutionError>;
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/execution.rs"]
mod tests;
