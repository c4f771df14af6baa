//! Headless workspace core (state/action/effect).

pub mod action;
pub mod drag;
pub mod effect;
pub mod execution;
pub mod language;
pub mod preferences;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use action::Action;
pub use drag::{DragGesture, DragSource, DropTarget};
pub use effect::Effect;
pub use execution::{
    ExecutionBackend, ExecutionError, SubmissionRequest, SubmissionResult, SubmissionToken,
};
pub use language::{ExecutionLanguage, LanguageTag};
pub use preferences::LayoutPreferences;
pub use session::{EditorPane, OpenFile, Session, SessionError};
pub use state::WorkspaceState;
pub use store::{DispatchResult, Store, StoreError};
