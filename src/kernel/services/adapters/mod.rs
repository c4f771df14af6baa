//! Service adapters: filesystem and in-memory implementations.

pub mod paths;
pub mod persistence;
pub mod settings;
pub mod storage;

pub use paths::{log_dir, storage_dir};
pub use persistence::Persistence;
pub use settings::{ensure_settings_file, get_settings_path, load_settings, resolve_settings};
pub use storage::{FileStore, MemoryStore};
