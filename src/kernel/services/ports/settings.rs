use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::kernel::language::DEFAULT_EXECUTION_LANGUAGE_ID;

pub const ENV_DATA_DIR: &str = "CODEPLAY_DATA_DIR";
pub const ENV_DEFAULT_LANGUAGE_ID: &str = "CODEPLAY_DEFAULT_LANGUAGE_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Execution language used when nothing was saved yet.
    #[serde(default = "default_language_id")]
    pub default_language_id: u32,
    /// Where workspace state lives; the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// `EnvFilter` directive for the log file, e.g. `codeplay=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_app_name() -> String {
    "Code Playground".to_string()
}

fn default_language_id() -> u32 {
    DEFAULT_EXECUTION_LANGUAGE_ID
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            default_language_id: default_language_id(),
            data_dir: None,
            log_filter: None,
        }
    }
}

impl Settings {
    /// Applies `CODEPLAY_*` overrides read through `var`. Unparsable values
    /// are ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(id) = var(ENV_DEFAULT_LANGUAGE_ID).and_then(|v| v.trim().parse().ok()) {
            self.default_language_id = id;
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
