//! Where codeplay keeps its files.
//!
//! State and logs live under the platform data directory
//! (`~/Library/Application Support`, `$XDG_DATA_HOME` or `~/.local/share`,
//! `%APPDATA%`). The settings file lives under the cache directory.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::kernel::services::ports::settings::Settings;

const APP_DIR: &str = "codeplay";
const STORAGE_DIR: &str = "storage";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Data,
    Cache,
}

/// Resolves `base` from environment variables read through `var`.
/// Empty values count as unset.
fn platform_dir(base: Base, var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let lookup = |name: &str| var(name).filter(|v| !v.is_empty()).map(PathBuf::from);
    let home = || lookup("HOME");

    if cfg!(target_os = "macos") {
        let sub = match base {
            Base::Data => "Library/Application Support",
            Base::Cache => "Library/Caches",
        };
        home().map(|home| home.join(sub))
    } else if cfg!(windows) {
        match base {
            Base::Data => lookup("APPDATA"),
            Base::Cache => lookup("LOCALAPPDATA").or_else(|| lookup("APPDATA")),
        }
    } else {
        let (xdg, fallback) = match base {
            Base::Data => ("XDG_DATA_HOME", ".local/share"),
            Base::Cache => ("XDG_CACHE_HOME", ".cache"),
        };
        lookup(xdg).or_else(|| home().map(|home| home.join(fallback)))
    }
}

fn env_dir(base: Base) -> Option<PathBuf> {
    platform_dir(base, |name| std::env::var_os(name))
}

pub(crate) fn cache_dir() -> Option<PathBuf> {
    env_dir(Base::Cache)
}

fn app_data_dir() -> Option<PathBuf> {
    env_dir(Base::Data).map(|dir| dir.join(APP_DIR))
}

/// Storage directory: `settings.data_dir` when set, else `<data>/codeplay/storage`.
pub fn storage_dir(settings: &Settings) -> Option<PathBuf> {
    settings
        .data_dir
        .clone()
        .or_else(|| app_data_dir().map(|dir| dir.join(STORAGE_DIR)))
}

pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(LOG_DIR))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
