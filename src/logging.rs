//! File logging for the binary.

use std::path::PathBuf;

use codeplay::kernel::services::adapters::log_dir;
use codeplay::kernel::services::ports::Settings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "codeplay=info";

/// `RUST_LOG`, then the `log_filter` setting, then [`DEFAULT_FILTER`].
fn filter(settings: &Settings) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    settings
        .log_filter
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Daily `codeplay.<date>.log` in the first directory that accepts it.
fn appender() -> Option<(RollingFileAppender, PathBuf)> {
    let candidates = [log_dir(), Some(std::env::temp_dir().join("codeplay-logs"))];
    candidates.into_iter().flatten().find_map(|dir| {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("codeplay")
            .filename_suffix("log")
            .build(&dir)
            .ok()?;
        Some((appender, dir))
    })
}

/// Installs the global subscriber. Logs go nowhere when no directory is
/// writable; the returned guard must outlive `main`'s work.
pub fn init(settings: &Settings) -> Option<WorkerGuard> {
    let (appender, dir) = appender()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(settings))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    std::panic::set_hook(Box::new(|info| tracing::error!(panic = %info, "panic")));
    tracing::info!(dir = %dir.display(), app = %settings.app_name, "logging to file");
    Some(guard)
}
