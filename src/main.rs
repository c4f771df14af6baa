use std::io::{self, Write};

use codeplay::kernel::services::adapters::{
    ensure_settings_file, resolve_settings, storage_dir, FileStore, MemoryStore,
};
use codeplay::kernel::services::ports::KeyValueStore;
use codeplay::kernel::services::WorkspaceHost;
use codeplay::models::NodeId;
use rustc_hash::FxHashSet;

mod logging;

fn main() -> io::Result<()> {
    let settings_file = ensure_settings_file();
    let settings = resolve_settings();
    let _logging = logging::init(&settings);
    if let Err(e) = settings_file {
        tracing::warn!(error = %e, "cannot create settings file; using defaults");
    }

    let view = std::env::args().nth(1).unwrap_or_else(|| "tree".to_string());

    match storage_dir(&settings).map(FileStore::open) {
        Some(Ok(storage)) => {
            tracing::info!(dir = %storage.dir().display(), "using file storage");
            print_view(WorkspaceHost::open(storage, &settings), &view)
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "file storage unavailable; using memory");
            print_view(WorkspaceHost::open(MemoryStore::new(), &settings), &view)
        }
        None => print_view(WorkspaceHost::open(MemoryStore::new(), &settings), &view),
    }
}

fn print_view<S: KeyValueStore>(host: WorkspaceHost<S>, view: &str) -> io::Result<()> {
    let store = host.store();
    let mut out = io::stdout().lock();

    match view {
        "session" => {
            let session = store.session();
            for file in session.open_files() {
                let mut marks = String::new();
                if &file.id == session.active_id() {
                    marks.push('*');
                }
                if session.secondary_id() == Some(&file.id) && session.split_view() {
                    marks.push('+');
                }
                writeln!(out, "{marks:2}{} ({}) [{}]", file.name, file.id, file.language.as_str())?;
            }
            if let Some(lang) = store.selected_execution_language() {
                writeln!(out, "language: {}", lang.name)?;
            }
        }
        "tree" => {
            let expanded: FxHashSet<NodeId> =
                store.preferences().expanded_folders().iter().cloned().collect();
            writeln!(out, "{}", store.tree().root().name())?;
            for row in store.tree().flatten_for_view(&expanded) {
                let indent = "  ".repeat(usize::from(row.depth) + 1);
                let marker = match (row.kind, row.is_expanded) {
                    (codeplay::models::NodeKind::Folder, true) => "v ",
                    (codeplay::models::NodeKind::Folder, false) => "> ",
                    (codeplay::models::NodeKind::File, _) => "",
                };
                writeln!(out, "{indent}{marker}{}", row.name)?;
            }
        }
        other => {
            eprintln!("usage: codeplay [tree|session] (got {other:?})");
        }
    }
    Ok(())
}
