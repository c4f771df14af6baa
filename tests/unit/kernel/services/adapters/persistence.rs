use super::*;
use crate::kernel::services::adapters::storage::{FileStore, MemoryStore};
use crate::kernel::services::ports::storage::StorageError;
use crate::kernel::Store;
use tempfile::tempdir;

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn load(&self, _key: StorageKey) -> Result<Option<String>> {
        Err(StorageError::Unavailable("disk gone".into()))
    }

    fn save(&mut self, _key: StorageKey, _blob: &str) -> Result<()> {
        Err(StorageError::Unavailable("disk gone".into()))
    }
}

fn edited_state() -> WorkspaceState {
    let mut store = Store::new(WorkspaceState::default());
    let lib = store.create_folder(&NodeId::root(), "lib").unwrap();
    let util = store.create_file(&lib, "util.py", "print(1)").unwrap();
    store.toggle_folder(&lib).unwrap();
    store.select_file(&util).unwrap();
    store.set_secondary(Some(&NodeId::from("file1"))).unwrap();
    store.set_split_ratio(0.3);
    store.set_explorer_width(320);
    store.set_execution_language(71);
    store.set_input("5\n");
    store.into_state()
}

#[test]
fn empty_store_loads_defaults() {
    let persistence = Persistence::new(MemoryStore::new());
    let state = persistence.load_state();

    assert_eq!(state.tree.len(), 2);
    assert_eq!(state.session.active_file().unwrap().name, "main.cpp");
    assert_eq!(state.preferences, LayoutPreferences::default());
}

#[test]
fn save_all_then_load_round_trips() {
    let state = edited_state();
    let mut persistence = Persistence::new(MemoryStore::new());
    assert_eq!(persistence.save_all(&state), 0);
    assert_eq!(persistence.store().len(), StorageKey::ALL.len());

    let loaded = persistence.load_state();
    assert_eq!(loaded.tree.snapshot(), state.tree.snapshot());
    assert_eq!(loaded.session, state.session);
    assert_eq!(loaded.preferences, state.preferences);
}

#[test]
fn file_store_round_trip() {
    let dir = tempdir().unwrap();
    let state = edited_state();

    let mut persistence = Persistence::new(FileStore::open(dir.path()).unwrap());
    persistence.save_all(&state);

    let reopened = Persistence::new(FileStore::open(dir.path()).unwrap());
    let loaded = reopened.load_state();
    assert_eq!(loaded.session.active_file().unwrap().name, "util.py");
    assert_eq!(loaded.preferences.input, "5\n");
}

#[test]
fn apply_writes_only_named_keys() {
    let state = edited_state();
    let mut persistence = Persistence::new(MemoryStore::new());

    let failed = persistence.apply(
        &[
            Effect::Persist(StorageKey::Input),
            Effect::Persist(StorageKey::SplitRatio),
        ],
        &state,
    );
    assert_eq!(failed, 0);
    assert_eq!(persistence.store().len(), 2);
    assert_eq!(persistence.store().get(StorageKey::Input), Some("\"5\\n\""));
}

#[test]
fn malformed_values_fall_back_per_key() {
    let mut store = MemoryStore::new();
    store.insert(StorageKey::Workspace, "{not json");
    store.insert(StorageKey::ExplorerWidth, "\"wide\"");
    store.insert(StorageKey::Input, "\"kept\"");
    store.insert(StorageKey::SplitRatio, "7.5");

    let state = Persistence::new(store).load_state();
    assert_eq!(state.tree.len(), 2);
    assert_eq!(state.preferences.explorer_width, 240);
    assert_eq!(state.preferences.input, "kept");
    assert_eq!(state.session.split_ratio(), 0.5);
}

#[test]
fn invalid_tree_falls_back_to_default() {
    let mut store = MemoryStore::new();
    store.insert(
        StorageKey::Workspace,
        r#"{"type":"file","id":"root","name":"oops","content":""}"#,
    );
    let state = Persistence::new(store).load_state();
    assert!(state.tree.root().is_folder());
    assert_eq!(state.tree.root().name(), "Workspace");
}

#[test]
fn bare_root_node_is_accepted() {
    let mut store = MemoryStore::new();
    store.insert(
        StorageKey::Workspace,
        r#"{"type":"folder","id":"root","name":"Mine","children":[
            {"type":"file","id":"file7","name":"a.c","content":"int x;"}
        ]}"#,
    );

    let state = Persistence::new(store).load_state();
    assert_eq!(state.tree.root().name(), "Mine");
    assert_eq!(state.session.active_id(), &NodeId::from("file7"));
    assert_eq!(state.tree.next_seq(), 8);
}

#[test]
fn session_is_repaired_on_load() {
    let mut store = MemoryStore::new();
    store.insert(
        StorageKey::Workspace,
        r#"{"root":{"type":"folder","id":"root","name":"Workspace","children":[
            {"type":"file","id":"file1","name":"main.cpp","content":"x"}
        ]},"next_seq":2}"#,
    );
    store.insert(
        StorageKey::OpenFiles,
        r#"[{"id":"file1","name":"main.cpp","content":"x"},{"id":"file1","name":"dup.cpp"}]"#,
    );
    store.insert(StorageKey::ActiveFileId, "\"file9\"");
    store.insert(StorageKey::SecondaryFileId, "\"file4\"");
    store.insert(StorageKey::SplitView, "true");

    let state = Persistence::new(store).load_state();
    assert_eq!(state.session.len(), 1);
    assert_eq!(state.session.active_id(), &NodeId::from("file1"));
    assert_eq!(state.session.secondary_id(), None);
    assert!(!state.session.split_view());
}

#[test]
fn tabs_without_a_workspace_are_not_bound_to_the_default_tree() {
    let mut store = MemoryStore::new();
    store.insert(StorageKey::Workspace, "{not json");
    store.insert(
        StorageKey::OpenFiles,
        r#"[{"id":"file1","name":"notes.py","content":"print(1)"}]"#,
    );
    store.insert(StorageKey::ActiveFileId, "\"file1\"");

    let mut store = Store::new(Persistence::new(store).load_state());
    for tab in store.session().open_files() {
        let node = store.tree().find(&tab.id).unwrap();
        assert_eq!(node.name(), tab.name);
    }
    assert!(store.session().open_files().iter().all(|tab| tab.name != "notes.py"));

    let active = store.session().active_id().clone();
    store.update_content(&active, "EDITED").unwrap();
    let node = store.tree().find(&active).unwrap();
    assert_eq!(node.name(), store.session().active_file().unwrap().name);
    assert_eq!(node.content(), Some("EDITED"));
}

#[test]
fn ids_are_not_reused_after_reload() {
    let mut store = Store::new(WorkspaceState::default());
    let doomed = store.create_file(&NodeId::root(), "tmp.cpp", "").unwrap();
    store.delete(&doomed).unwrap();

    let mut persistence = Persistence::new(MemoryStore::new());
    persistence.save_all(store.state());

    let mut reloaded = Store::new(persistence.load_state());
    let fresh = reloaded.create_file(&NodeId::root(), "next.cpp", "").unwrap();
    assert_ne!(fresh, doomed);
    assert_eq!(fresh, NodeId::from("file3"));
}

#[test]
fn expanded_folders_drop_unknown_ids() {
    let mut store = MemoryStore::new();
    store.insert(StorageKey::ExpandedFolders, r#"["root","folder12"]"#);

    let state = Persistence::new(store).load_state();
    assert_eq!(state.preferences.expanded_folders(), &[NodeId::root()]);
}

#[test]
fn broken_store_loads_defaults_and_counts_failed_saves() {
    let mut persistence = Persistence::new(BrokenStore);
    let state = persistence.load_state();
    assert_eq!(state.session.len(), 1);

    let failed = persistence.apply(&[Effect::Persist(StorageKey::Workspace)], &state);
    assert_eq!(failed, 1);
}
