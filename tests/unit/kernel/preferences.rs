use super::*;

#[test]
fn defaults_expand_only_the_root() {
    let prefs = LayoutPreferences::default();
    assert_eq!(prefs.expanded_folders(), [NodeId::root()]);
    assert_eq!(prefs.explorer_width, DEFAULT_EXPLORER_WIDTH);
    assert_eq!(prefs.output_height, DEFAULT_OUTPUT_HEIGHT);
    assert!(prefs.input.is_empty());
}

#[test]
fn toggle_folder_flips_membership() {
    let mut prefs = LayoutPreferences::default();
    let dir = NodeId::from("folder3");

    assert!(prefs.toggle_folder(&dir));
    assert!(prefs.is_expanded(&dir));
    assert!(!prefs.toggle_folder(&dir));
    assert!(!prefs.is_expanded(&dir));
}

#[test]
fn forget_prunes_deleted_ids() {
    let mut prefs = LayoutPreferences::default();
    prefs.toggle_folder(&NodeId::from("folder1"));
    prefs.toggle_folder(&NodeId::from("folder2"));

    assert!(prefs.forget(&[NodeId::from("folder1"), NodeId::from("file9")]));
    assert_eq!(prefs.expanded_folders(), [NodeId::root(), NodeId::from("folder2")]);
    assert!(!prefs.forget(&[NodeId::from("folder1")]));
}

#[test]
fn set_expanded_folders_dedups() {
    let mut prefs = LayoutPreferences::default();
    prefs.set_expanded_folders(vec![NodeId::root(), NodeId::from("a"), NodeId::root()]);
    assert_eq!(prefs.expanded_folders().len(), 2);
}

#[test]
fn panel_sizes_are_clamped() {
    let mut prefs = LayoutPreferences::default();

    assert!(prefs.set_explorer_width(20));
    assert_eq!(prefs.explorer_width, MIN_EXPLORER_WIDTH);
    assert!(prefs.set_explorer_width(9000));
    assert_eq!(prefs.explorer_width, MAX_EXPLORER_WIDTH);

    assert!(prefs.set_output_height(900, 1000));
    assert_eq!(prefs.output_height, 800);
    assert!(prefs.set_output_height(10, 1000));
    assert_eq!(prefs.output_height, MIN_OUTPUT_HEIGHT);
    assert!(!prefs.set_output_height(400, 50));
}
