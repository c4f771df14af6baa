use super::*;

fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<OsString> + 'a {
    move |name| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| OsString::from(*value))
    }
}

#[test]
fn configured_data_dir_wins() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/srv/codeplay")),
        ..Default::default()
    };
    assert_eq!(storage_dir(&settings), Some(PathBuf::from("/srv/codeplay")));
}

#[test]
fn default_dirs_live_under_app_dir() {
    if let Some(dir) = storage_dir(&Settings::default()) {
        assert!(dir.ends_with("codeplay/storage"));
    }
    if let Some(dir) = log_dir() {
        assert!(dir.ends_with("codeplay/logs"));
    }
}

#[test]
fn nothing_resolves_without_environment() {
    assert_eq!(platform_dir(Base::Data, env(&[])), None);
    assert_eq!(platform_dir(Base::Cache, env(&[])), None);
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn xdg_dirs_win_over_home() {
    let vars = [
        ("HOME", "/home/dev"),
        ("XDG_DATA_HOME", "/xdg/data"),
        ("XDG_CACHE_HOME", ""),
    ];
    assert_eq!(
        platform_dir(Base::Data, env(&vars)),
        Some(PathBuf::from("/xdg/data"))
    );
    assert_eq!(
        platform_dir(Base::Cache, env(&vars)),
        Some(PathBuf::from("/home/dev/.cache"))
    );
}
