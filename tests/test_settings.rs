//! Settings store and connection registry tests

mod common;

use serde_json::json;
use tempfile::TempDir;

use common::{connection_json, MemoryStore};
use sql2class::settings::{
    ConnectionRegistry, JsonStore, Profile, SaveOutcome, SettingScope, SettingsStore,
};

#[test]
fn registry_keeps_complete_entries_in_configuration_order() {
    let mut store = MemoryStore::new();
    store.seed(
        "connections",
        json!([
            connection_json("beta", "jdbc:mysql://h/b", "user_b", "", false),
            connection_json("", "jdbc:mysql://h/x", "user_x", "", false), // no name
            connection_json("alpha", "jdbc:mysql://h/a", "user_a", "", false),
            connection_json("gamma", "", "user_g", "", false),            // no url
            connection_json("delta", "jdbc:mysql://h/d", "", "", false),  // no user id
        ]),
    );

    let names: Vec<String> = ConnectionRegistry::new(&store)
        .list_connections()
        .into_iter()
        .map(|conn| conn.name)
        .collect();
    assert_eq!(names, vec!["beta", "alpha"]);
}

#[test]
fn registry_is_empty_on_missing_or_malformed_configuration() {
    let store = MemoryStore::new();
    assert!(ConnectionRegistry::new(&store).list_connections().is_empty());

    let mut store = MemoryStore::new();
    store.seed("connections", json!("not a list"));
    assert!(ConnectionRegistry::new(&store).list_connections().is_empty());
}

#[test]
fn workspace_values_overlay_global_ones() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.json");
    let workspace = dir.path().join(".sql2class.json");
    std::fs::write(
        &global,
        json!({"defaultPackageName": "com.global", "defaultClassName": "G"}).to_string(),
    )
    .unwrap();
    std::fs::write(&workspace, json!({"defaultPackageName": "com.ws"}).to_string()).unwrap();

    let mut store = JsonStore::from_paths(global, Some(workspace)).unwrap();
    let profile = Profile::new(&mut store);
    assert_eq!(profile.default_package_name().as_deref(), Some("com.ws"));
    assert_eq!(profile.default_class_name().as_deref(), Some("G"));
}

#[test]
fn workspace_scope_is_unwritable_without_its_file() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonStore::from_paths(dir.path().join("global.json"), None).unwrap();
    assert!(store.can_write(SettingScope::Global));
    assert!(!store.can_write(SettingScope::Workspace));
    assert!(store
        .set("defaultClassName", json!("Foo"), SettingScope::Workspace)
        .is_err());
}

#[test]
fn global_writes_round_trip_through_the_file() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("nested/dir/settings.json");

    let mut store = JsonStore::from_paths(global.clone(), None).unwrap();
    store
        .set("defaultPackageName", json!("com.x"), SettingScope::Global)
        .unwrap();

    let reloaded = JsonStore::from_paths(global, None).unwrap();
    assert_eq!(reloaded.get("defaultPackageName"), Some(json!("com.x")));
}

#[test]
fn profile_capitalizes_the_template_type_on_save() {
    let mut store = MemoryStore::new();
    let mut profile = Profile::new(&mut store);
    assert_eq!(
        profile.save_last_template_type("record").unwrap(),
        SaveOutcome::Saved
    );
    assert_eq!(store.get("defaultTemplateType"), Some(json!("Record")));
}

#[test]
fn profile_reports_an_unwritable_target_instead_of_failing() {
    let mut store = MemoryStore::new();
    store.workspace_writable = false;
    store.seed("settingTarget", json!("Workspace"));

    let mut profile = Profile::new(&mut store);
    assert_eq!(
        profile.save_last_class_name("Foo").unwrap(),
        SaveOutcome::NoWritableScope
    );
    assert!(store.writes.is_empty());
}

#[test]
fn setting_target_defaults_to_global() {
    let mut store = MemoryStore::new();
    assert_eq!(Profile::new(&mut store).setting_target(), SettingScope::Global);

    let mut store = MemoryStore::new();
    store.seed("settingTarget", json!("Workspace"));
    assert_eq!(
        Profile::new(&mut store).setting_target(),
        SettingScope::Workspace
    );
}

#[test]
fn malformed_settings_file_is_a_reported_error() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("settings.json");
    std::fs::write(&global, "{ not json").unwrap();
    assert!(JsonStore::from_paths(global, None).is_err());
}
