use crate::config::CachePolicy;
use crate::config::ListPosition;
use crate::config::ListTarget;
use crate::config::PaginateMode;
use crate::config::ProjectConfig;
use crate::store::Context;
use crate::store::Store;
use crate::store::StoreError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn bootstrapped_store() -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("houdini.db"), 1).unwrap();
    store.bootstrap(&Context::new()).unwrap();
    (dir, store)
}

#[test]
fn defaults() {
    let config = ProjectConfig::default();
    assert_eq!(config.default_cache_policy, CachePolicy::CacheOrNetwork);
    assert!(config.default_fragment_masking);
    assert_eq!(config.default_keys, vec!["id"]);
    assert_eq!(config.default_list_position, ListPosition::Last);
    assert_eq!(config.default_list_target, ListTarget::All);
    assert_eq!(config.default_paginate_mode, PaginateMode::Infinite);
    assert!(!config.default_partial);
    assert_eq!(
        config.artifact_path("MyQuery"),
        PathBuf::from("./$houdini/artifacts/MyQuery.js"),
    );
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config: ProjectConfig = serde_json::from_str(
        r#"{
            "defaultCachePolicy": "NetworkOnly",
            "defaultListPosition": "first",
            "defaultListTarget": "NULL",
            "runtimeScalars": { "ViewerID": "ID" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.default_cache_policy, CachePolicy::NetworkOnly);
    assert_eq!(config.default_list_position, ListPosition::First);
    assert_eq!(config.default_list_target, ListTarget::Null);
    assert_eq!(config.runtime_scalars["ViewerID"], "ID");
    assert_eq!(config.runtime_dir, "$houdini");
    assert_eq!(config.default_keys, vec!["id"]);
}

#[test]
fn unknown_policy_in_json_is_rejected() {
    let json = r#"{ "defaultCachePolicy": "Sometimes" }"#;
    assert!(serde_json::from_str::<ProjectConfig>(json).is_err());
}

#[test]
fn save_then_load_round_trips() {
    let (_dir, store) = bootstrapped_store();
    let config = ProjectConfig {
        default_cache_policy: CachePolicy::CacheAndNetwork,
        default_fragment_masking: false,
        default_keys: vec!["id".to_string(), "slug".to_string()],
        default_list_position: ListPosition::First,
        default_list_target: ListTarget::Null,
        default_paginate_mode: PaginateMode::SinglePage,
        default_partial: true,
        project_root: PathBuf::from("/srv/app"),
        runtime_dir: ".houdini".to_string(),
        runtime_scalars: BTreeMap::from([("ViewerID".to_string(), "ID".to_string())]),
        suppress_pagination_deduplication: true,
    };

    let conn = store.take(&Context::new()).unwrap();
    config.save(&conn).unwrap();
    assert_eq!(ProjectConfig::load(&conn).unwrap(), config);
    assert_eq!(
        config.artifact_directory(),
        PathBuf::from("/srv/app/.houdini/artifacts"),
    );
}

#[test]
fn saving_replaces_runtime_scalars() {
    let (_dir, store) = bootstrapped_store();
    let conn = store.take(&Context::new()).unwrap();
    let mut config = ProjectConfig::default();
    config.runtime_scalars.insert("Old".to_string(), "String".to_string());
    config.save(&conn).unwrap();

    config.runtime_scalars = BTreeMap::from([("New".to_string(), "Int".to_string())]);
    config.save(&conn).unwrap();
    let loaded = ProjectConfig::load(&conn).unwrap();
    assert_eq!(loaded.runtime_scalars.keys().collect::<Vec<_>>(), vec!["New"]);
}

#[test]
fn missing_row_is_reported() {
    let (_dir, store) = bootstrapped_store();
    let err = store.project_config(&Context::new()).unwrap_err();
    assert!(matches!(err, StoreError::MissingConfig));
}

#[test]
fn invalid_stored_value_names_the_setting() {
    let (_dir, store) = bootstrapped_store();
    let conn = store.take(&Context::new()).unwrap();
    ProjectConfig::default().save(&conn).unwrap();
    conn.execute("UPDATE config SET default_list_position = 'middle'", [])
        .unwrap();

    let err = ProjectConfig::load(&conn).unwrap_err();
    match err {
        StoreError::InvalidConfig { setting, value } => {
            assert_eq!(setting, "default_list_position");
            assert_eq!(value, "middle");
        },
        other => panic!("unexpected error: {other}"),
    }
}
