use dash_core::{
    storage::{read_collection, write_collection, KeyValueStore, StorageKey},
    Dashboard, StoreSettings, SystemClock,
};
use dash_domain::{Goal, TransactionKind};
use dash_storage_json::JsonFileStore;
use std::fs;
use tempfile::tempdir;

#[test]
fn json_store_round_trips_collections() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    let goals = vec![Goal::new(1, "Food", 10_000.0)];
    write_collection(&mut store, StorageKey::EXPENSE_GOALS, &goals).expect("write goals");

    let path = store.key_path(StorageKey::EXPENSE_GOALS);
    assert!(path.ends_with("budget-goals.json"));
    let raw = fs::read_to_string(&path).expect("read file");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(parsed[0]["category"], "Food");

    let loaded: Vec<Goal> =
        read_collection(&store, StorageKey::EXPENSE_GOALS).expect("read goals");
    assert_eq!(loaded, goals);
}

#[test]
fn missing_keys_read_as_absent_and_remove_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    assert_eq!(store.get(StorageKey::INCOME).expect("get"), None);
    store.remove(StorageKey::INCOME).expect("remove missing");

    store.set(StorageKey::CURRENCY, "USD").expect("set");
    assert_eq!(store.get(StorageKey::CURRENCY).expect("get").as_deref(), Some("USD"));
    store.remove(StorageKey::CURRENCY).expect("remove");
    assert_eq!(store.get(StorageKey::CURRENCY).expect("get"), None);
}

#[test]
fn set_leaves_no_temporary_file() {
    let dir = tempdir().expect("tempdir");
    let mut store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set(StorageKey::THEME, "light").expect("set");

    let names: Vec<String> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["theme.json".to_string()]);
}

#[test]
fn dashboard_saved_to_disk_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    let mut dash = Dashboard::open(
        Box::new(store.clone()),
        StoreSettings::default(),
        Box::new(SystemClock),
    );
    dash.delete_transaction(TransactionKind::Expense, 1);
    dash.save().expect("save");

    let reopened = Dashboard::open(
        Box::new(store),
        StoreSettings::default(),
        Box::new(SystemClock),
    );
    assert_eq!(reopened.state().expenses.len(), 5);
    assert_eq!(reopened.totals().expenses, 12_200.0);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(store.key_path(StorageKey::INCOME), "[{]").expect("write corrupt");

    let dash = Dashboard::open(
        Box::new(store),
        StoreSettings::default(),
        Box::new(SystemClock),
    );
    assert_eq!(dash.state().income.len(), 2);
    assert_eq!(dash.totals().income, 55_000.0);
}
