use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use zen_core::{FinanceStore, KeyValueStore, SeedPolicy};
use zen_domain::{SavingsGoal, Transaction, TransactionKind};
use zen_storage_json::{export_path, load_bundle_from_path, save_bundle_to_path, JsonFileStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn json_store_writes_one_file_per_key() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    assert!(store.get("budgets").expect("read").is_none());
    store.set("budgets", "[]").expect("write");
    assert_eq!(store.get("budgets").expect("read").as_deref(), Some("[]"));

    let path = store.key_path("budgets");
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(!path.with_extension("json.tmp").exists());

    store.remove("budgets").expect("remove");
    assert!(!path.exists());
    store.remove("budgets").expect("removing twice is fine");
}

#[test]
fn finance_store_survives_restart_on_disk() {
    let dir = tempdir().expect("tempdir");
    {
        let port = JsonFileStore::new(dir.path()).expect("create store");
        let mut finance = FinanceStore::load(port, SeedPolicy::Demo).expect("load");
        finance
            .add_savings_goal(SavingsGoal::new("Vacances", 1000.0, date(2025, 8, 1)).with_id("g1"))
            .expect("add goal");
        finance
            .add_transaction(
                Transaction::new(300.0, date(2025, 4, 12), "Épargne", "cat-5", TransactionKind::Expense)
                    .with_savings_goal("g1"),
            )
            .expect("add transaction");
    }

    for key in ["transactions", "categories", "budgets", "investments", "savingsGoals"] {
        assert!(dir.path().join(format!("{key}.json")).exists(), "{key} persisted");
    }

    let port = JsonFileStore::new(dir.path()).expect("reopen store");
    let finance = FinanceStore::load(port, SeedPolicy::Demo).expect("reload");
    assert_eq!(finance.transactions().len(), 4);
    assert_eq!(finance.goal("g1").map(|goal| goal.current_amount), Some(300.0));
    assert!(finance.load_warnings().is_empty());
}

#[test]
fn corrupt_file_is_reported_not_fatal() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("categories.json"), "not json").expect("seed corrupt file");

    let port = JsonFileStore::new(dir.path()).expect("create store");
    let finance = FinanceStore::load(port, SeedPolicy::Empty).expect("load");
    assert!(finance.categories().is_empty());
    assert_eq!(finance.load_warnings().len(), 1);
}

#[test]
fn export_file_round_trips_through_import() {
    let dir = tempdir().expect("tempdir");
    let port = JsonFileStore::new(dir.path().join("data")).expect("create store");
    let finance = FinanceStore::load(port, SeedPolicy::Demo).expect("load");

    let path = export_path(dir.path(), date(2025, 4, 18));
    assert!(path.ends_with("budgetzen-export-2025-04-18.json"));
    save_bundle_to_path(&finance.export_bundle(), &path).expect("export");

    let bundle = load_bundle_from_path(&path).expect("import");
    assert_eq!(bundle.categories.map(|items| items.len()), Some(6));
    assert_eq!(bundle.savings_goals.map(|items| items.len()), Some(0));
}

#[test]
fn import_of_unrelated_json_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme":"dark"}"#).expect("write file");
    assert!(load_bundle_from_path(&path).is_err());
}
