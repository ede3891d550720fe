// ═══════════════════════════════════════════════════════════════════
// Storage Tests: JsonFileStore and MemoryStore
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

use networth_core::errors::CoreError;
use networth_core::models::holding::{AssetHolding, AssetType};
use networth_core::models::ledger::UserLedger;
use networth_core::models::transaction::Transaction;
use networth_core::storage::json_file::{JsonFileStore, CURRENT_VERSION};
use networth_core::storage::memory::MemoryStore;
use networth_core::storage::store::RecordStore;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_ledger() -> UserLedger {
    let mut ledger = UserLedger::new();
    ledger.transactions.push(Transaction::income(
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        "Salary",
        dec("1000.50"),
    ));
    ledger.transactions.push(Transaction::expense(
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        "Rent",
        dec("400"),
    ));
    ledger.holdings.push(AssetHolding::crypto("Bitcoin", "BTC", "bitcoin", dec("0.01")));
    ledger.holdings.push(AssetHolding::manual(
        AssetType::RealEstate,
        "Flat",
        dec("1"),
        dec("250000"),
    ));
    ledger
}

mod json_file {
    use super::*;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("ledgers.json"))
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load("alice").unwrap().is_empty());
        assert!(store.users().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ledger = sample_ledger();

        store.save("alice", &ledger).unwrap();

        let loaded = JsonFileStore::new(store.path()).load("alice").unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn users_are_kept_apart() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("bob", &sample_ledger()).unwrap();
        store.save("alice", &UserLedger::new()).unwrap();

        assert_eq!(store.users().unwrap(), vec!["alice", "bob"]);
        assert!(store.load("alice").unwrap().is_empty());
        assert_eq!(store.load("bob").unwrap().transactions.len(), 2);
        assert!(store.load("carol").unwrap().is_empty());
    }

    #[test]
    fn saving_one_user_keeps_the_others() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let alice = sample_ledger();
        store.save("alice", &alice).unwrap();

        let mut bob = UserLedger::new();
        bob.holdings
            .push(AssetHolding::equity("Apple", "AAPL", dec("3")));
        store.save("bob", &bob).unwrap();

        assert_eq!(store.load("alice").unwrap(), alice);
        assert_eq!(store.load("bob").unwrap(), bob);
    }

    #[test]
    fn user_identity_is_trimmed_and_must_not_be_blank() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("  alice ", &sample_ledger()).unwrap();
        assert_eq!(store.users().unwrap(), vec!["alice"]);
        assert!(!store.load("alice").unwrap().is_empty());

        let err = store.save("   ", &UserLedger::new()).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn file_is_versioned_json() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("alice", &sample_ledger()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], u64::from(CURRENT_VERSION));
        assert!(value["users"]["alice"]["transactions"].is_array());
    }

    #[test]
    fn saves_leave_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("alice", &sample_ledger()).unwrap();
        store.save("bob", &UserLedger::new()).unwrap();
        store.save("alice", &UserLedger::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("ledgers.json")]);
    }

    #[test]
    fn failed_save_leaves_directory_clean() {
        let dir = TempDir::new().unwrap();
        // A directory where the store file should be makes every save fail
        let path = dir.path().join("ledgers.json");
        std::fs::create_dir(&path).unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.save("alice", &sample_ledger()).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("ledgers.json")]);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("deeper").join("store.json"));
        store.save("alice", &sample_ledger()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_an_error_and_left_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load("alice"), Err(CoreError::Deserialization(_))));
        assert!(matches!(
            store.save("alice", &sample_ledger()),
            Err(CoreError::Deserialization(_))
        ));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let future = serde_json::json!({ "version": CURRENT_VERSION + 1, "users": {} });
        std::fs::write(store.path(), future.to_string()).unwrap();

        let err = store.load("alice").unwrap_err();
        assert!(err.to_string().contains("Unsupported record store version"));
    }

    #[test]
    fn ledger_without_optional_fields_loads() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let doc = serde_json::json!({
            "version": 1,
            "users": {
                "alice": {
                    "holdings": [{
                        "asset_type": "Collectible",
                        "name": "Stamp",
                        "quantity": "4",
                        "pricing_source": "Manual",
                        "manual_unit_price": "2.5"
                    }]
                }
            }
        });
        std::fs::write(store.path(), doc.to_string()).unwrap();

        let ledger = store.load("alice").unwrap();
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.holdings.len(), 1);
        assert_eq!(ledger.holdings[0].symbol, "");
        assert_eq!(ledger.holdings[0].manual_unit_price, dec("2.5"));
    }
}

mod memory {
    use super::*;

    #[test]
    fn unknown_user_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load("nobody").unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        let ledger = sample_ledger();
        store.save("alice", &ledger).unwrap();
        assert_eq!(store.load("alice").unwrap(), ledger);
        assert_eq!(store.users().unwrap(), vec!["alice"]);
    }

    #[test]
    fn save_overwrites() {
        let store = MemoryStore::new();
        store.save("alice", &sample_ledger()).unwrap();
        store.save("alice", &UserLedger::new()).unwrap();
        assert!(store.load("alice").unwrap().is_empty());
    }

    #[test]
    fn user_identity_is_case_folded() {
        let store = MemoryStore::new();
        store.save("Alice@X.com", &sample_ledger()).unwrap();
        assert_eq!(store.users().unwrap(), vec!["alice@x.com"]);
        assert!(!store.load("alice@x.com").unwrap().is_empty());
    }

    #[test]
    fn blank_user_is_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(store.load(""), Err(CoreError::ValidationError(_))));
    }
}
