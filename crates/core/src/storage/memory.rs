use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::ledger::UserLedger;

use super::store::{normalize_user, RecordStore};

/// In-process record store. Nothing survives the process; used for tests
/// and for hosts that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    ledgers: Mutex<BTreeMap<String, UserLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, user: &str) -> Result<UserLedger, CoreError> {
        let user = normalize_user(user)?;
        let ledgers = self.ledgers.lock().unwrap_or_else(|e| e.into_inner());
        Ok(ledgers.get(&user).cloned().unwrap_or_default())
    }

    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), CoreError> {
        let user = normalize_user(user)?;
        let mut ledgers = self.ledgers.lock().unwrap_or_else(|e| e.into_inner());
        ledgers.insert(user, ledger.clone());
        Ok(())
    }

    fn users(&self) -> Result<Vec<String>, CoreError> {
        let ledgers = self.ledgers.lock().unwrap_or_else(|e| e.into_inner());
        Ok(ledgers.keys().cloned().collect())
    }
}
