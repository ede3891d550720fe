use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::ledger::UserLedger;

use super::store::{normalize_user, RecordStore};

/// Current on-disk document version.
pub const CURRENT_VERSION: u16 = 1;

/// The whole file: every user's ledger, keyed by user identity.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: u16,
    #[serde(default)]
    users: BTreeMap<String, UserLedger>,
}

/// Record store backed by a single pretty-printed JSON file.
///
/// - Missing file: behaves as an empty store.
/// - Corrupt file or unknown version: `load`/`save` fail rather than
///   overwrite data they could not read.
/// - Saves go to a uniquely named temp file in the same directory, which is
///   renamed into place. A failed save leaves no temp file behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument, CoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument {
                version: CURRENT_VERSION,
                users: BTreeMap::new(),
            });
        }

        let bytes = std::fs::read(&self.path)?;
        let document: StoreDocument = serde_json::from_slice(&bytes).map_err(|e| {
            CoreError::Deserialization(format!(
                "Failed to read record store {}: {e}",
                self.path.display()
            ))
        })?;

        if document.version == 0 || document.version > CURRENT_VERSION {
            return Err(CoreError::Deserialization(format!(
                "Unsupported record store version {} in {}",
                document.version,
                self.path.display()
            )));
        }
        Ok(document)
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), CoreError> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize record store: {e}")))?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        // Dropping the temp file on any error path removes it from disk.
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            CoreError::FileIO(format!(
                "Failed to replace record store {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<UserLedger, CoreError> {
        let user = normalize_user(user)?;
        let mut document = self.read_document()?;
        let ledger = document.users.remove(&user).unwrap_or_default();
        tracing::debug!(
            "Loaded ledger for {user}: {} transactions, {} holdings",
            ledger.transactions.len(),
            ledger.holdings.len()
        );
        Ok(ledger)
    }

    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), CoreError> {
        let user = normalize_user(user)?;
        let mut document = self.read_document()?;
        document.version = CURRENT_VERSION;
        document.users.insert(user.clone(), ledger.clone());
        self.write_document(&document)?;
        tracing::debug!("Saved ledger for {user} to {}", self.path.display());
        Ok(())
    }

    fn users(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.read_document()?.users.into_keys().collect())
    }
}
