use crate::errors::CoreError;
use crate::models::ledger::UserLedger;

/// Durable mapping from user identity to that user's ledger.
///
/// Loaded before a session works on the ledger and saved after mutations.
/// An unknown user loads as an empty ledger.
pub trait RecordStore {
    fn load(&self, user: &str) -> Result<UserLedger, CoreError>;

    fn save(&self, user: &str, ledger: &UserLedger) -> Result<(), CoreError>;

    /// All users with a saved ledger, sorted.
    fn users(&self) -> Result<Vec<String>, CoreError>;
}

/// Trim and lower-case a user identity; reject blank ones.
///
/// Identities are e-mail addresses, so `Alice@x.com` and `alice@x.com` name
/// the same ledger.
pub fn normalize_user(user: &str) -> Result<String, CoreError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(CoreError::ValidationError("User identity must not be empty".into()));
    }
    Ok(user.to_lowercase())
}
