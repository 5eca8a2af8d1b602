//! Record store implementations
//!
//! Account and transaction records live behind the [`RecordStore`] trait;
//! the client-local closed-account flags live behind [`FlagStore`]. Both
//! come with a JSON-file-backed implementation and an in-memory one.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub mod error;
pub mod file;
pub mod memory;
pub mod types;

pub use error::StoreError;
pub use file::{JsonFileStore, JsonFlagStore};
pub use memory::{MemoryFlagStore, MemoryStore};

// Re-export commonly used types
pub use types::{AccountRecord, StoreData, Transaction, TransactionFields};

// ==================== Utility Functions ====================

/// Generate a short hash (8 characters) from content
pub fn short_hash(content: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let hash = hasher.finish();

    // Take first 8 characters of hex hash
    format!("{:016x}", hash)[..8].to_string()
}

/// Generate a unique record ID from a prefix and a seed string
///
/// The millisecond timestamp is zero-padded so lexicographic comparison of
/// IDs generated by one store follows creation order.
pub fn generate_record_id(prefix: &str, seed: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{}-{:013}-{}", prefix, millis, short_hash(seed))
}

// ==================== Store Traits ====================

/// Record store reference type
pub type StoreRef = Arc<dyn RecordStore>;

/// Trait for account and transaction record stores
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch all account records
    async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>, StoreError>;

    /// Fetch all transactions belonging to one account
    async fn fetch_transactions(&self, account_id: &str) -> Result<Vec<Transaction>, StoreError>;

    /// Create a transaction under an account and return the stored record
    async fn create_transaction(
        &self,
        account_id: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, StoreError>;

    /// Replace the mutable fields of an existing transaction
    async fn update_transaction(
        &self,
        transaction_id: &str,
        fields: TransactionFields,
    ) -> Result<Transaction, StoreError>;

    /// Remove a transaction
    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), StoreError>;

    /// Create an account record with the given display name
    async fn create_account(&self, name: &str) -> Result<AccountRecord, StoreError>;
}

/// Flag registry reference type
pub type FlagStoreRef = Arc<dyn FlagStore>;

/// Trait for the durable closed-account flag registry
///
/// The registry is a client-local annotation keyed by account ID. Callers
/// load it once at startup and save the whole map back on every toggle.
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Load the full flag map
    async fn load(&self) -> Result<HashMap<String, bool>, StoreError>;

    /// Persist the full flag map
    async fn save(&self, flags: &HashMap<String, bool>) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_is_stable() {
        assert_eq!(short_hash("abc"), short_hash("abc"));
        assert_ne!(short_hash("abc"), short_hash("abd"));
        assert_eq!(short_hash("anything").len(), 8);
    }

    #[test]
    fn test_generate_record_id_shape() {
        let id = generate_record_id("txn", "seed");
        assert!(id.starts_with("txn-"));
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 13);
        assert_eq!(parts[2].len(), 8);
    }
}
