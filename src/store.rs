//! The account storage collaborator. Modeled as a narrow trait so this crate
//! never dictates a persistence backend; the in-memory implementation exists
//! purely to exercise [`crate::engine::engine::Engine`]'s account-binding
//! operations in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AcmeError, AcmeResult};

/// An account as persisted by the enclosing application: which CA it belongs
/// to, its URL on that CA (once known), and its private key in JWK form.
#[derive(Clone, Debug)]
pub struct AccountRecord {
    pub ca_url: String,
    pub url: Option<String>,
    pub private_jwk: String,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn load(&self, id: &str) -> AcmeResult<AccountRecord>;

    /// Persists `record` under `id` if given, otherwise allocates a fresh id.
    /// Returns the id the record is now stored under.
    async fn save(&self, id: Option<&str>, record: &AccountRecord) -> AcmeResult<String>;
}

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<String, AccountRecord>>,
    next_id: Mutex<u64>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load(&self, id: &str) -> AcmeResult<AccountRecord> {
        self.accounts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AcmeError::not_found(format!("no account stored under id {id}")))
    }

    async fn save(&self, id: Option<&str>, record: &AccountRecord) -> AcmeResult<String> {
        let id = match id {
            Some(id) => id.to_owned(),
            None => {
                let mut next_id = self.next_id.lock().unwrap();
                let id = next_id.to_string();
                *next_id += 1;
                id
            }
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(id.clone(), record.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryAccountStore::new();
        let record = AccountRecord {
            ca_url: "https://ca.example/directory".into(),
            url: Some("https://ca.example/acct/1".into()),
            private_jwk: "{}".into(),
        };
        let id = store.save(None, &record).await.unwrap();
        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded.ca_url, record.ca_url);
        assert_eq!(loaded.url, record.url);
    }

    #[tokio::test]
    async fn load_missing_id_fails() {
        let store = InMemoryAccountStore::new();
        assert!(store.load("nonexistent").await.is_err());
    }
}
