//! In-Memory Session Store

use async_trait::async_trait;
use std::sync::Mutex;

use super::SessionStore;
use crate::domain::DomainResult;

/// Process-local [`SessionStore`], used in tests and embedded setups that do
/// not want a database for one record.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock(record: &Mutex<Option<String>>) -> std::sync::MutexGuard<'_, Option<String>> {
    record.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> DomainResult<Option<String>> {
        Ok(lock(&self.record).clone())
    }

    async fn set(&self, raw: &str) -> DomainResult<()> {
        *lock(&self.record) = Some(raw.to_string());
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        *lock(&self.record) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().await.unwrap(), None);

        store.set("record").await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some("record".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
        // Clearing again is fine
        store.clear().await.unwrap();
    }
}
