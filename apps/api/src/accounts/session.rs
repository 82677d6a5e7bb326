use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::user::UserAccount;
use crate::storage::{load_json, save_json, KvStore, StorageError, SESSION_KEY};

/// What the front-end should show on start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active(UserAccount),
    LoginRequired,
}

/// Holds at most one logged-in account, mirrored to `SESSION_KEY`.
pub struct SessionHolder {
    kv: Arc<dyn KvStore>,
    current: RwLock<Option<UserAccount>>,
}

impl SessionHolder {
    /// An empty holder. Does not touch storage.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            current: RwLock::new(None),
        }
    }

    /// Loads the persisted session, if any.
    pub async fn restore(kv: Arc<dyn KvStore>) -> Result<Self, StorageError> {
        let stored: Option<UserAccount> = load_json(kv.as_ref(), SESSION_KEY).await?;
        if let Some(account) = &stored {
            info!("Restored session for '{}'", account.username);
        }
        Ok(Self {
            kv,
            current: RwLock::new(stored),
        })
    }

    pub async fn login(&self, account: UserAccount) -> Result<(), StorageError> {
        let mut current = self.current.write().await;
        save_json(self.kv.as_ref(), SESSION_KEY, &account).await?;
        info!("Session started for '{}'", account.username);
        *current = Some(account);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), StorageError> {
        let mut current = self.current.write().await;
        self.kv.remove(SESSION_KEY).await?;
        if let Some(account) = current.take() {
            info!("Session ended for '{}'", account.username);
        }
        Ok(())
    }

    pub async fn current(&self) -> Option<UserAccount> {
        self.current.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        match self.current().await {
            Some(account) => SessionState::Active(account),
            None => SessionState::LoginRequired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::storage::MemoryStore;

    fn petani() -> UserAccount {
        UserAccount {
            username: "petani".to_string(),
            password: "petani123".to_string(),
            name: "Bapak Ahmad".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_fresh_start_requires_login() {
        let holder = SessionHolder::restore(Arc::new(MemoryStore::new()))
            .await
            .unwrap();
        assert_eq!(holder.state().await, SessionState::LoginRequired);
    }

    #[tokio::test]
    async fn test_login_is_restored_by_new_holder() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let holder = SessionHolder::new(kv.clone());
        holder.login(petani()).await.unwrap();

        let restored = SessionHolder::restore(kv).await.unwrap();
        assert_eq!(restored.state().await, SessionState::Active(petani()));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let holder = SessionHolder::new(kv.clone());
        holder.login(petani()).await.unwrap();
        holder.logout().await.unwrap();

        assert!(holder.current().await.is_none());
        assert!(kv.get(SESSION_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_login_replaces_first() {
        let holder = SessionHolder::new(Arc::new(MemoryStore::new()));
        holder.login(petani()).await.unwrap();

        let mut other = petani();
        other.username = "budi".to_string();
        holder.login(other.clone()).await.unwrap();

        assert_eq!(holder.current().await, Some(other));
    }

    #[tokio::test]
    async fn test_corrupt_session_is_reported() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        kv.set(SESSION_KEY, "\"just a string\"").await.unwrap();

        let err = SessionHolder::restore(kv).await.err().unwrap();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}
