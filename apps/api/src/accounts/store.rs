//! Account store — the plaintext credential list.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::user::{Role, UserAccount};
use crate::storage::{load_json, save_json, KvStore, StorageError, USERS_KEY};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn seed_accounts() -> Vec<UserAccount> {
    vec![
        UserAccount {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            name: "Administrator".to_string(),
            role: Role::Admin,
        },
        UserAccount {
            username: "petani".to_string(),
            password: "petani123".to_string(),
            name: "Bapak Ahmad".to_string(),
            role: Role::User,
        },
    ]
}

pub struct AccountStore {
    kv: Arc<dyn KvStore>,
    // Serializes load-modify-save so two registrations cannot both pass the uniqueness check.
    write_lock: Mutex<()>,
}

impl AccountStore {
    /// Opens the store, writing the seed accounts if no list has ever been stored.
    pub async fn open(kv: Arc<dyn KvStore>) -> Result<Self, StorageError> {
        if kv.get(USERS_KEY).await?.is_none() {
            save_json(kv.as_ref(), USERS_KEY, &seed_accounts()).await?;
            info!("Seeded default accounts");
        }
        Ok(Self {
            kv,
            write_lock: Mutex::new(()),
        })
    }

    pub async fn all(&self) -> Result<Vec<UserAccount>, StorageError> {
        Ok(load_json(self.kv.as_ref(), USERS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Exact match on both fields. No trimming, no case folding.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, StorageError> {
        let accounts = self.all().await?;
        Ok(accounts
            .into_iter()
            .find(|a| a.username == username && a.password == password))
    }

    /// Appends a new `user`-role account whose display name is its username.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, AccountError> {
        if username.trim().is_empty() {
            return Err(AccountError::Validation("username cannot be empty".to_string()));
        }
        if password.trim().is_empty() {
            return Err(AccountError::Validation("password cannot be empty".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut accounts = self.all().await?;

        if accounts.iter().any(|a| a.username == username) {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }

        let account = UserAccount {
            username: username.to_string(),
            password: password.to_string(),
            name: username.to_string(),
            role: Role::User,
        };
        accounts.push(account.clone());
        save_json(self.kv.as_ref(), USERS_KEY, &accounts).await?;

        info!("Registered account '{}'", account.username);
        Ok(account)
    }
}
