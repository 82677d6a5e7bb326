use std::sync::Arc;

use crate::accounts::{AccountStore, SessionHolder};
use crate::assistant::{Agronomist, ChatSessions};
use crate::scheduler::AlarmStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub session: Arc<SessionHolder>,
    pub alarms: Arc<AlarmStore>,
    pub chats: Arc<ChatSessions>,
    /// Pluggable model backend. Production: `GeminiAgronomist`.
    pub agronomist: Arc<dyn Agronomist>,
}

#[cfg(test)]
impl AppState {
    /// Seeded stores over a fresh in-memory backend.
    pub async fn in_memory(agronomist: Arc<dyn Agronomist>) -> Self {
        use crate::storage::{KvStore, MemoryStore};

        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        AppState {
            accounts: Arc::new(AccountStore::open(kv.clone()).await.unwrap()),
            session: Arc::new(SessionHolder::new(kv.clone())),
            alarms: Arc::new(AlarmStore::open(kv).await.unwrap()),
            chats: Arc::new(ChatSessions::new()),
            agronomist,
        }
    }
}
