//! Chat sessions with the agronomy assistant. Transcripts live in memory only.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assistant::prompts::{CHAT_FALLBACK, CHAT_GREETING};
use crate::assistant::Agronomist;
use crate::errors::AppError;
use crate::models::chat::ChatMessage;

#[derive(Debug, Clone, Serialize)]
pub struct ChatTranscript {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

/// Live sessions kept before the oldest one is evicted.
pub const MAX_CHAT_SESSIONS: usize = 1024;

#[derive(Debug, Default)]
struct Sessions {
    transcripts: HashMap<Uuid, Vec<ChatMessage>>,
    /// Open order, oldest first. Holds exactly the keys of `transcripts`.
    order: VecDeque<Uuid>,
}

/// Append-only transcripts keyed by session id, capped at `capacity` sessions.
///
/// The lock is never held across the model call, so two overlapping messages
/// on one session may have their replies appended in either order.
#[derive(Debug)]
pub struct ChatSessions {
    sessions: Mutex<Sessions>,
    capacity: usize,
}

impl Default for ChatSessions {
    fn default() -> Self {
        Self::with_capacity(MAX_CHAT_SESSIONS)
    }
}

impl ChatSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a session whose transcript starts with the greeting, evicting
    /// the oldest session when the cap is reached.
    pub fn open(&self) -> ChatTranscript {
        let session_id = Uuid::new_v4();
        let messages = vec![ChatMessage::model(CHAT_GREETING)];

        let mut sessions = self.lock();
        while sessions.order.len() >= self.capacity {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            sessions.transcripts.remove(&oldest);
            debug!("Evicted chat session {oldest}");
        }
        sessions.transcripts.insert(session_id, messages.clone());
        sessions.order.push_back(session_id);
        drop(sessions);

        info!("Opened chat session {session_id}");
        ChatTranscript {
            session_id,
            messages,
        }
    }

    /// Ends a session. Returns whether it existed.
    pub fn close(&self, session_id: Uuid) -> bool {
        let mut sessions = self.lock();
        if sessions.transcripts.remove(&session_id).is_none() {
            return false;
        }
        sessions.order.retain(|id| *id != session_id);
        info!("Closed chat session {session_id}");
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().transcripts.len()
    }

    pub fn transcript(&self, session_id: Uuid) -> Option<ChatTranscript> {
        self.lock()
            .transcripts
            .get(&session_id)
            .map(|messages| ChatTranscript {
                session_id,
                messages: messages.clone(),
            })
    }

    /// Appends the user turn, asks the assistant with the prior transcript as
    /// context, and appends its answer (or the fallback) as a model turn.
    pub async fn send(
        &self,
        agronomist: &dyn Agronomist,
        session_id: Uuid,
        content: &str,
    ) -> Result<ChatMessage, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("message cannot be empty".to_string()));
        }

        let history = {
            let mut sessions = self.lock();
            let transcript = sessions
                .transcripts
                .get_mut(&session_id)
                .ok_or_else(|| AppError::NotFound(format!("Chat session {session_id} not found")))?;
            let history = transcript.clone();
            transcript.push(ChatMessage::user(content));
            history
        };

        let reply = match agronomist.chat(content, &history).await {
            Ok(text) => ChatMessage::model(text),
            Err(e) => {
                warn!("Chat request for session {session_id} failed: {e}");
                ChatMessage::model(CHAT_FALLBACK)
            }
        };

        // The session may have been closed or evicted while waiting.
        if let Some(transcript) = self.lock().transcripts.get_mut(&session_id) {
            transcript.push(reply.clone());
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::testing::ScriptedAgronomist;
    use crate::models::chat::ChatRole;

    #[test]
    fn test_open_starts_with_greeting() {
        let sessions = ChatSessions::new();
        let transcript = sessions.open();
        assert_eq!(transcript.messages, vec![ChatMessage::model(CHAT_GREETING)]);
        assert_eq!(
            sessions.transcript(transcript.session_id).unwrap().messages,
            transcript.messages
        );
    }

    #[tokio::test]
    async fn test_send_appends_both_turns_and_passes_prior_history() {
        let sessions = ChatSessions::new();
        let id = sessions.open().session_id;
        let agronomist = ScriptedAgronomist::answering("Gunakan mulsa plastik.");

        let reply = sessions
            .send(&agronomist, id, "Bagaimana mencegah busuk buah?")
            .await
            .unwrap();
        assert_eq!(reply, ChatMessage::model("Gunakan mulsa plastik."));

        let messages = sessions.transcript(id).unwrap().messages;
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Model, ChatRole::User, ChatRole::Model]);

        let seen = agronomist.seen_histories.lock().unwrap();
        assert_eq!(seen[0], vec![ChatMessage::model(CHAT_GREETING)]);
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let sessions = ChatSessions::new();
        let id = sessions.open().session_id;

        let reply = sessions
            .send(&ScriptedAgronomist::failing(), id, "Halo")
            .await
            .unwrap();
        assert_eq!(reply.content, CHAT_FALLBACK);
        assert_eq!(sessions.transcript(id).unwrap().messages.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_message_rejected_without_append() {
        let sessions = ChatSessions::new();
        let id = sessions.open().session_id;

        let err = sessions
            .send(&ScriptedAgronomist::answering("x"), id, "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(sessions.transcript(id).unwrap().messages.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let sessions = ChatSessions::new();
        let err = sessions
            .send(&ScriptedAgronomist::answering("x"), Uuid::new_v4(), "Halo")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_oldest_session_evicted_at_capacity() {
        let sessions = ChatSessions::with_capacity(3);
        let ids: Vec<_> = (0..5).map(|_| sessions.open().session_id).collect();

        assert_eq!(sessions.len(), 3);
        assert!(sessions.transcript(ids[0]).is_none());
        assert!(sessions.transcript(ids[1]).is_none());
        for id in &ids[2..] {
            assert!(sessions.transcript(*id).is_some());
        }
    }

    #[test]
    fn test_many_opens_stay_bounded() {
        let sessions = ChatSessions::new();
        for _ in 0..(MAX_CHAT_SESSIONS * 3) {
            sessions.open();
        }
        assert_eq!(sessions.len(), MAX_CHAT_SESSIONS);
    }

    #[test]
    fn test_close_removes_session() {
        let sessions = ChatSessions::new();
        let id = sessions.open().session_id;

        assert!(sessions.close(id));
        assert!(sessions.transcript(id).is_none());
        assert_eq!(sessions.len(), 0);
        assert!(!sessions.close(id));
    }

    #[test]
    fn test_closed_slot_is_reused_before_eviction() {
        let sessions = ChatSessions::with_capacity(2);
        let first = sessions.open().session_id;
        let second = sessions.open().session_id;
        sessions.close(second);

        sessions.open();
        assert!(sessions.transcript(first).is_some());
        assert_eq!(sessions.len(), 2);
    }

    #[tokio::test]
    async fn test_send_to_closed_session_is_not_found() {
        let sessions = ChatSessions::new();
        let id = sessions.open().session_id;
        sessions.close(id);

        let err = sessions
            .send(&ScriptedAgronomist::answering("x"), id, "Halo")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
