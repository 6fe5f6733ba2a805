//! Interactive sessions.
//!
//! A session holds at most one set of notes. "Get notes" replaces them on
//! success and leaves them untouched on failure; questions can only be asked
//! once notes exist and never change the session.

use crate::error::{NotesError, Result};
use crate::orchestrator::{validate_question, Notes, Orchestrator, Summary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    NoSummary,
    HasSummary(Notes),
}

/// Per-session context passed to action handlers.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: SessionState::NoSummary,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn notes(&self) -> Option<&Notes> {
        match &self.state {
            SessionState::HasSummary(notes) => Some(notes),
            SessionState::NoSummary => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.notes().map(|n| &n.summary)
    }

    /// Whether the question surface is available.
    pub fn can_ask(&self) -> bool {
        matches!(self.state, SessionState::HasSummary(_))
    }

    /// Generate notes for a link and store them, replacing any previous notes.
    ///
    /// The state is only written after every step has succeeded, so an error
    /// or a dropped future leaves the session as it was.
    pub async fn get_notes(&mut self, orchestrator: &Orchestrator, url: &str) -> Result<Notes> {
        let notes = orchestrator.generate_notes(url).await?;
        info!(session = %self.id, video_id = %notes.video_id, "Stored new notes");

        self.state = SessionState::HasSummary(notes.clone());
        Ok(notes)
    }

    /// Answer a question about the stored notes.
    pub async fn submit_question(&self, orchestrator: &Orchestrator, question: &str) -> Result<String> {
        let summary = self.summary().ok_or(NotesError::NoSummary)?;
        let question = validate_question(question)?;
        debug!(session = %self.id, "Answering question");
        orchestrator.answer(summary, question).await
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            created_at: session.created_at,
            state: match session.state {
                SessionState::NoSummary => "no_summary",
                SessionState::HasSummary(_) => "has_summary",
            },
            notes: session.notes().cloned(),
        }
    }
}

/// Isolated sessions keyed by ID.
///
/// Each session sits behind its own lock, so a long action in one session
/// does not block others. Sessions idle for longer than the timeout are
/// dropped by [`SessionStore::evict_idle`].
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Slot>>,
    idle_timeout: Duration,
}

struct Slot {
    session: Arc<Mutex<Session>>,
    last_used: Instant,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Start a new session and return its ID.
    pub async fn create(&self) -> Uuid {
        let session = Session::new();
        let id = session.id();
        let slot = Slot {
            session: Arc::new(Mutex::new(session)),
            last_used: Instant::now(),
        };
        self.sessions.write().await.insert(id, slot);
        debug!(session = %id, "Created session");
        id
    }

    /// Look up a session and mark it as used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id).ok_or(NotesError::SessionNotFound(id))?;
        slot.last_used = Instant::now();
        Ok(slot.session.clone())
    }

    /// End a session, discarding its notes.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(NotesError::SessionNotFound(id))
    }

    /// Drop sessions idle for longer than the timeout and return how many
    /// were removed. Sessions with an action in flight are kept.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|id, slot| {
            let keep = slot.last_used.elapsed() < self.idle_timeout
                || Arc::strong_count(&slot.session) > 1;
            if !keep {
                debug!(session = %id, "Evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
