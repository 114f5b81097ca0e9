//! In-memory session registry for a hosting process.
//!
//! The engine itself is synchronous. A host that serves several players
//! keeps each session behind its own mutex, so every operation on a session
//! is one critical section and sessions never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::session::Session;

/// A session shared between request handlers.
pub type SharedSession = Arc<Mutex<Session>>;

/// Registry entry.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub session: SharedSession,
    pub created_at: DateTime<Utc>,
}

/// uuid-keyed session map
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its id.
    pub async fn create(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        let entry = StoredSession {
            session: Arc::new(Mutex::new(session)),
            created_at: Utc::now(),
        };
        self.sessions.write().await.insert(id, entry);
        tracing::info!(%id, "Session registered");
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|e| Arc::clone(&e.session))
    }

    pub async fn created_at(&self, id: &Uuid) -> Option<DateTime<Utc>> {
        self.sessions.read().await.get(id).map(|e| e.created_at)
    }

    /// Drop a session. Handles still held elsewhere stay usable.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(%id, "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
