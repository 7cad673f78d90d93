use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::session::ClaimSession;

/// Registry of active intake sessions.
///
/// Each session is an independent value: handing one out never shares
/// mutable state between concurrent sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session: ClaimSession) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<ClaimSession>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory implementation of `SessionStore`. Sessions live for the
/// process lifetime only; nothing is persisted.
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, ClaimSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: ClaimSession) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<ClaimSession>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}
