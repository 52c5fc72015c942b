//! Session storage with idle expiry.

use super::AnalysisSession;
use crate::dataset::Dataset;
use crate::error::{AirqError, Result};
use mini_moka::sync::Cache;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Shared handle to one session.
pub type SessionHandle = Arc<RwLock<AnalysisSession>>;

/// Sessions keyed by UUID. Entries expire after the idle TTL.
pub struct SessionStore {
    sessions: Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration, max_sessions: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .time_to_idle(idle_ttl)
                .max_capacity(max_sessions)
                .build(),
        }
    }

    /// Open a new session over the full dataset.
    pub fn create(&self, dataset: Arc<Dataset>) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(RwLock::new(AnalysisSession::new(dataset))));
        debug!("Created session {}", id);
        id
    }

    fn parse_id(id: &str) -> Result<Uuid> {
        Uuid::from_str(id.trim()).map_err(|_| AirqError::SessionNotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Result<SessionHandle> {
        let key = Self::parse_id(id)?;
        self.sessions
            .get(&key)
            .ok_or_else(|| AirqError::SessionNotFound(id.to_string()))
    }

    /// Run `f` against a session under its write lock.
    ///
    /// Writers on the same session are serialized; readers of other sessions
    /// are not blocked.
    pub async fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut AnalysisSession) -> Result<T>,
    ) -> Result<T> {
        let handle = self.get(id)?;
        let mut session = handle.write().await;
        f(&mut session)
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let key = Self::parse_id(id)?;
        let existed = self.sessions.get(&key).is_some();
        self.sessions.invalidate(&key);
        Ok(existed)
    }

    /// Number of live sessions.
    pub fn len(&self) -> u64 {
        self.sessions.iter().count() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
