//! [`SessionStore`] implementations.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pdna_core::auth::SessionStore;
use pdna_core::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::storage::{AtomicFile, blocking};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    last_activity: DateTime<Utc>,
}

/// Keeps the session timestamp in a small JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn file(&self) -> AtomicFile<SessionRecord> {
        AtomicFile::json(self.path.clone())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<DateTime<Utc>>> {
        let file = self.file();
        match blocking(move || file.load()).await {
            Ok(record) => Ok(record.map(|r| r.last_activity)),
            // A damaged session file only costs a fresh sign-in
            Err(e) if e.is_serialization() => {
                tracing::warn!("[SessionStore] Ignoring unreadable session file: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, last_activity: DateTime<Utc>) -> Result<()> {
        let file = self.file();
        blocking(move || file.save_locked(&SessionRecord { last_activity })).await
    }

    async fn clear(&self) -> Result<()> {
        let file = self.file();
        blocking(move || file.remove()).await
    }
}

/// Process-local session store.
#[derive(Default)]
pub struct InMemorySessionStore {
    last_activity: RwLock<Option<DateTime<Utc>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(*self.last_activity.read().await)
    }

    async fn save(&self, last_activity: DateTime<Utc>) -> Result<()> {
        *self.last_activity.write().await = Some(last_activity);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.last_activity.write().await = None;
        Ok(())
    }
}
