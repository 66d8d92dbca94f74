//! Admin authentication and session persistence contracts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Checks a secret presented at admin sign-in.
#[async_trait]
pub trait AuthCheck: Send + Sync {
    /// Returns `Ok(true)` when the secret grants access.
    ///
    /// `Ok(false)` is a normal rejection; `Err` means the check itself failed.
    async fn verify(&self, secret: &str) -> Result<bool>;
}

/// Persists the last-activity timestamp of the admin session.
///
/// A stored timestamp lets a restarted console resume the session as long as
/// the inactivity window has not elapsed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored last-activity time, if any.
    async fn load(&self) -> Result<Option<DateTime<Utc>>>;

    /// Stores a new last-activity time.
    async fn save(&self, last_activity: DateTime<Utc>) -> Result<()>;

    /// Removes the stored session.
    async fn clear(&self) -> Result<()>;
}
