//! Admin console state machine.
//!
//! ```text
//! Unauthenticated --sign_in--> Idle --run--> Running --(done)--> Idle
//!        ^                       |                                 |
//!        +------ sign_out / inactivity timeout -------------------+
//! ```
//!
//! Every method that counts as user interaction takes `now` explicitly so
//! the timeout logic can be driven by tests without sleeping.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use pdna_core::auth::{AuthCheck, SessionStore};
use pdna_core::config::{AdminSettings, SeedConfig};
use pdna_core::error::{PdnaError, Result};

use super::action::{ActionEnvelope, AdminAction, execute};
use crate::parent_dna_service::ParentDnaService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Unauthenticated,
    Idle,
    Running(AdminAction),
}

impl ConsoleState {
    pub fn is_authenticated(self) -> bool {
        !matches!(self, ConsoleState::Unauthenticated)
    }
}

#[derive(Debug)]
struct Inner {
    state: ConsoleState,
    last_activity: Option<DateTime<Utc>>,
}

/// Password-gated front door to the gateway.
pub struct AdminConsole {
    gateway: Arc<ParentDnaService>,
    auth: Arc<dyn AuthCheck>,
    sessions: Arc<dyn SessionStore>,
    seed: SeedConfig,
    timeout: Duration,
    check_interval: std::time::Duration,
    inner: Mutex<Inner>,
}

impl AdminConsole {
    /// Fails with a config error when the session settings are out of range.
    pub fn new(
        gateway: Arc<ParentDnaService>,
        auth: Arc<dyn AuthCheck>,
        sessions: Arc<dyn SessionStore>,
        seed: SeedConfig,
        settings: &AdminSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            gateway,
            auth,
            sessions,
            seed,
            timeout: settings.session_timeout()?,
            check_interval: settings.check_interval(),
            inner: Mutex::new(Inner {
                state: ConsoleState::Unauthenticated,
                last_activity: None,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| PdnaError::internal("console state lock poisoned"))
    }

    pub fn state(&self) -> Result<ConsoleState> {
        Ok(self.lock()?.state)
    }

    /// How often the front-end should call [`check_expiry`](Self::check_expiry).
    pub fn check_interval(&self) -> std::time::Duration {
        self.check_interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn seed(&self) -> &SeedConfig {
        &self.seed
    }

    pub fn gateway(&self) -> &Arc<ParentDnaService> {
        &self.gateway
    }

    /// Resumes a stored session that is still inside the inactivity window.
    ///
    /// Returns whether the console is now authenticated. A stale stored
    /// session is cleared.
    pub async fn resume(&self, now: DateTime<Utc>) -> Result<bool> {
        let Some(last) = self.sessions.load().await? else {
            return Ok(false);
        };

        if now - last >= self.timeout {
            tracing::info!("[Console] Stored session expired at {}", last + self.timeout);
            self.sessions.clear().await?;
            return Ok(false);
        }

        self.authenticate(now)?;
        self.sessions.save(now).await?;
        tracing::info!("[Console] Resumed admin session");
        Ok(true)
    }

    /// Checks the secret. Returns `Ok(false)` on a wrong secret.
    pub async fn sign_in(&self, secret: &str, now: DateTime<Utc>) -> Result<bool> {
        if !self.auth.verify(secret).await? {
            tracing::warn!("[Console] Sign-in rejected");
            return Ok(false);
        }

        self.authenticate(now)?;
        self.sessions.save(now).await?;
        tracing::info!("[Console] Admin signed in");
        Ok(true)
    }

    /// Marks the console signed in. A running operation keeps its state.
    fn authenticate(&self, now: DateTime<Utc>) -> Result<()> {
        let mut inner = self.lock()?;
        if !matches!(inner.state, ConsoleState::Running(_)) {
            inner.state = ConsoleState::Idle;
        }
        inner.last_activity = Some(now);
        Ok(())
    }

    /// Signs out and forgets the stored session.
    pub async fn sign_out(&self) -> Result<()> {
        {
            let mut inner = self.lock()?;
            inner.state = ConsoleState::Unauthenticated;
            inner.last_activity = None;
        }
        self.sessions.clear().await?;
        tracing::info!("[Console] Admin signed out");
        Ok(())
    }

    /// Records user interaction, sliding the inactivity window.
    pub async fn touch(&self, now: DateTime<Utc>) -> Result<()> {
        {
            let mut inner = self.lock()?;
            if !inner.state.is_authenticated() {
                return Ok(());
            }
            inner.last_activity = Some(now);
        }
        self.sessions.save(now).await
    }

    /// Whether the session has been inactive for the full timeout.
    pub fn is_expired(&self, now: DateTime<Utc>) -> Result<bool> {
        let inner = self.lock()?;
        Ok(match (inner.state, inner.last_activity) {
            (ConsoleState::Unauthenticated, _) => false,
            // A running operation keeps the session alive
            (ConsoleState::Running(_), _) => false,
            (ConsoleState::Idle, Some(last)) => now - last >= self.timeout,
            (ConsoleState::Idle, None) => true,
        })
    }

    /// Forces sign-out when the session expired. Returns whether it did.
    pub async fn check_expiry(&self, now: DateTime<Utc>) -> Result<bool> {
        if !self.is_expired(now)? {
            return Ok(false);
        }
        tracing::warn!("[Console] Session expired after {} minutes of inactivity", self.timeout.num_minutes());
        self.sign_out().await?;
        Ok(true)
    }

    /// Runs an admin action.
    ///
    /// Fails with a security error when signed out or expired. A second
    /// action while one is running is rejected with a failure envelope.
    pub async fn run(
        &self,
        action: AdminAction,
        confirm: bool,
        now: DateTime<Utc>,
    ) -> Result<ActionEnvelope> {
        if self.check_expiry(now).await? {
            return Err(PdnaError::security("Session expired; sign in again"));
        }

        {
            let mut inner = self.lock()?;
            match inner.state {
                ConsoleState::Unauthenticated => {
                    return Err(PdnaError::security("Sign in to run admin actions"));
                }
                ConsoleState::Running(current) => {
                    tracing::warn!("[Console] Rejected {} while {} is running", action, current);
                    return Ok(ActionEnvelope::failure(format!(
                        "{} is still running; wait for it to finish",
                        current
                    )));
                }
                ConsoleState::Idle => {
                    inner.state = ConsoleState::Running(action);
                    inner.last_activity = Some(now);
                }
            }
        }
        let _running = RunningGuard { console: self };
        let started = Instant::now();
        self.sessions.save(now).await?;

        let envelope = execute(&self.gateway, &self.seed, action, confirm).await;

        // Completion counts as activity, measured from the caller's clock
        let finished_at = now + Duration::from_std(started.elapsed()).unwrap_or_default();
        {
            let mut inner = self.lock()?;
            inner.state = ConsoleState::Idle;
            inner.last_activity = Some(finished_at);
        }
        self.sessions.save(finished_at).await?;
        Ok(envelope)
    }
}

/// Returns the console to idle if a running operation is dropped midway.
struct RunningGuard<'a> {
    console: &'a AdminConsole,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.console.inner.lock() {
            if matches!(inner.state, ConsoleState::Running(_)) {
                inner.state = ConsoleState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pdna_core::store::{Document, DocumentStore};
    use pdna_infrastructure::{InMemoryDocumentStore, InMemorySessionStore, SharedSecretAuth};
    use serde_json::Value;

    const SECRET: &str = "correct horse";

    fn console_with(sessions: Arc<InMemorySessionStore>) -> AdminConsole {
        AdminConsole::new(
            Arc::new(ParentDnaService::with_store(Arc::new(InMemoryDocumentStore::new()))),
            Arc::new(SharedSecretAuth::new(SECRET)),
            sessions,
            SeedConfig::default(),
            &AdminSettings::default(),
        )
        .unwrap()
    }

    fn console() -> AdminConsole {
        console_with(Arc::new(InMemorySessionStore::new()))
    }

    /// Takes a millisecond per write so a bulk load has measurable duration.
    struct SlowStore(InMemoryDocumentStore);

    #[async_trait]
    impl DocumentStore for SlowStore {
        async fn list(&self, collection: &str) -> Result<Vec<Document>> {
            self.0.list(collection).await
        }

        async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
            self.0.get(collection, id).await
        }

        async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
            self.0.set(collection, id, data).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<()> {
            self.0.delete(collection, id).await
        }
    }

    #[tokio::test]
    async fn test_wrong_secret_stays_signed_out() {
        let console = console();
        assert!(!console.sign_in("guess", Utc::now()).await.unwrap());
        assert_eq!(console.state().unwrap(), ConsoleState::Unauthenticated);

        let err = console
            .run(AdminAction::Stats, false, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, PdnaError::Security(_)));
    }

    #[tokio::test]
    async fn test_inactivity_timeout_slides_with_interaction() {
        let console = console();
        let t0 = Utc::now();
        assert!(console.sign_in(SECRET, t0).await.unwrap());

        assert!(!console.check_expiry(t0 + Duration::minutes(29)).await.unwrap());
        console.touch(t0 + Duration::minutes(29)).await.unwrap();
        // 31 minutes after sign-in but only 2 after the last interaction
        assert!(!console.check_expiry(t0 + Duration::minutes(31)).await.unwrap());

        assert!(console.check_expiry(t0 + Duration::minutes(59)).await.unwrap());
        assert_eq!(console.state().unwrap(), ConsoleState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_resume_within_window() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let t0 = Utc::now();
        assert!(console_with(sessions.clone()).sign_in(SECRET, t0).await.unwrap());

        let restarted = console_with(sessions.clone());
        assert!(restarted.resume(t0 + Duration::minutes(10)).await.unwrap());
        assert_eq!(restarted.state().unwrap(), ConsoleState::Idle);
    }

    #[tokio::test]
    async fn test_resume_after_window_clears_session() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let t0 = Utc::now();
        assert!(console_with(sessions.clone()).sign_in(SECRET, t0).await.unwrap());

        let restarted = console_with(sessions.clone());
        assert!(!restarted.resume(t0 + Duration::minutes(30)).await.unwrap());
        assert!(sessions.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_stored_session() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let console = console_with(sessions.clone());
        console.sign_in(SECRET, Utc::now()).await.unwrap();
        assert!(sessions.load().await.unwrap().is_some());

        console.sign_out().await.unwrap();
        assert!(sessions.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_run_returns_to_idle() {
        let console = console();
        let now = Utc::now();
        console.sign_in(SECRET, now).await.unwrap();

        let envelope = console.run(AdminAction::SetupComplete, false, now).await.unwrap();
        assert!(envelope.success, "{}", envelope.message);
        assert_eq!(console.state().unwrap(), ConsoleState::Idle);
    }

    #[tokio::test]
    async fn test_second_operation_is_rejected_while_running() {
        let console = console();
        let now = Utc::now();
        console.sign_in(SECRET, now).await.unwrap();
        console.lock().unwrap().state = ConsoleState::Running(AdminAction::SetupComplete);

        let envelope = console.run(AdminAction::Validate, false, now).await.unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.contains("setup-complete"));
        assert!(!console.is_expired(now + Duration::hours(2)).unwrap());
    }

    #[tokio::test]
    async fn test_run_after_expiry_is_refused() {
        let console = console();
        let t0 = Utc::now();
        console.sign_in(SECRET, t0).await.unwrap();

        let err = console
            .run(AdminAction::Validate, false, t0 + Duration::minutes(45))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expired"));
        assert_eq!(console.state().unwrap(), ConsoleState::Unauthenticated);
    }

    #[test]
    fn test_out_of_range_timeout_is_a_config_error() {
        for minutes in [0, 200_000_000_000_000_000, u64::MAX] {
            let settings = AdminSettings {
                session_timeout_minutes: minutes,
                ..AdminSettings::default()
            };
            let result = AdminConsole::new(
                Arc::new(ParentDnaService::with_store(Arc::new(InMemoryDocumentStore::new()))),
                Arc::new(SharedSecretAuth::new(SECRET)),
                Arc::new(InMemorySessionStore::new()),
                SeedConfig::default(),
                &settings,
            );
            assert!(matches!(result.err(), Some(PdnaError::Config(_))), "{}", minutes);
        }
    }

    #[tokio::test]
    async fn test_sign_in_leaves_running_operation_alone() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let console = console_with(sessions.clone());
        let now = Utc::now();
        console.sign_in(SECRET, now).await.unwrap();
        console.lock().unwrap().state = ConsoleState::Running(AdminAction::SetupComplete);

        assert!(console.sign_in(SECRET, now).await.unwrap());
        assert!(console.resume(now).await.unwrap());
        assert_eq!(
            console.state().unwrap(),
            ConsoleState::Running(AdminAction::SetupComplete)
        );

        let envelope = console.run(AdminAction::Validate, false, now).await.unwrap();
        assert!(!envelope.success);
    }

    #[tokio::test]
    async fn test_completion_time_is_persisted() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let console = AdminConsole::new(
            Arc::new(ParentDnaService::with_store(Arc::new(SlowStore(InMemoryDocumentStore::new())))),
            Arc::new(SharedSecretAuth::new(SECRET)),
            sessions.clone(),
            SeedConfig::default(),
            &AdminSettings::default(),
        )
        .unwrap();
        let t0 = Utc::now() - Duration::hours(1);
        console.sign_in(SECRET, t0).await.unwrap();

        let envelope = console.run(AdminAction::SetupComplete, false, t0).await.unwrap();
        assert!(envelope.success, "{}", envelope.message);

        // The stored session reflects when the load finished, not when it started
        let saved = sessions.load().await.unwrap().unwrap();
        assert!(saved > t0);
        assert!(saved < t0 + Duration::minutes(1));
        assert_eq!(console.state().unwrap(), ConsoleState::Idle);
    }
}
