//! Shared-secret implementation of [`AuthCheck`].

use async_trait::async_trait;
use pdna_core::auth::AuthCheck;
use pdna_core::error::Result;

/// Accepts exactly one configured secret.
///
/// An empty configured secret rejects every attempt.
pub struct SharedSecretAuth {
    secret: String,
}

impl SharedSecretAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[async_trait]
impl AuthCheck for SharedSecretAuth {
    async fn verify(&self, secret: &str) -> Result<bool> {
        if !self.is_configured() {
            tracing::warn!("[Auth] No admin secret configured; sign-in is disabled");
            return Ok(false);
        }
        Ok(constant_time_eq(self.secret.as_bytes(), secret.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify() {
        let auth = SharedSecretAuth::new("st-joseph-2025");
        assert!(auth.verify("st-joseph-2025").await.unwrap());
        assert!(!auth.verify("st-joseph-2024").await.unwrap());
        assert!(!auth.verify("").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_secret_disables_sign_in() {
        let auth = SharedSecretAuth::new("");
        assert!(!auth.is_configured());
        assert!(!auth.verify("").await.unwrap());
    }
}
