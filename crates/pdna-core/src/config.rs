//! Application configuration types.
//!
//! `AppConfig` is the root of `config.toml`. Every section has serde
//! defaults so a partial (or empty) file loads without errors.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Duration;
use semver::Version;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{PdnaError, Result};
use crate::inquiry::InquiryType;

/// Root configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub inquiry: InquirySettings,
}

impl AppConfig {
    /// Checks values that serde alone cannot validate.
    pub fn validate(&self) -> Result<()> {
        self.seed.semantic_version()?;
        self.admin.validate()
    }
}

/// Seed stamp written onto every persisted record.
///
/// Treated as an immutable value object: it is read once from configuration
/// and handed to the bulk-load by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Semantic version of the seeded content
    #[serde(default = "default_seed_version")]
    pub version: String,
    /// Free-form label describing the dataset
    #[serde(default = "default_dataset_label")]
    pub dataset: String,
}

fn default_seed_version() -> String {
    "1.0.0".to_string()
}

fn default_dataset_label() -> String {
    "parent-dna-core".to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            version: default_seed_version(),
            dataset: default_dataset_label(),
        }
    }
}

impl SeedConfig {
    pub fn new(version: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            dataset: dataset.into(),
        }
    }

    /// Parses the version stamp as a semantic version.
    pub fn semantic_version(&self) -> Result<Version> {
        Version::parse(&self.version).map_err(|e| {
            PdnaError::config(format!("seed.version '{}' is not a semantic version: {}", self.version, e))
        })
    }
}

/// Admin console settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Shared secret accepted at sign-in. Empty disables sign-in.
    #[serde(default)]
    pub shared_secret: String,
    #[serde(default = "default_session_timeout_minutes")]
    pub session_timeout_minutes: u64,
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
}

/// Longest accepted inactivity timeout (7 days).
pub const MAX_SESSION_TIMEOUT_MINUTES: u64 = 7 * 24 * 60;

/// Longest accepted interval between expiry checks (1 hour).
pub const MAX_CHECK_INTERVAL_SECS: u64 = 60 * 60;

fn default_session_timeout_minutes() -> u64 {
    30
}

fn default_check_interval_secs() -> u64 {
    60
}

impl AdminSettings {
    /// Both durations must be positive and within their maximum.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_TIMEOUT_MINUTES).contains(&self.session_timeout_minutes) {
            return Err(PdnaError::config(format!(
                "admin.session_timeout_minutes must be between 1 and {}, got {}",
                MAX_SESSION_TIMEOUT_MINUTES, self.session_timeout_minutes
            )));
        }
        if !(1..=MAX_CHECK_INTERVAL_SECS).contains(&self.check_interval_secs) {
            return Err(PdnaError::config(format!(
                "admin.check_interval_secs must be between 1 and {}, got {}",
                MAX_CHECK_INTERVAL_SECS, self.check_interval_secs
            )));
        }
        Ok(())
    }

    /// Inactivity window as a signed duration.
    pub fn session_timeout(&self) -> Result<Duration> {
        i64::try_from(self.session_timeout_minutes)
            .ok()
            .filter(|minutes| *minutes > 0)
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                PdnaError::config(format!(
                    "admin.session_timeout_minutes {} is out of range",
                    self.session_timeout_minutes
                ))
            })
    }

    pub fn check_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            shared_secret: String::new(),
            session_timeout_minutes: default_session_timeout_minutes(),
            check_interval_secs: default_check_interval_secs(),
        }
    }
}

/// Which document store backs the gateway.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StorageBackend {
    /// One directory per collection under the data directory
    #[default]
    Dir,
    /// Process-local map; nothing survives a restart
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Inquiry form delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquirySettings {
    /// Sender address on outgoing inquiry mail
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Used for inquiry types missing from `routing`
    #[serde(default = "default_fallback_address")]
    pub fallback_address: String,
    /// Destination address per inquiry type (`general`, `licensing`, ...)
    #[serde(default = "default_routing")]
    pub routing: BTreeMap<String, String>,
}

fn default_from_address() -> String {
    "no-reply@parentdna.example".to_string()
}

fn default_fallback_address() -> String {
    "hello@parentdna.example".to_string()
}

fn default_routing() -> BTreeMap<String, String> {
    [
        (InquiryType::General, "hello@parentdna.example"),
        (InquiryType::Licensing, "licensing@parentdna.example"),
        (InquiryType::Partnership, "partners@parentdna.example"),
        (InquiryType::Support, "support@parentdna.example"),
        (InquiryType::Press, "press@parentdna.example"),
    ]
    .into_iter()
    .map(|(kind, address)| (kind.to_string(), address.to_string()))
    .collect()
}

impl Default for InquirySettings {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            fallback_address: default_fallback_address(),
            routing: default_routing(),
        }
    }
}

impl InquirySettings {
    /// Destination address for an inquiry type.
    pub fn destination(&self, inquiry_type: InquiryType) -> &str {
        self.routing
            .get(inquiry_type.as_ref())
            .map(String::as_str)
            .unwrap_or(&self.fallback_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.admin.session_timeout_minutes, 30);
        assert_eq!(config.admin.check_interval_secs, 60);
        assert_eq!(config.storage.backend, StorageBackend::Dir);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [seed]
            version = "2.1.0"

            [storage]
            backend = "memory"

            [inquiry.routing]
            press = "media@school.example"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed.version, "2.1.0");
        assert_eq!(config.seed.dataset, "parent-dna-core");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.inquiry.destination(InquiryType::Press), "media@school.example");
        // A routing table that only names `press` sends the rest to the fallback
        assert_eq!(
            config.inquiry.destination(InquiryType::Licensing),
            config.inquiry.fallback_address
        );
    }

    #[test]
    fn test_invalid_seed_version_is_a_config_error() {
        let mut config = AppConfig::default();
        config.seed.version = "v1".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PdnaError::Config(_)));
    }

    #[test]
    fn test_oversized_session_settings_are_rejected() {
        let mut config = AppConfig::default();
        config.admin.session_timeout_minutes = 200_000_000_000_000_000;
        assert!(matches!(config.validate().unwrap_err(), PdnaError::Config(_)));

        config.admin.session_timeout_minutes = u64::MAX;
        assert!(config.validate().is_err());
        assert!(config.admin.session_timeout().is_err());

        config.admin.session_timeout_minutes = MAX_SESSION_TIMEOUT_MINUTES;
        assert!(config.validate().is_ok());
        assert_eq!(config.admin.session_timeout().unwrap(), Duration::days(7));

        config.admin.check_interval_secs = MAX_CHECK_INTERVAL_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_session_settings_are_rejected() {
        let mut config = AppConfig::default();
        config.admin.session_timeout_minutes = 0;
        assert!(config.validate().is_err());
        assert!(config.admin.session_timeout().is_err());

        let mut config = AppConfig::default();
        config.admin.check_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_routing_covers_every_inquiry_type() {
        let settings = InquirySettings::default();
        assert_eq!(settings.destination(InquiryType::Licensing), "licensing@parentdna.example");
        assert_eq!(settings.destination(InquiryType::Support), "support@parentdna.example");
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
