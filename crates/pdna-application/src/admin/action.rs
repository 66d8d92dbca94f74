//! Named admin actions and their result envelope.

use pdna_core::config::SeedConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::parent_dna_service::{DnaStats, ParentDnaService};

/// An operation the admin console can trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdminAction {
    /// Bulk-load every catalog
    SetupComplete,
    /// Check the stored dataset
    Validate,
    /// Read the assessment back from the store
    GetAssessment,
    /// Per-collection counts and load metadata
    Stats,
}

impl AdminAction {
    /// One-line description for help output.
    pub fn description(self) -> &'static str {
        match self {
            AdminAction::SetupComplete => "Replace all Parent DNA collections with the built-in dataset",
            AdminAction::Validate => "Check the stored dataset for missing or incomplete content",
            AdminAction::GetAssessment => "Read questions and archetypes back from the store",
            AdminAction::Stats => "Show per-collection counts and the last load",
        }
    }

    /// Whether the action may delete data.
    pub fn is_destructive(self) -> bool {
        matches!(self, AdminAction::SetupComplete)
    }
}

/// Uniform result of every admin action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<DnaStats>,
    /// Action-specific payload (load report, validation report, assessment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionEnvelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            stats: None,
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            stats: None,
            data: None,
        }
    }

    fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    fn with_stats(mut self, stats: Option<DnaStats>) -> Self {
        self.stats = stats;
        self
    }
}

/// Runs an action against the gateway.
///
/// Errors never escape: they become failure envelopes.
pub async fn execute(
    gateway: &ParentDnaService,
    seed: &SeedConfig,
    action: AdminAction,
    confirm: bool,
) -> ActionEnvelope {
    tracing::info!("[Admin] Running {}", action);

    let envelope = match action {
        AdminAction::SetupComplete => {
            let report = gateway.load_all(seed, confirm).await;
            let stats = if report.success {
                gateway.get_stats().await.ok()
            } else {
                None
            };
            let envelope = if report.success {
                ActionEnvelope::ok(report.message.clone())
            } else {
                ActionEnvelope::failure(report.message.clone())
            };
            envelope.with_stats(stats).with_data(&report)
        }
        AdminAction::Validate => match gateway.validate().await {
            Ok(report) => {
                let envelope = if report.is_valid {
                    ActionEnvelope::ok(format!(
                        "Dataset is valid ({} recommendations)",
                        report.recommendations.len()
                    ))
                } else {
                    ActionEnvelope::failure(format!(
                        "Dataset is invalid: {}",
                        report.issues.join("; ")
                    ))
                };
                envelope.with_data(&report)
            }
            Err(e) => ActionEnvelope::failure(format!("Validation failed: {}", e)),
        },
        AdminAction::GetAssessment => match gateway.assessment().await {
            Ok(assessment) if assessment.questions.is_empty() => {
                ActionEnvelope::failure("No questions stored; run setup-complete first")
                    .with_data(&assessment)
            }
            Ok(assessment) => ActionEnvelope::ok(format!(
                "Loaded {} questions and {} archetypes",
                assessment.questions.len(),
                assessment.archetypes.len()
            ))
            .with_data(&assessment),
            Err(e) => ActionEnvelope::failure(format!("Reading the assessment failed: {}", e)),
        },
        AdminAction::Stats => match gateway.get_stats().await {
            Ok(stats) => ActionEnvelope::ok(format!("{} documents stored", stats.counts.total()))
                .with_stats(Some(stats)),
            Err(e) => ActionEnvelope::failure(format!("Reading stats failed: {}", e)),
        },
    };

    if envelope.success {
        tracing::info!("[Admin] {} succeeded: {}", action, envelope.message);
    } else {
        tracing::warn!("[Admin] {} failed: {}", action, envelope.message);
    }
    envelope
}
