//! DTO for the `metadata` document of the config collection.
//!
//! Unlike catalog records every field is optional: validation must be able to
//! inspect a partial or hand-edited document and report what is missing.

use chrono::{DateTime, Utc};
use pdna_core::config::SeedConfig;
use pdna_core::parent_dna::{CollectionCounts, DatasetMetadata, IntegrationMetadata};
use serde::{Deserialize, Serialize};

use super::record::{RecordKind, RecordStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Seed version stamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub counts: CollectionCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationMetadata>,
}

impl MetadataRecord {
    pub fn new(metadata: &DatasetMetadata, seed: &SeedConfig, created_date: DateTime<Utc>) -> Self {
        Self {
            kind: Some(RecordKind::Metadata),
            status: Some(RecordStatus::Active),
            version: metadata.version.clone().or_else(|| Some(seed.version.clone())),
            dataset: metadata.dataset.clone().or_else(|| Some(seed.dataset.clone())),
            created_date: Some(created_date),
            loaded_at: metadata.loaded_at.or(Some(created_date)),
            counts: metadata.counts,
            integration: metadata.integration.clone(),
        }
    }

    /// A document without a status counts as active.
    pub fn is_active(&self) -> bool {
        self.status.unwrap_or_default() == RecordStatus::Active
    }
}

impl From<MetadataRecord> for DatasetMetadata {
    fn from(record: MetadataRecord) -> Self {
        DatasetMetadata {
            version: record.version.filter(|v| !v.trim().is_empty()),
            dataset: record.dataset,
            loaded_at: record.loaded_at.or(record.created_date),
            counts: record.counts,
            integration: record.integration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_version_reads_as_missing() {
        let record: MetadataRecord = serde_json::from_str(r#"{"version":"  "}"#).unwrap();
        assert!(record.is_active());
        let metadata = DatasetMetadata::from(record);
        assert!(metadata.version.is_none());
    }

    #[test]
    fn test_new_falls_back_to_seed_stamp() {
        let seed = SeedConfig::new("1.2.0", "pilot");
        let now = Utc::now();
        let record = MetadataRecord::new(&DatasetMetadata::default(), &seed, now);
        assert_eq!(record.version.as_deref(), Some("1.2.0"));
        assert_eq!(record.dataset.as_deref(), Some("pilot"));
        assert_eq!(record.loaded_at, Some(now));
    }
}
