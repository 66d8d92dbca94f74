//! Persisted record envelopes.
//!
//! Every catalog document is the domain value with bookkeeping fields
//! flattened next to it:
//!
//! ```json
//! { "id": "free_half_hour", "prompt": "...", "options": [...],
//!   "kind": "question", "order": 1, "status": "active",
//!   "version": "1.0.0", "created_date": "2025-01-01T00:00:00Z" }
//! ```

use chrono::{DateTime, Utc};
use pdna_core::config::SeedConfig;
use pdna_core::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a stored record. Reads only return `Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Archived,
}

/// Distinguishes record types sharing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Question,
    ParentArchetype,
    ChildArchetype,
    Compatibility,
    ChildGuidance,
    ModifierGuidance,
    Metadata,
}

impl RecordKind {
    /// Value stored in the `kind` field.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Question => "question",
            RecordKind::ParentArchetype => "parent_archetype",
            RecordKind::ChildArchetype => "child_archetype",
            RecordKind::Compatibility => "compatibility",
            RecordKind::ChildGuidance => "child_guidance",
            RecordKind::ModifierGuidance => "modifier_guidance",
            RecordKind::Metadata => "metadata",
        }
    }
}

/// A domain value plus its persistence envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    #[serde(flatten)]
    pub body: T,
    pub kind: RecordKind,
    /// 1-based position for ordered catalogs (questions, archetypes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub status: RecordStatus,
    /// Seed version the record was written with
    pub version: String,
    pub created_date: DateTime<Utc>,
}

impl<T> StoredRecord<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Wraps a value as a fresh active record.
    pub fn new(body: T, kind: RecordKind, seed: &SeedConfig, created_date: DateTime<Utc>) -> Self {
        Self {
            body,
            kind,
            order: None,
            status: RecordStatus::Active,
            version: seed.version.clone(),
            created_date,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdna_core::parent_dna::questions::question_bank;

    #[test]
    fn test_envelope_fields_sit_next_to_body() {
        let question = question_bank().remove(0);
        let created = DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut record =
            StoredRecord::new(question.clone(), RecordKind::Question, &SeedConfig::default(), created);
        record.order = Some(1);

        let value = record.to_value().unwrap();
        assert_eq!(value["id"], "free_half_hour");
        assert_eq!(value["kind"], "question");
        assert_eq!(value["order"], 1);
        assert_eq!(value["status"], "active");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["created_date"], "2025-03-01T12:00:00Z");

        let back = StoredRecord::<pdna_core::parent_dna::Question>::from_value(value).unwrap();
        assert_eq!(back.body, question);
        assert_eq!(back.order, Some(1));
        assert!(back.is_active());
    }

    #[test]
    fn test_kind_strings_match_serde() {
        for kind in [
            RecordKind::Question,
            RecordKind::ParentArchetype,
            RecordKind::ChildArchetype,
            RecordKind::Compatibility,
            RecordKind::ChildGuidance,
            RecordKind::ModifierGuidance,
            RecordKind::Metadata,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
