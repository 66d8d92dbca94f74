//! Parent DNA persistence gateway.
//!
//! `ParentDnaService` bulk-loads the built-in catalogs into the document
//! store and serves every read the admin console and the front-ends need.
//!
//! # Bulk-load contract
//!
//! - Existing documents are only replaced when the caller confirms.
//! - Writes are sequential. The first failure stops the load; documents
//!   already written stay in the store.
//! - Every outcome is reported as a [`LoadReport`] envelope, never as `Err`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pdna_core::config::SeedConfig;
use pdna_core::error::Result;
use pdna_core::parent_dna::{
    ChildArchetype, CollectionCounts, CompatibilityEntry, DatasetMetadata, GuidanceBundle,
    ParentArchetype, ParentDnaDataset, ParentDnaRepository, Question, ResponseSet, ScoringResult,
    builtin_dataset, classify, integration_metadata,
};
use pdna_core::store::{Collection, DocumentStore};
use pdna_infrastructure::DocumentParentDnaRepository;
use serde::{Deserialize, Serialize};

/// Fewer active questions than this makes the dataset invalid.
pub const MIN_QUESTIONS: usize = 5;
/// Fewer active parent archetypes than this makes the dataset invalid.
pub const MIN_ARCHETYPES: usize = 6;
/// Number of (parent, child) pairs in a complete compatibility matrix.
pub const FULL_COMPATIBILITY_COVERAGE: usize = 36;

/// Result envelope of [`ParentDnaService::load_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub success: bool,
    pub message: String,
    /// Set when existing data blocked an unconfirmed load
    #[serde(default)]
    pub requires_confirmation: bool,
    /// Documents removed before writing
    #[serde(default)]
    pub documents_deleted: usize,
    pub documents_written: usize,
    pub per_collection_counts: CollectionCounts,
}

impl LoadReport {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            requires_confirmation: false,
            documents_deleted: 0,
            documents_written: 0,
            per_collection_counts: CollectionCounts::default(),
        }
    }
}

/// Counts of active records, as seen by validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCounts {
    pub questions: usize,
    pub archetypes: usize,
    pub child_archetypes: usize,
    pub compatibility: usize,
    pub guidance: usize,
}

/// Result of [`ParentDnaService::validate`].
///
/// `issues` are fatal and make `is_valid` false; `recommendations` never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub counts: ValidationCounts,
}

/// Result of [`ParentDnaService::get_stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnaStats {
    pub counts: CollectionCounts,
    pub version: Option<String>,
    pub dataset: Option<String>,
    pub last_loaded: Option<DateTime<Utc>>,
}

/// Everything a client needs to run the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
    pub archetypes: Vec<ParentArchetype>,
}

/// The persistence gateway.
pub struct ParentDnaService {
    repository: Arc<dyn ParentDnaRepository>,
    dataset: ParentDnaDataset,
}

impl ParentDnaService {
    /// Creates a gateway that seeds the given dataset.
    pub fn new(repository: Arc<dyn ParentDnaRepository>, dataset: ParentDnaDataset) -> Self {
        Self { repository, dataset }
    }

    /// Gateway over a document store, seeding the built-in dataset.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(
            Arc::new(DocumentParentDnaRepository::new(store)),
            builtin_dataset(),
        )
    }

    pub fn dataset(&self) -> &ParentDnaDataset {
        &self.dataset
    }

    /// Replaces the stored catalogs with the seed dataset.
    pub async fn load_all(&self, seed: &SeedConfig, confirm: bool) -> LoadReport {
        if let Err(e) = seed.semantic_version() {
            return LoadReport::failure(e.to_string());
        }

        let existing = match self.repository.counts().await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::error!("[Gateway] Could not count existing documents: {}", e);
                return LoadReport::failure(format!("Could not inspect the store: {}", e));
            }
        };

        if existing.total() > 0 && !confirm {
            tracing::warn!(
                "[Gateway] {} existing documents found; load needs confirmation",
                existing.total()
            );
            let mut report = LoadReport::failure(format!(
                "{} existing documents would be deleted. Confirm to replace them.",
                existing.total()
            ));
            report.requires_confirmation = true;
            report.per_collection_counts = existing;
            return report;
        }

        tracing::info!(
            "[Gateway] Loading Parent DNA dataset '{}' version {}",
            seed.dataset,
            seed.version
        );

        let deleted = match self.repository.clear_all().await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!("[Gateway] Clearing collections failed: {}", e);
                return LoadReport::failure(format!("Clearing existing documents failed: {}", e));
            }
        };
        if deleted > 0 {
            tracing::info!("[Gateway] Deleted {} existing documents", deleted);
        }

        let mut written = CollectionCounts::default();
        match self.write_dataset(seed, &mut written).await {
            Ok(()) => {
                tracing::info!("[Gateway] Load complete: {} documents written", written.total());
                LoadReport {
                    success: true,
                    message: format!("Loaded {} documents", written.total()),
                    requires_confirmation: false,
                    documents_deleted: deleted,
                    documents_written: written.total(),
                    per_collection_counts: written,
                }
            }
            Err(e) => {
                tracing::error!(
                    "[Gateway] Load aborted after {} documents: {}",
                    written.total(),
                    e
                );
                LoadReport {
                    success: false,
                    message: format!(
                        "Load aborted after {} documents: {}",
                        written.total(),
                        e
                    ),
                    requires_confirmation: false,
                    documents_deleted: deleted,
                    documents_written: written.total(),
                    per_collection_counts: written,
                }
            }
        }
    }

    /// Writes every document, counting successful writes into `written`.
    async fn write_dataset(&self, seed: &SeedConfig, written: &mut CollectionCounts) -> Result<()> {
        let repo = &self.repository;
        let dataset = &self.dataset;

        for (i, question) in dataset.questions.iter().enumerate() {
            repo.save_question(i as u32 + 1, question, seed).await?;
            written.add(Collection::Questions, 1);
        }
        tracing::info!("[Gateway] Wrote {} questions", written.questions);

        for (i, archetype) in dataset.archetypes.iter().enumerate() {
            repo.save_archetype(i as u32 + 1, archetype, seed).await?;
            written.add(Collection::Archetypes, 1);
        }
        for (i, child) in dataset.child_archetypes.iter().enumerate() {
            repo.save_child_archetype(i as u32 + 1, child, seed).await?;
            written.add(Collection::Archetypes, 1);
        }
        tracing::info!("[Gateway] Wrote {} archetype records", written.archetypes);

        for entry in &dataset.compatibility {
            repo.save_compatibility(entry, seed).await?;
            written.add(Collection::Compatibility, 1);
        }
        tracing::info!("[Gateway] Wrote {} compatibility entries", written.compatibility);

        for guidance in &dataset.child_guidance {
            repo.save_child_guidance(guidance, seed).await?;
            written.add(Collection::Guidance, 1);
        }
        for guidance in &dataset.modifier_guidance {
            repo.save_modifier_guidance(guidance, seed).await?;
            written.add(Collection::Guidance, 1);
        }
        tracing::info!("[Gateway] Wrote {} guidance entries", written.guidance);

        let metadata = DatasetMetadata {
            version: Some(seed.version.clone()),
            dataset: Some(seed.dataset.clone()),
            loaded_at: Some(Utc::now()),
            counts: *written,
            integration: Some(integration_metadata(dataset)),
        };
        repo.save_metadata(&metadata, seed).await?;
        written.add(Collection::Config, 1);

        Ok(())
    }

    /// Active questions in presentation order.
    pub async fn get_questions(&self) -> Result<Vec<Question>> {
        self.repository.questions().await
    }

    /// Active parent archetypes in tie-break order.
    pub async fn get_archetypes(&self) -> Result<Vec<ParentArchetype>> {
        self.repository.archetypes().await
    }

    pub async fn get_child_archetypes(&self) -> Result<Vec<ChildArchetype>> {
        self.repository.child_archetypes().await
    }

    /// Directional compatibility lookup. A missing pair is `Ok(None)`.
    pub async fn get_compatibility(
        &self,
        parent_archetype_id: &str,
        child_archetype_id: &str,
    ) -> Result<Option<CompatibilityEntry>> {
        self.repository
            .find_compatibility(parent_archetype_id, child_archetype_id)
            .await
    }

    /// Guidance for a child archetype plus the requested modifiers.
    ///
    /// Modifiers keep the requested order; unknown ones are skipped.
    pub async fn get_guidance(
        &self,
        child_archetype_id: &str,
        modifiers: &[String],
    ) -> Result<GuidanceBundle> {
        let child = self.repository.find_child_guidance(child_archetype_id).await?;
        let mut found = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            match self.repository.find_modifier_guidance(modifier).await? {
                Some(guidance) => found.push(guidance),
                None => tracing::debug!("[Gateway] Skipping unknown modifier '{}'", modifier),
            }
        }
        Ok(GuidanceBundle {
            child,
            modifiers: found,
        })
    }

    pub async fn get_stats(&self) -> Result<DnaStats> {
        let counts = self.repository.counts().await?;
        let metadata = self.repository.metadata().await?;
        Ok(DnaStats {
            counts,
            version: metadata.as_ref().and_then(|m| m.version.clone()),
            dataset: metadata.as_ref().and_then(|m| m.dataset.clone()),
            last_loaded: metadata.and_then(|m| m.loaded_at),
        })
    }

    /// Checks the stored dataset against the minimums the product needs.
    pub async fn validate(&self) -> Result<ValidationReport> {
        let counts = ValidationCounts {
            questions: self.repository.questions().await?.len(),
            archetypes: self.repository.archetypes().await?.len(),
            child_archetypes: self.repository.child_archetypes().await?.len(),
            compatibility: self.repository.compatibility_entries().await?.len(),
            guidance: self.repository.guidance_count().await?,
        };
        let metadata = self.repository.metadata().await?;

        let mut issues = Vec::new();
        if counts.questions < MIN_QUESTIONS {
            issues.push(format!(
                "Only {} questions found; at least {} are required",
                counts.questions, MIN_QUESTIONS
            ));
        }
        if counts.archetypes < MIN_ARCHETYPES {
            issues.push(format!(
                "Only {} parent archetypes found; at least {} are required",
                counts.archetypes, MIN_ARCHETYPES
            ));
        }
        if counts.compatibility == 0 {
            issues.push("No compatibility entries found".to_string());
        }
        if counts.guidance == 0 {
            issues.push("No guidance entries found".to_string());
        }

        let mut recommendations = Vec::new();
        match &metadata {
            None => recommendations.push("Metadata document is missing".to_string()),
            Some(m) => {
                if m.version.is_none() {
                    recommendations.push("Metadata has no version stamp".to_string());
                }
                if m.integration.is_none() {
                    recommendations.push("Metadata has no integration section".to_string());
                }
            }
        }
        if counts.compatibility < FULL_COMPATIBILITY_COVERAGE {
            recommendations.push(format!(
                "Compatibility matrix covers {} of {} parent/child pairs",
                counts.compatibility, FULL_COMPATIBILITY_COVERAGE
            ));
        }

        let report = ValidationReport {
            is_valid: issues.is_empty(),
            issues,
            recommendations,
            counts,
        };
        tracing::info!(
            "[Gateway] Validation finished: valid={}, {} issues, {} recommendations",
            report.is_valid,
            report.issues.len(),
            report.recommendations.len()
        );
        Ok(report)
    }

    /// Reads the assessment back from the store.
    pub async fn assessment(&self) -> Result<Assessment> {
        Ok(Assessment {
            questions: self.repository.questions().await?,
            archetypes: self.repository.archetypes().await?,
        })
    }

    /// Classifies answers against the stored catalogs.
    pub async fn classify(&self, responses: &ResponseSet) -> Result<ScoringResult> {
        let assessment = self.assessment().await?;
        Ok(classify(
            responses,
            &assessment.questions,
            &assessment.archetypes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdna_core::parent_dna::archetypes::*;
    use pdna_core::parent_dna::guidance::{ANXIOUS_READER, DYSLEXIA};
    use pdna_infrastructure::InMemoryDocumentStore;

    fn service() -> ParentDnaService {
        ParentDnaService::with_store(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn test_load_into_empty_store_needs_no_confirmation() {
        let service = service();
        let report = service.load_all(&SeedConfig::default(), false).await;

        assert!(report.success, "{}", report.message);
        let counts = report.per_collection_counts;
        assert_eq!(counts.questions, 12);
        assert_eq!(counts.archetypes, 12);
        assert_eq!(counts.compatibility, 18);
        assert_eq!(counts.guidance, 11);
        assert_eq!(counts.config, 1);
        assert_eq!(report.documents_written, counts.total());
    }

    #[tokio::test]
    async fn test_reload_requires_confirmation() {
        let service = service();
        let seed = SeedConfig::default();
        assert!(service.load_all(&seed, false).await.success);

        let blocked = service.load_all(&seed, false).await;
        assert!(!blocked.success);
        assert!(blocked.requires_confirmation);
        assert_eq!(blocked.documents_written, 0);
        assert_eq!(blocked.per_collection_counts.questions, 12);

        let confirmed = service.load_all(&seed, true).await;
        assert!(confirmed.success);
        assert_eq!(confirmed.documents_deleted, blocked.per_collection_counts.total());
        assert_eq!(service.get_stats().await.unwrap().counts.total(), confirmed.documents_written);
    }

    #[tokio::test]
    async fn test_invalid_seed_version_fails_before_writing() {
        let service = service();
        let report = service
            .load_all(&SeedConfig::new("not-semver", "x"), true)
            .await;
        assert!(!report.success);
        assert_eq!(service.get_stats().await.unwrap().counts.total(), 0);
    }

    #[tokio::test]
    async fn test_reads_after_load() {
        let service = service();
        service.load_all(&SeedConfig::new("1.4.0", "pilot"), false).await;

        let questions = service.get_questions().await.unwrap();
        assert_eq!(questions, service.dataset().questions);

        let archetypes = service.get_archetypes().await.unwrap();
        assert_eq!(archetypes[0].id, AUTONOMY_SUPPORTER);
        assert_eq!(service.get_child_archetypes().await.unwrap().len(), 6);

        let stats = service.get_stats().await.unwrap();
        assert_eq!(stats.version.as_deref(), Some("1.4.0"));
        assert_eq!(stats.dataset.as_deref(), Some("pilot"));
        assert!(stats.last_loaded.is_some());
    }

    #[tokio::test]
    async fn test_guidance_keeps_modifier_order() {
        let service = service();
        service.load_all(&SeedConfig::default(), false).await;

        let bundle = service
            .get_guidance(
                HESITANT_READER,
                &[
                    ANXIOUS_READER.to_string(),
                    "unknown".to_string(),
                    DYSLEXIA.to_string(),
                ],
            )
            .await
            .unwrap();
        assert!(bundle.child.is_some());
        let ids: Vec<_> = bundle.modifiers.iter().map(|m| m.modifier_id.as_str()).collect();
        assert_eq!(ids, vec![ANXIOUS_READER, DYSLEXIA]);
    }

    #[tokio::test]
    async fn test_validate_complete_load_is_valid_with_recommendations() {
        let service = service();
        service.load_all(&SeedConfig::default(), false).await;

        let report = service.validate().await.unwrap();
        assert!(report.is_valid);
        assert!(report.issues.is_empty());
        assert_eq!(report.recommendations.len(), 1);
        assert!(report.recommendations[0].contains("18 of 36"));
    }

    #[tokio::test]
    async fn test_validate_empty_store() {
        let report = service().validate().await.unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 4);
        assert!(report.recommendations.iter().any(|r| r.contains("missing")));
    }

    #[tokio::test]
    async fn test_classify_against_stored_catalog() {
        let service = service();
        service.load_all(&SeedConfig::default(), false).await;

        let responses = ResponseSet::new()
            .with("reluctant_evening", "a")
            .with("while_they_read", "a");
        let result = service.classify(&responses).await.unwrap();
        assert_eq!(result.winning_archetype_id, AUTONOMY_SUPPORTER);
        assert!(result.is_conclusive());
    }
}
