//! Parent DNA repository trait.
//!
//! Defines the persistence contract used by the gateway. Every write takes
//! the [`SeedConfig`] so the implementation can stamp the record with its
//! version; every read returns active records only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{
    ChildArchetype, ChildGuidance, CompatibilityEntry, ModifierGuidance, ParentArchetype, Question,
};
use crate::config::SeedConfig;
use crate::error::Result;
use crate::store::Collection;

/// Number of documents per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCounts {
    pub questions: usize,
    pub archetypes: usize,
    pub compatibility: usize,
    pub guidance: usize,
    pub config: usize,
}

impl CollectionCounts {
    pub fn total(&self) -> usize {
        self.questions + self.archetypes + self.compatibility + self.guidance + self.config
    }

    pub fn get(&self, collection: Collection) -> usize {
        match collection {
            Collection::Questions => self.questions,
            Collection::Archetypes => self.archetypes,
            Collection::Compatibility => self.compatibility,
            Collection::Guidance => self.guidance,
            Collection::Config => self.config,
        }
    }

    pub fn add(&mut self, collection: Collection, n: usize) {
        match collection {
            Collection::Questions => self.questions += n,
            Collection::Archetypes => self.archetypes += n,
            Collection::Compatibility => self.compatibility += n,
            Collection::Guidance => self.guidance += n,
            Collection::Config => self.config += n,
        }
    }
}

/// Describes how consumers should interpret the seeded data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationMetadata {
    /// Name of the scoring method (`trait_sum`)
    pub scoring_method: String,
    /// Parent archetype ids in tie-break order
    pub archetype_order: Vec<String>,
    /// Trait tags shared by options and archetypes
    pub trait_vocabulary: Vec<String>,
    /// Known guidance modifier ids
    pub modifiers: Vec<String>,
}

/// Contents of the `metadata` document in the config collection.
///
/// Every field is optional on read so a hand-edited or partial document can
/// still be inspected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    /// Documents written per collection by the load that produced this record
    #[serde(default)]
    pub counts: CollectionCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationMetadata>,
}

/// Persistence of the Parent DNA catalogs.
#[async_trait]
pub trait ParentDnaRepository: Send + Sync {
    /// Counts stored documents per collection (all statuses).
    async fn counts(&self) -> Result<CollectionCounts>;

    /// Deletes every document in every Parent DNA collection.
    ///
    /// Returns how many documents were deleted.
    async fn clear_all(&self) -> Result<usize>;

    /// Stores a question at the given 1-based position.
    async fn save_question(&self, order: u32, question: &Question, seed: &SeedConfig) -> Result<()>;

    /// Stores a parent archetype at the given 1-based position.
    async fn save_archetype(
        &self,
        order: u32,
        archetype: &ParentArchetype,
        seed: &SeedConfig,
    ) -> Result<()>;

    async fn save_child_archetype(
        &self,
        order: u32,
        child: &ChildArchetype,
        seed: &SeedConfig,
    ) -> Result<()>;

    async fn save_compatibility(&self, entry: &CompatibilityEntry, seed: &SeedConfig) -> Result<()>;

    async fn save_child_guidance(&self, guidance: &ChildGuidance, seed: &SeedConfig) -> Result<()>;

    async fn save_modifier_guidance(
        &self,
        guidance: &ModifierGuidance,
        seed: &SeedConfig,
    ) -> Result<()>;

    async fn save_metadata(&self, metadata: &DatasetMetadata, seed: &SeedConfig) -> Result<()>;

    /// Active questions sorted by their stored order.
    async fn questions(&self) -> Result<Vec<Question>>;

    /// Active parent archetypes sorted by their stored order.
    async fn archetypes(&self) -> Result<Vec<ParentArchetype>>;

    /// Active child archetypes sorted by their stored order.
    async fn child_archetypes(&self) -> Result<Vec<ChildArchetype>>;

    /// Every active compatibility entry.
    async fn compatibility_entries(&self) -> Result<Vec<CompatibilityEntry>>;

    /// Directional lookup of a single compatibility entry.
    async fn find_compatibility(
        &self,
        parent_archetype_id: &str,
        child_archetype_id: &str,
    ) -> Result<Option<CompatibilityEntry>>;

    async fn find_child_guidance(&self, child_archetype_id: &str) -> Result<Option<ChildGuidance>>;

    async fn find_modifier_guidance(&self, modifier_id: &str) -> Result<Option<ModifierGuidance>>;

    /// Number of active guidance documents (child and modifier).
    async fn guidance_count(&self) -> Result<usize>;

    /// The metadata document, if present.
    async fn metadata(&self) -> Result<Option<DatasetMetadata>>;
}
