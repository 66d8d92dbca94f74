//! Document-store-backed implementation of [`ParentDnaRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pdna_core::config::SeedConfig;
use pdna_core::error::Result;
use pdna_core::parent_dna::{
    ChildArchetype, ChildGuidance, CollectionCounts, CompatibilityEntry, DatasetMetadata,
    ModifierGuidance, ParentArchetype, ParentDnaRepository, Question, compatibility_key,
};
use pdna_core::store::{
    Collection, DocumentStore, FieldFilter, METADATA_DOCUMENT_ID, child_archetype_key,
    child_guidance_key, modifier_guidance_key, question_key,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::{MetadataRecord, RecordKind, StoredRecord};

/// Maps Parent DNA catalogs onto the five `parent_dna_*` collections.
pub struct DocumentParentDnaRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentParentDnaRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn put<T>(
        &self,
        collection: Collection,
        id: &str,
        kind: RecordKind,
        order: Option<u32>,
        body: &T,
        seed: &SeedConfig,
    ) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync,
    {
        let mut record = StoredRecord::new(body.clone(), kind, seed, Utc::now());
        record.order = order;
        self.store.set(collection.name(), id, record.to_value()?).await
    }

    /// Active records of one kind, ordered by `order` then id.
    async fn read_kind<T>(&self, collection: Collection, kind: RecordKind) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let documents = self
            .store
            .query(collection.name(), &FieldFilter::equals("kind", kind.as_str()))
            .await?;

        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            let record = StoredRecord::<T>::from_value(document.data)?;
            if record.is_active() {
                records.push(record);
            }
        }
        // Stable sort keeps the id order returned by the store for unordered kinds
        records.sort_by_key(|r| r.order.unwrap_or(u32::MAX));
        Ok(records.into_iter().map(|r| r.body).collect())
    }

    async fn read_one<T>(&self, collection: Collection, id: &str, kind: RecordKind) -> Result<Option<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(document) = self.store.get(collection.name(), id).await? else {
            return Ok(None);
        };
        let record = StoredRecord::<T>::from_value(document.data)?;
        Ok((record.kind == kind && record.is_active()).then_some(record.body))
    }
}

#[async_trait]
impl ParentDnaRepository for DocumentParentDnaRepository {
    async fn counts(&self) -> Result<CollectionCounts> {
        let mut counts = CollectionCounts::default();
        for collection in Collection::all() {
            counts.add(collection, self.store.count(collection.name()).await?);
        }
        Ok(counts)
    }

    async fn clear_all(&self) -> Result<usize> {
        let mut deleted = 0;
        for collection in Collection::all() {
            // Ids only, so documents with unreadable bodies are removed too
            for id in self.store.list_ids(collection.name()).await? {
                self.store.delete(collection.name(), &id).await?;
                deleted += 1;
            }
            tracing::debug!("[Repository] Cleared {}", collection);
        }
        Ok(deleted)
    }

    async fn save_question(&self, order: u32, question: &Question, seed: &SeedConfig) -> Result<()> {
        self.put(
            Collection::Questions,
            &question_key(order),
            RecordKind::Question,
            Some(order),
            question,
            seed,
        )
        .await
    }

    async fn save_archetype(
        &self,
        order: u32,
        archetype: &ParentArchetype,
        seed: &SeedConfig,
    ) -> Result<()> {
        self.put(
            Collection::Archetypes,
            &archetype.id,
            RecordKind::ParentArchetype,
            Some(order),
            archetype,
            seed,
        )
        .await
    }

    async fn save_child_archetype(
        &self,
        order: u32,
        child: &ChildArchetype,
        seed: &SeedConfig,
    ) -> Result<()> {
        self.put(
            Collection::Archetypes,
            &child_archetype_key(&child.id),
            RecordKind::ChildArchetype,
            Some(order),
            child,
            seed,
        )
        .await
    }

    async fn save_compatibility(&self, entry: &CompatibilityEntry, seed: &SeedConfig) -> Result<()> {
        self.put(
            Collection::Compatibility,
            &entry.key(),
            RecordKind::Compatibility,
            None,
            entry,
            seed,
        )
        .await
    }

    async fn save_child_guidance(&self, guidance: &ChildGuidance, seed: &SeedConfig) -> Result<()> {
        self.put(
            Collection::Guidance,
            &child_guidance_key(&guidance.child_archetype_id),
            RecordKind::ChildGuidance,
            None,
            guidance,
            seed,
        )
        .await
    }

    async fn save_modifier_guidance(
        &self,
        guidance: &ModifierGuidance,
        seed: &SeedConfig,
    ) -> Result<()> {
        self.put(
            Collection::Guidance,
            &modifier_guidance_key(&guidance.modifier_id),
            RecordKind::ModifierGuidance,
            None,
            guidance,
            seed,
        )
        .await
    }

    async fn save_metadata(&self, metadata: &DatasetMetadata, seed: &SeedConfig) -> Result<()> {
        let record = MetadataRecord::new(metadata, seed, Utc::now());
        self.store
            .set(
                Collection::Config.name(),
                METADATA_DOCUMENT_ID,
                serde_json::to_value(&record)?,
            )
            .await
    }

    async fn questions(&self) -> Result<Vec<Question>> {
        self.read_kind(Collection::Questions, RecordKind::Question).await
    }

    async fn archetypes(&self) -> Result<Vec<ParentArchetype>> {
        self.read_kind(Collection::Archetypes, RecordKind::ParentArchetype)
            .await
    }

    async fn child_archetypes(&self) -> Result<Vec<ChildArchetype>> {
        self.read_kind(Collection::Archetypes, RecordKind::ChildArchetype)
            .await
    }

    async fn compatibility_entries(&self) -> Result<Vec<CompatibilityEntry>> {
        self.read_kind(Collection::Compatibility, RecordKind::Compatibility)
            .await
    }

    async fn find_compatibility(
        &self,
        parent_archetype_id: &str,
        child_archetype_id: &str,
    ) -> Result<Option<CompatibilityEntry>> {
        let key = compatibility_key(parent_archetype_id, child_archetype_id);
        let entry: Option<CompatibilityEntry> = self
            .read_one(Collection::Compatibility, &key, RecordKind::Compatibility)
            .await?;
        // Ids containing '_' can collide on the joined key; confirm the pair.
        Ok(entry.filter(|e| {
            e.parent_archetype_id == parent_archetype_id && e.child_archetype_id == child_archetype_id
        }))
    }

    async fn find_child_guidance(&self, child_archetype_id: &str) -> Result<Option<ChildGuidance>> {
        self.read_one(
            Collection::Guidance,
            &child_guidance_key(child_archetype_id),
            RecordKind::ChildGuidance,
        )
        .await
    }

    async fn find_modifier_guidance(&self, modifier_id: &str) -> Result<Option<ModifierGuidance>> {
        self.read_one(
            Collection::Guidance,
            &modifier_guidance_key(modifier_id),
            RecordKind::ModifierGuidance,
        )
        .await
    }

    async fn guidance_count(&self) -> Result<usize> {
        Ok(self
            .store
            .query(Collection::Guidance.name(), &FieldFilter::active())
            .await?
            .len())
    }

    async fn metadata(&self) -> Result<Option<DatasetMetadata>> {
        let Some(document) = self
            .store
            .get(Collection::Config.name(), METADATA_DOCUMENT_ID)
            .await?
        else {
            return Ok(None);
        };
        let record: MetadataRecord = serde_json::from_value(document.data)?;
        Ok(record.is_active().then(|| record.into()))
    }
}
