use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pdna_application::{AdminAction, ParentDnaService, admin::execute};
use pdna_core::config::SeedConfig;
use pdna_core::error::{PdnaError, Result};
use pdna_core::parent_dna::{ParentDnaDataset, builtin_dataset};
use pdna_core::store::{Collection, Document, DocumentStore};
use pdna_infrastructure::{DirDocumentStore, DocumentParentDnaRepository, InMemoryDocumentStore};
use serde_json::Value;
use tempfile::TempDir;

/// Delegates to an in-memory store but fails the n-th `set` and every later one.
struct FailingStore {
    inner: InMemoryDocumentStore,
    sets: AtomicUsize,
    fail_at: usize,
}

impl FailingStore {
    fn failing_at(fail_at: usize) -> Self {
        Self {
            inner: InMemoryDocumentStore::new(),
            sets: AtomicUsize::new(0),
            fail_at,
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let n = self.sets.fetch_add(1, Ordering::SeqCst) + 1;
        if n >= self.fail_at {
            return Err(PdnaError::data_access("quota exceeded"));
        }
        self.inner.set(collection, id, data).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.inner.delete(collection, id).await
    }
}

fn service_over(store: Arc<dyn DocumentStore>, dataset: ParentDnaDataset) -> ParentDnaService {
    ParentDnaService::new(Arc::new(DocumentParentDnaRepository::new(store)), dataset)
}

#[tokio::test]
async fn failed_write_aborts_without_rollback() {
    let store = Arc::new(FailingStore::failing_at(15));
    let service = service_over(store.clone(), builtin_dataset());

    let report = service.load_all(&SeedConfig::default(), false).await;

    assert!(!report.success);
    assert!(report.message.contains("quota exceeded"));
    assert_eq!(report.documents_written, 14);
    assert_eq!(report.per_collection_counts.questions, 12);
    assert_eq!(report.per_collection_counts.archetypes, 2);
    // Writes stopped at the first failure
    assert_eq!(store.sets.load(Ordering::SeqCst), 15);
    // Documents written before the failure are still there
    assert_eq!(store.count(Collection::Questions.name()).await.unwrap(), 12);
    assert_eq!(store.count(Collection::Archetypes.name()).await.unwrap(), 2);
    assert_eq!(store.count(Collection::Config.name()).await.unwrap(), 0);
}

#[tokio::test]
async fn validation_fails_below_minimum_questions() {
    let mut dataset = builtin_dataset();
    dataset.questions.truncate(4);
    let service = service_over(Arc::new(InMemoryDocumentStore::new()), dataset);
    assert!(service.load_all(&SeedConfig::default(), false).await.success);

    let report = service.validate().await.unwrap();
    assert!(!report.is_valid);
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].contains("4 questions"));
}

#[tokio::test]
async fn validation_passes_at_minimums_despite_recommendations() {
    let mut dataset = builtin_dataset();
    dataset.questions.truncate(5);
    dataset.compatibility.truncate(1);
    dataset.modifier_guidance.clear();
    let service = service_over(Arc::new(InMemoryDocumentStore::new()), dataset);
    assert!(service.load_all(&SeedConfig::default(), false).await.success);

    let report = service.validate().await.unwrap();
    assert!(report.is_valid);
    assert!(report.issues.is_empty());
    assert!(!report.recommendations.is_empty());
    assert_eq!(report.counts.questions, 5);
    assert_eq!(report.counts.compatibility, 1);
}

#[tokio::test]
async fn metadata_gaps_become_recommendations() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = service_over(store.clone(), builtin_dataset());
    assert!(service.load_all(&SeedConfig::default(), false).await.success);

    store
        .set(
            Collection::Config.name(),
            "metadata",
            serde_json::json!({"dataset": "hand-edited"}),
        )
        .await
        .unwrap();

    let report = service.validate().await.unwrap();
    assert!(report.is_valid);
    assert!(report.recommendations.iter().any(|r| r.contains("version")));
    assert!(report.recommendations.iter().any(|r| r.contains("integration")));
}

#[tokio::test]
async fn questions_round_trip_through_directory_store() {
    let temp_dir = TempDir::new().unwrap();
    let store: Arc<dyn DocumentStore> = Arc::new(DirDocumentStore::new(temp_dir.path()));
    let service = ParentDnaService::with_store(store.clone());

    let envelope = execute(&service, &SeedConfig::default(), AdminAction::SetupComplete, false).await;
    assert!(envelope.success, "{}", envelope.message);

    // A fresh gateway over the same directory sees the same questions
    let reopened = ParentDnaService::with_store(Arc::new(DirDocumentStore::new(temp_dir.path())));
    let questions = reopened.get_questions().await.unwrap();
    assert_eq!(questions, builtin_dataset().questions);

    let orders: Vec<u64> = store
        .list(Collection::Questions.name())
        .await
        .unwrap()
        .iter()
        .map(|d| d.data["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, (1..=12).collect::<Vec<u64>>());
}

#[tokio::test]
async fn confirmed_reload_replaces_a_corrupt_document() {
    let temp_dir = TempDir::new().unwrap();
    let service = ParentDnaService::with_store(Arc::new(DirDocumentStore::new(temp_dir.path())));
    let seed = SeedConfig::default();
    assert!(service.load_all(&seed, false).await.success);

    let corrupt = temp_dir
        .path()
        .join(Collection::Archetypes.name())
        .join("child_curious_explorer.json");
    assert!(corrupt.exists());
    std::fs::write(&corrupt, "{ truncated").unwrap();
    assert!(service.get_child_archetypes().await.is_err());

    // Counting still works, so an unconfirmed load asks before deleting
    let unconfirmed = service.load_all(&seed, false).await;
    assert!(unconfirmed.requires_confirmation);
    assert_eq!(unconfirmed.per_collection_counts.total(), 54);

    let report = service.load_all(&seed, true).await;
    assert!(report.success, "{}", report.message);
    assert_eq!(report.documents_deleted, 54);
    assert_eq!(report.documents_written, 54);
    assert_eq!(service.get_child_archetypes().await.unwrap().len(), 6);
}
