use std::sync::Arc;

use pdna_core::config::SeedConfig;
use pdna_core::parent_dna::archetypes::*;
use pdna_core::parent_dna::{ParentDnaRepository, builtin_dataset, classify, ResponseSet};
use pdna_core::store::{Collection, DocumentStore};
use pdna_infrastructure::{DirDocumentStore, DocumentParentDnaRepository};
use tempfile::TempDir;

fn dir_repository(temp_dir: &TempDir) -> (Arc<DirDocumentStore>, DocumentParentDnaRepository) {
    let store = Arc::new(DirDocumentStore::new(temp_dir.path().join("store")));
    let repo = DocumentParentDnaRepository::new(store.clone());
    (store, repo)
}

#[tokio::test]
async fn questions_round_trip_sorted_by_order() {
    let temp_dir = TempDir::new().unwrap();
    let (store, repo) = dir_repository(&temp_dir);
    let seed = SeedConfig::default();
    let questions = builtin_dataset().questions;

    // Interleave the writes so file order and write order both differ from `order`
    let mut positions: Vec<usize> = (0..questions.len()).collect();
    positions.sort_by_key(|i| (i % 3, *i));
    for i in positions {
        repo.save_question(i as u32 + 1, &questions[i], &seed).await.unwrap();
    }

    let read = repo.questions().await.unwrap();
    assert_eq!(read.len(), questions.len());
    for (original, stored) in questions.iter().zip(&read) {
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.prompt, original.prompt);
        assert_eq!(stored.options, original.options);
    }

    let first = store
        .get(Collection::Questions.name(), "q001")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.data["order"], 1);
    assert_eq!(first.data["id"], questions[0].id.as_str());
    assert_eq!(first.data["status"], "active");
}

#[tokio::test]
async fn stored_catalog_scores_like_builtin_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let (_, repo) = dir_repository(&temp_dir);
    let seed = SeedConfig::default();
    let dataset = builtin_dataset();

    for (i, q) in dataset.questions.iter().enumerate() {
        repo.save_question(i as u32 + 1, q, &seed).await.unwrap();
    }
    for (i, a) in dataset.archetypes.iter().enumerate() {
        repo.save_archetype(i as u32 + 1, a, &seed).await.unwrap();
    }

    let responses = ResponseSet::new()
        .with("reluctant_evening", "a")
        .with("while_they_read", "a");
    let stored = classify(
        &responses,
        &repo.questions().await.unwrap(),
        &repo.archetypes().await.unwrap(),
    );
    let builtin = classify(&responses, &dataset.questions, &dataset.archetypes);

    assert_eq!(stored, builtin);
    assert_eq!(stored.winning_archetype_id, AUTONOMY_SUPPORTER);
}

#[tokio::test]
async fn compatibility_lookup_is_directional_after_storage() {
    let temp_dir = TempDir::new().unwrap();
    let (_, repo) = dir_repository(&temp_dir);
    let seed = SeedConfig::default();
    for entry in builtin_dataset().compatibility {
        repo.save_compatibility(&entry, &seed).await.unwrap();
    }

    let entry = repo
        .find_compatibility(STRUCTURED_GUIDE, CAREFUL_THINKER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.level.to_string(), "natural");
    assert!(
        repo.find_compatibility(CAREFUL_THINKER, STRUCTURED_GUIDE)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_compatibility(ACHIEVEMENT_COACH, CURIOUS_EXPLORER)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(repo.compatibility_entries().await.unwrap().len(), 18);
}
