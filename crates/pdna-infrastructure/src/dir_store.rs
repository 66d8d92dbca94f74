//! Directory-backed document store.
//!
//! Layout: `<root>/<collection>/<id>.json`, one pretty-printed JSON file per
//! document. Writes are atomic and serialized per document through
//! [`AtomicFile`].

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdna_core::error::{PdnaError, Result};
use pdna_core::store::{Document, DocumentStore};
use serde_json::Value;

use crate::storage::{AtomicFile, blocking};

const DOCUMENT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct DirDocumentStore {
    root: PathBuf,
}

impl DirDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        ensure_safe_name("collection", collection)?;
        Ok(self.root.join(collection))
    }

    fn document_file(&self, collection: &str, id: &str) -> Result<AtomicFile<Value>> {
        ensure_safe_name("document id", id)?;
        let path = self
            .collection_dir(collection)?
            .join(format!("{}.{}", id, DOCUMENT_EXTENSION));
        Ok(AtomicFile::json(path))
    }
}

/// Rejects names that would escape the collection directory or collide with
/// temp and lock files.
fn ensure_safe_name(kind: &str, name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(PdnaError::data_access(format!("invalid {} '{}'", kind, name)));
    }
    Ok(())
}

/// Document ids from file names alone, sorted. Bodies are not read.
fn collection_ids(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_document = path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION);
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if is_document && !id.starts_with('.') {
            ids.push(id.to_string());
        }
    }
    ids.sort();
    Ok(ids)
}

fn read_collection(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for id in collection_ids(dir)? {
        let path = dir.join(format!("{}.{}", id, DOCUMENT_EXTENSION));
        if let Some(data) = AtomicFile::<Value>::json(path).load()? {
            documents.push(Document::new(id, data));
        }
    }
    Ok(documents)
}

#[async_trait]
impl DocumentStore for DirDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let dir = self.collection_dir(collection)?;
        blocking(move || read_collection(&dir)).await
    }

    async fn list_ids(&self, collection: &str) -> Result<Vec<String>> {
        let dir = self.collection_dir(collection)?;
        blocking(move || collection_ids(&dir)).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let file = self.document_file(collection, id)?;
        let id = id.to_string();
        blocking(move || Ok(file.load()?.map(|data| Document::new(id, data)))).await
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        if !data.is_object() {
            return Err(PdnaError::data_access(format!(
                "document {}/{} must be a JSON object",
                collection, id
            )));
        }
        let file = self.document_file(collection, id)?;
        tracing::trace!("[DirStore] Writing {}", file.path().display());
        blocking(move || file.save_locked(&data)).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let file = self.document_file(collection, id)?;
        tracing::trace!("[DirStore] Deleting {}", file.path().display());
        blocking(move || file.remove()).await
    }
}
