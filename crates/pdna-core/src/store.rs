//! Document store abstraction.
//!
//! A minimal document database contract: named collections of JSON object
//! documents addressed by string ids. The gateway only ever needs
//! list/get/set/delete and a single-field equality query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::Result;

/// A stored document: its id plus the JSON object body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self { id: id.into(), data }
    }

    /// Reads a top-level field of the document body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Equality filter on a top-level document field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Filter on `status == "active"`, applied by every gateway read.
    pub fn active() -> Self {
        Self::equals("status", "active")
    }

    pub fn matches(&self, document: &Document) -> bool {
        document.field(&self.field) == Some(&self.value)
    }
}

/// The collections owned by the Parent DNA gateway.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr, EnumIter,
)]
pub enum Collection {
    #[strum(serialize = "parent_dna_questions")]
    Questions,
    #[strum(serialize = "parent_dna_archetypes")]
    Archetypes,
    #[strum(serialize = "parent_dna_compatibility")]
    Compatibility,
    #[strum(serialize = "parent_dna_guidance")]
    Guidance,
    #[strum(serialize = "parent_dna_config")]
    Config,
}

impl Collection {
    /// Document-store name of the collection.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Every collection, in load order.
    pub fn all() -> Vec<Collection> {
        Collection::iter().collect()
    }
}

/// Key of the single document in [`Collection::Config`].
pub const METADATA_DOCUMENT_ID: &str = "metadata";

/// Key of the n-th question (1-based), e.g. `q001`.
pub fn question_key(order: u32) -> String {
    format!("q{:03}", order)
}

/// Key of a child-archetype guidance document.
pub fn child_guidance_key(child_archetype_id: &str) -> String {
    format!("child_{}", child_archetype_id)
}

/// Key of a modifier guidance document.
pub fn modifier_guidance_key(modifier_id: &str) -> String {
    format!("modifier_{}", modifier_id)
}

/// Key of a child-archetype record stored next to the parent archetypes.
pub fn child_archetype_key(child_archetype_id: &str) -> String {
    format!("child_{}", child_archetype_id)
}

/// An abstract document store.
///
/// Implementations must preserve JSON values losslessly: whatever is written
/// with [`set`](DocumentStore::set) comes back unchanged from
/// [`get`](DocumentStore::get).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists every document of a collection. Unknown collections are empty.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetches a single document.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Creates or replaces a document. `data` must be a JSON object.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    /// Deletes a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Returns documents whose top-level field equals the filter value.
    async fn query(&self, collection: &str, filter: &FieldFilter) -> Result<Vec<Document>> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect())
    }

    /// Ids of every document of a collection, sorted.
    ///
    /// Stores that can enumerate ids without decoding bodies should override
    /// this so a corrupt document can still be counted and deleted.
    async fn list_ids(&self, collection: &str) -> Result<Vec<String>> {
        Ok(self.list(collection).await?.into_iter().map(|d| d.id).collect())
    }

    /// Number of documents in a collection.
    async fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.list_ids(collection).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Questions.name(), "parent_dna_questions");
        assert_eq!(Collection::Config.to_string(), "parent_dna_config");
        assert_eq!(
            "parent_dna_guidance".parse::<Collection>().unwrap(),
            Collection::Guidance
        );
        assert_eq!(Collection::all().len(), 5);
        for c in Collection::all() {
            assert_eq!(c.name(), c.as_ref());
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(question_key(1), "q001");
        assert_eq!(question_key(12), "q012");
        assert_eq!(child_guidance_key("hesitant_reader"), "child_hesitant_reader");
        assert_eq!(modifier_guidance_key("dyslexia"), "modifier_dyslexia");
    }

    #[test]
    fn test_field_filter_matches_top_level_equality() {
        let active = Document::new("a", json!({"status": "active", "order": 1}));
        let archived = Document::new("b", json!({"status": "archived"}));
        let filter = FieldFilter::active();
        assert!(filter.matches(&active));
        assert!(!filter.matches(&archived));
        assert!(FieldFilter::equals("order", 1).matches(&active));
        assert!(!FieldFilter::equals("missing", 1).matches(&active));
    }
}
