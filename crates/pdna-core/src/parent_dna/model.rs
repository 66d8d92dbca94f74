//! Parent DNA domain model.
//!
//! Questions, parent and child archetypes, compatibility entries and guidance
//! content. These are the "pure" domain types; the persisted shapes (with
//! `created_date`, `status`, `version` and `order`) live in the
//! infrastructure layer.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A single answer choice of an assessment question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Identifier, unique within its question
    pub id: String,
    /// Text shown to the parent
    pub text: String,
    /// Trait tags this answer votes for (never empty)
    pub traits: Vec<String>,
}

/// An assessment question.
///
/// `id` is stable and used as the key of a [`ResponseSet`](super::ResponseSet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    pub id: String,
    /// The question as shown to the parent
    pub prompt: String,
    /// Short note on the research behind the question
    pub research_note: String,
    /// Answer choices (at least two)
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Finds an option by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// One of the six parent archetypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentArchetype {
    /// Unique identifier (e.g. `autonomy_supporter`)
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line summary
    pub tagline: String,
    /// Longer description of the archetype
    pub description: String,
    /// Trait tags counting toward this archetype's score
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    /// Reading-specific strategies for this parent
    pub reading_strategies: Vec<String>,
    /// Free-form guidance paragraph
    pub guidance: String,
    /// Short note on how this parent tends to pair with different children
    pub compatibility_notes: String,
}

/// One of the six child reader archetypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildArchetype {
    pub id: String,
    pub name: String,
    pub description: String,
    /// What tends to motivate this reader
    pub motivators: Vec<String>,
}

/// Coarse label describing how naturally a parent/child pairing works.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompatibilityLevel {
    /// Styles reinforce each other with little effort
    Natural,
    /// Differences fill each other's gaps
    Complementary,
    /// Works well once the parent adjusts a few habits
    Growth,
    /// Styles pull in different directions; needs deliberate effort
    Stretch,
}

/// Relationship guidance for a (parent archetype, child archetype) pair.
///
/// The pair is directional: the first id is always a parent archetype and the
/// second a child archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub parent_archetype_id: String,
    pub child_archetype_id: String,
    pub level: CompatibilityLevel,
    pub summary: String,
    pub strengths: Vec<String>,
    pub watch_outs: Vec<String>,
    pub strategies: Vec<String>,
}

impl CompatibilityEntry {
    /// Document key of this pair (`parentId_childId`).
    pub fn key(&self) -> String {
        compatibility_key(&self.parent_archetype_id, &self.child_archetype_id)
    }
}

/// Builds the storage key of a compatibility pair.
pub fn compatibility_key(parent_archetype_id: &str, child_archetype_id: &str) -> String {
    format!("{}_{}", parent_archetype_id, child_archetype_id)
}

/// Guidance for parents of a particular child archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildGuidance {
    pub child_archetype_id: String,
    pub title: String,
    pub summary: String,
    pub strategies: Vec<String>,
    /// Kinds of books that tend to land with this reader
    pub book_ideas: Vec<String>,
}

/// Guidance for a situational modifier on a child (e.g. dyslexia).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierGuidance {
    pub modifier_id: String,
    pub name: String,
    pub summary: String,
    pub strategies: Vec<String>,
}

/// Guidance resolved for one child: the archetype entry plus any modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceBundle {
    pub child: Option<ChildGuidance>,
    pub modifiers: Vec<ModifierGuidance>,
}

impl GuidanceBundle {
    pub fn is_empty(&self) -> bool {
        self.child.is_none() && self.modifiers.is_empty()
    }
}

/// The complete static Parent DNA dataset, as bulk-loaded into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentDnaDataset {
    /// Questions in presentation order
    pub questions: Vec<Question>,
    /// Parent archetypes in tie-break order
    pub archetypes: Vec<ParentArchetype>,
    pub child_archetypes: Vec<ChildArchetype>,
    pub compatibility: Vec<CompatibilityEntry>,
    pub child_guidance: Vec<ChildGuidance>,
    pub modifier_guidance: Vec<ModifierGuidance>,
}

impl ParentDnaDataset {
    /// Number of guidance documents (child + modifier entries).
    pub fn guidance_count(&self) -> usize {
        self.child_guidance.len() + self.modifier_guidance.len()
    }

    /// Finds a compatibility entry in the in-memory dataset.
    pub fn compatibility(&self, parent_id: &str, child_id: &str) -> Option<&CompatibilityEntry> {
        self.compatibility
            .iter()
            .find(|e| e.parent_archetype_id == parent_id && e.child_archetype_id == child_id)
    }
}
