//! Parent DNA domain: catalogs, scoring and the repository contract.

pub mod archetypes;
pub mod compatibility;
pub mod guidance;
pub mod model;
pub mod questions;
pub mod repository;
pub mod scoring;

pub use model::{
    AnswerOption, ChildArchetype, ChildGuidance, CompatibilityEntry, CompatibilityLevel,
    GuidanceBundle, ModifierGuidance, ParentArchetype, ParentDnaDataset, Question,
    compatibility_key,
};
pub use repository::{CollectionCounts, DatasetMetadata, IntegrationMetadata, ParentDnaRepository};
pub use scoring::{ArchetypeScore, ResponseSet, ScoringOutcome, ScoringResult, classify};

/// Name of the scoring method recorded in integration metadata.
pub const SCORING_METHOD: &str = "trait_sum";

/// Assembles the built-in dataset from the static catalogs.
pub fn builtin_dataset() -> ParentDnaDataset {
    ParentDnaDataset {
        questions: questions::question_bank(),
        archetypes: archetypes::parent_archetypes(),
        child_archetypes: archetypes::child_archetypes(),
        compatibility: compatibility::compatibility_matrix(),
        child_guidance: guidance::child_guidance(),
        modifier_guidance: guidance::modifier_guidance(),
    }
}

/// Integration metadata describing the built-in dataset.
pub fn integration_metadata(dataset: &ParentDnaDataset) -> IntegrationMetadata {
    IntegrationMetadata {
        scoring_method: SCORING_METHOD.to_string(),
        archetype_order: dataset.archetypes.iter().map(|a| a.id.clone()).collect(),
        trait_vocabulary: archetypes::TRAIT_VOCABULARY.iter().map(|t| t.to_string()).collect(),
        modifiers: dataset
            .modifier_guidance
            .iter()
            .map(|m| m.modifier_id.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_dataset_sizes() {
        let dataset = builtin_dataset();
        assert_eq!(dataset.questions.len(), 12);
        assert_eq!(dataset.archetypes.len(), 6);
        assert_eq!(dataset.child_archetypes.len(), 6);
        assert_eq!(dataset.compatibility.len(), 18);
        assert_eq!(dataset.guidance_count(), 11);
    }

    #[test]
    fn test_integration_metadata_keeps_archetype_order() {
        let dataset = builtin_dataset();
        let integration = integration_metadata(&dataset);
        assert_eq!(integration.scoring_method, "trait_sum");
        assert_eq!(integration.archetype_order[0], archetypes::AUTONOMY_SUPPORTER);
        assert_eq!(integration.archetype_order.len(), 6);
        assert_eq!(integration.modifiers.len(), 5);
    }
}
