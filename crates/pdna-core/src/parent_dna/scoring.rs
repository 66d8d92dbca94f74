//! Parent DNA scoring engine.
//!
//! Maps a [`ResponseSet`] to one of the parent archetypes by counting trait
//! votes and summing them per archetype.
//!
//! # Algorithm
//!
//! 1. Every answered `(question_id, option_id)` pair is resolved against the
//!    question bank. Unknown questions or options are skipped silently.
//! 2. Each trait tag on a resolved option adds one to that trait's counter.
//! 3. An archetype's score is the sum of the counters of its declared traits.
//!    A trait listed twice on the same archetype counts twice.
//! 4. The highest score wins. Ties go to the archetype that comes first in
//!    the archetype slice.
//!
//! Classification never fails. With no usable answers every score is zero,
//! the first archetype is returned and the result is flagged
//! [`ScoringOutcome::InsufficientData`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{ParentArchetype, Question};

/// A parent's answers: question id to selected option id.
///
/// Partial completion is legal; unanswered questions contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, String>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the answer to a question.
    pub fn answer(&mut self, question_id: impl Into<String>, option_id: impl Into<String>) {
        self.0.insert(question_id.into(), option_id.into());
    }

    /// Builder-style variant of [`answer`](Self::answer).
    pub fn with(mut self, question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        self.answer(question_id, option_id);
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(q, o)| (q.as_str(), o.as_str()))
    }
}

impl<Q, O> FromIterator<(Q, O)> for ResponseSet
where
    Q: Into<String>,
    O: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (Q, O)>>(iter: I) -> Self {
        let mut responses = ResponseSet::new();
        for (q, o) in iter {
            responses.answer(q, o);
        }
        responses
    }
}

/// How much weight a [`ScoringResult`] can bear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScoringOutcome {
    /// One archetype has the strictly highest score.
    Decisive,
    /// The winner shares the top score with the listed archetypes; the winner
    /// was chosen by catalog order.
    Tied { tied_with: Vec<String> },
    /// No answer matched any archetype trait; the winner is only the first
    /// archetype in catalog order.
    InsufficientData,
}

/// Score of a single archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeScore {
    pub archetype_id: String,
    pub score: u32,
}

/// Output of [`classify`]. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Always one of the declared archetype ids (empty only when the catalog is empty)
    pub winning_archetype_id: String,
    /// How many times each trait was voted for
    pub trait_counts: BTreeMap<String, u32>,
    /// One score per archetype, in catalog order
    pub archetype_scores: Vec<ArchetypeScore>,
    pub outcome: ScoringOutcome,
}

impl ScoringResult {
    /// Count for a single trait (0 when never voted for).
    pub fn trait_count(&self, trait_tag: &str) -> u32 {
        self.trait_counts.get(trait_tag).copied().unwrap_or(0)
    }

    /// Score of a single archetype, if it is part of the catalog.
    pub fn score_of(&self, archetype_id: &str) -> Option<u32> {
        self.archetype_scores
            .iter()
            .find(|s| s.archetype_id == archetype_id)
            .map(|s| s.score)
    }

    /// Whether the result may be presented as a classification.
    pub fn is_conclusive(&self) -> bool {
        !matches!(self.outcome, ScoringOutcome::InsufficientData)
    }

    /// Archetypes ordered by descending score, catalog order among equals.
    pub fn ranking(&self) -> Vec<&ArchetypeScore> {
        let mut ranked: Vec<&ArchetypeScore> = self.archetype_scores.iter().collect();
        // sort_by is stable, so equal scores keep catalog order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Classifies a set of answers against a question bank and archetype catalog.
pub fn classify(
    responses: &ResponseSet,
    questions: &[Question],
    archetypes: &[ParentArchetype],
) -> ScoringResult {
    let mut trait_counts: BTreeMap<String, u32> = BTreeMap::new();

    for (question_id, option_id) in responses.iter() {
        let Some(question) = questions.iter().find(|q| q.id == question_id) else {
            tracing::debug!("[Scoring] Skipping unknown question '{}'", question_id);
            continue;
        };
        let Some(option) = question.option(option_id) else {
            tracing::debug!(
                "[Scoring] Skipping unknown option '{}' for question '{}'",
                option_id,
                question_id
            );
            continue;
        };
        for trait_tag in &option.traits {
            *trait_counts.entry(trait_tag.clone()).or_insert(0) += 1;
        }
    }

    let archetype_scores: Vec<ArchetypeScore> = archetypes
        .iter()
        .map(|archetype| ArchetypeScore {
            archetype_id: archetype.id.clone(),
            score: archetype
                .traits
                .iter()
                .map(|t| trait_counts.get(t).copied().unwrap_or(0))
                .sum(),
        })
        .collect();

    // First strictly greater score wins, so ties resolve to catalog order.
    let mut winner: Option<&ArchetypeScore> = None;
    for candidate in &archetype_scores {
        match winner {
            Some(best) if candidate.score <= best.score => {}
            _ => winner = Some(candidate),
        }
    }

    let (winning_archetype_id, top_score) = match winner {
        Some(best) => (best.archetype_id.clone(), best.score),
        None => (String::new(), 0),
    };

    let outcome = if top_score == 0 {
        ScoringOutcome::InsufficientData
    } else {
        let tied_with: Vec<String> = archetype_scores
            .iter()
            .filter(|s| s.score == top_score && s.archetype_id != winning_archetype_id)
            .map(|s| s.archetype_id.clone())
            .collect();
        if tied_with.is_empty() {
            ScoringOutcome::Decisive
        } else {
            ScoringOutcome::Tied { tied_with }
        }
    };

    ScoringResult {
        winning_archetype_id,
        trait_counts,
        archetype_scores,
        outcome,
    }
}
