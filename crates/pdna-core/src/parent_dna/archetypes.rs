//! Built-in archetype catalogs.
//!
//! Provides the six parent archetypes (in tie-break order), the six child
//! reader archetypes and the controlled trait vocabulary they share with the
//! question bank.

use super::model::{ChildArchetype, ParentArchetype};

pub const AUTONOMY_SUPPORTER: &str = "autonomy_supporter";
pub const STRUCTURED_GUIDE: &str = "structured_guide";
pub const WARM_NURTURER: &str = "warm_nurturer";
pub const ACHIEVEMENT_COACH: &str = "achievement_coach";
pub const FAITH_FORMATION_MENTOR: &str = "faith_formation_mentor";
pub const PRESENT_COMPANION: &str = "present_companion";

pub const CURIOUS_EXPLORER: &str = "curious_explorer";
pub const DETERMINED_ACHIEVER: &str = "determined_achiever";
pub const SOCIAL_CONNECTOR: &str = "social_connector";
pub const IMAGINATIVE_DREAMER: &str = "imaginative_dreamer";
pub const CAREFUL_THINKER: &str = "careful_thinker";
pub const HESITANT_READER: &str = "hesitant_reader";

/// Every trait tag that may appear on an answer option or an archetype.
///
/// `respectful` describes answers but counts toward no archetype.
pub const TRAIT_VOCABULARY: &[&str] = &[
    "autonomy_supportive",
    "trust_based",
    "choice_centered",
    "intrinsic_motivation",
    "structure_providing",
    "consistent",
    "routine_building",
    "clear_expectations",
    "warmth_centered",
    "responsive",
    "emotionally_attuned",
    "encouraging",
    "achievement_focused",
    "goal_oriented",
    "progress_tracking",
    "reward_based",
    "faith_integrating",
    "virtue_focused",
    "reading_prioritizing",
    "family_ritual",
    "intentional_presence",
    "shared_reading",
    "modeling",
    "unhurried",
    "respectful",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Returns the parent archetype catalog.
///
/// The order of the returned list is the scoring tie-break order: when two
/// archetypes share the top score, the one listed first wins.
pub fn parent_archetypes() -> Vec<ParentArchetype> {
    vec![
        ParentArchetype {
            id: AUTONOMY_SUPPORTER.to_string(),
            name: "The Autonomy Supporter".to_string(),
            tagline: "Grows readers by handing them the steering wheel.".to_string(),
            description: "You believe children read best when reading belongs to them. You offer real choices, trust your child's judgment, and look for the spark of interest rather than the checkbox of completion.".to_string(),
            traits: strings(&[
                "autonomy_supportive",
                "trust_based",
                "choice_centered",
                "intrinsic_motivation",
            ]),
            strengths: strings(&[
                "Builds lasting, self-driven reading habits",
                "Respects your child's tastes and pace",
                "Keeps reading free of power struggles",
            ]),
            growth_areas: strings(&[
                "Children who need scaffolding can drift without a gentle plan",
                "Easy book choices may go unchallenged for long stretches",
            ]),
            reading_strategies: strings(&[
                "Offer two or three book options instead of an open shelf when your child feels stuck",
                "Let your child set their own weekly reading goal and review it together",
                "Ask open questions about what they are reading instead of quizzing",
            ]),
            guidance: "Keep offering choice, but pair it with a light structure your child helps design. Autonomy works best inside a frame they own.".to_string(),
            compatibility_notes: "Pairs naturally with curious explorers and imaginative dreamers; hesitant readers may need more scaffolding than this style offers by default.".to_string(),
        },
        ParentArchetype {
            id: STRUCTURED_GUIDE.to_string(),
            name: "The Structured Guide".to_string(),
            tagline: "Makes reading as dependable as the school bell.".to_string(),
            description: "You create predictable routines and clear expectations. Reading happens at the same time, in the same place, and your child always knows what comes next.".to_string(),
            traits: strings(&[
                "structure_providing",
                "consistent",
                "routine_building",
                "clear_expectations",
            ]),
            strengths: strings(&[
                "Reading becomes automatic rather than negotiated",
                "Children who thrive on predictability feel secure",
                "Progress is steady and easy to sustain",
            ]),
            growth_areas: strings(&[
                "Routine can slide into obligation if choice disappears",
                "Rigid schedules may clash with a free-spirited reader",
            ]),
            reading_strategies: strings(&[
                "Keep the routine but let your child choose the book inside it",
                "Build one flexible 'wildcard' reading session into each week",
                "Explain the why behind expectations so they become shared values",
            ]),
            guidance: "Your consistency is a gift. Protect it, and leave room inside it for delight so reading never feels like a chore chart.".to_string(),
            compatibility_notes: "Steadies hesitant readers and careful thinkers; curious explorers may push against fixed routines.".to_string(),
        },
        ParentArchetype {
            id: WARM_NURTURER.to_string(),
            name: "The Warm Nurturer".to_string(),
            tagline: "Makes the reading nook the safest place in the house.".to_string(),
            description: "You lead with connection. You notice how your child feels about reading, respond quickly, and make books a source of comfort and closeness.".to_string(),
            traits: strings(&[
                "warmth_centered",
                "responsive",
                "emotionally_attuned",
                "encouraging",
            ]),
            strengths: strings(&[
                "Reading is tied to feelings of safety and love",
                "Frustration is met with patience",
                "Children feel seen as readers, not measured",
            ]),
            growth_areas: strings(&[
                "Rescuing too quickly can cut short productive struggle",
                "Goals may stay vague when comfort comes first",
            ]),
            reading_strategies: strings(&[
                "Let your child sit with a hard word for a few seconds before helping",
                "Pair cozy reading time with one small, named goal",
                "Celebrate effort specifically: name what they did well",
            ]),
            guidance: "Your warmth is the foundation. Add a little stretch on top of it so your child learns they can do hard things with you beside them.".to_string(),
            compatibility_notes: "A natural match for hesitant readers and social connectors; determined achievers may want more challenge.".to_string(),
        },
        ParentArchetype {
            id: ACHIEVEMENT_COACH.to_string(),
            name: "The Achievement Coach".to_string(),
            tagline: "Turns every chapter into a milestone.".to_string(),
            description: "You set goals, track progress, and celebrate wins. You see reading as a skill to build and you help your child see how far they have come.".to_string(),
            traits: strings(&[
                "achievement_focused",
                "goal_oriented",
                "progress_tracking",
                "reward_based",
            ]),
            strengths: strings(&[
                "Clear goals make progress visible",
                "Motivates competitive and goal-driven children",
                "Catches slipping habits early",
            ]),
            growth_areas: strings(&[
                "Rewards can crowd out the joy of the story itself",
                "Struggling readers may feel measured rather than supported",
            ]),
            reading_strategies: strings(&[
                "Track curiosity as well as minutes: log favourite characters and questions",
                "Fade external rewards as the habit takes hold",
                "Let your child set at least one goal that has nothing to do with numbers",
            ]),
            guidance: "Keep the scoreboard, but make sure the story is still the main event. The best goal is a child who reads when nobody is counting.".to_string(),
            compatibility_notes: "Energises determined achievers; hesitant readers can feel pressured without extra warmth.".to_string(),
        },
        ParentArchetype {
            id: FAITH_FORMATION_MENTOR.to_string(),
            name: "The Faith Formation Mentor".to_string(),
            tagline: "Reads for the head, the heart and the soul.".to_string(),
            description: "You see reading as part of forming the whole child. Stories become conversations about virtue, and reading is woven into family prayer and tradition.".to_string(),
            traits: strings(&[
                "faith_integrating",
                "virtue_focused",
                "reading_prioritizing",
                "family_ritual",
            ]),
            strengths: strings(&[
                "Gives reading a purpose beyond grades",
                "Builds rich family traditions around books",
                "Invites deep conversations about character and choices",
            ]),
            growth_areas: strings(&[
                "Every story need not carry a lesson; some are simply for joy",
                "Book choices can narrow if only 'worthy' titles are allowed",
            ]),
            reading_strategies: strings(&[
                "Mix saints' lives and Scripture stories with adventure and humor",
                "Ask 'what would you have done?' rather than stating the moral",
                "Make a feast-day or Sunday read-aloud a family tradition",
            ]),
            guidance: "Your sense of purpose gives reading deep roots. Let your child also meet books purely for fun; grace works through delight too.".to_string(),
            compatibility_notes: "Resonates with social connectors and imaginative dreamers who love big stories; curious explorers may want wider shelves.".to_string(),
        },
        ParentArchetype {
            id: PRESENT_COMPANION.to_string(),
            name: "The Present Companion".to_string(),
            tagline: "Reads alongside, never over the shoulder.".to_string(),
            description: "You show up. You read with your child, read in front of your child, and treat unhurried time together as the heart of a reading life.".to_string(),
            traits: strings(&[
                "intentional_presence",
                "shared_reading",
                "modeling",
                "unhurried",
            ]),
            strengths: strings(&[
                "Models reading as a normal, enjoyable adult activity",
                "Shared reading builds vocabulary and connection",
                "Slows the household down enough for books to matter",
            ]),
            growth_areas: strings(&[
                "Busy seasons can quietly erase shared time",
                "Independent reading stamina may lag if you always read together",
            ]),
            reading_strategies: strings(&[
                "Alternate pages, then chapters, to build independent stamina",
                "Keep a family reading basket where everyone's books live",
                "Protect a short, screen-free reading window even on hectic days",
            ]),
            guidance: "Your presence teaches more than any chart could. Gradually hand more of the reading to your child while staying close by.".to_string(),
            compatibility_notes: "Wonderful with hesitant readers and social connectors; careful thinkers may want quiet time alone with a book.".to_string(),
        },
    ]
}

/// Returns the child reader archetype catalog.
pub fn child_archetypes() -> Vec<ChildArchetype> {
    vec![
        ChildArchetype {
            id: CURIOUS_EXPLORER.to_string(),
            name: "The Curious Explorer".to_string(),
            description: "Reads to find out how the world works and follows questions wherever they lead.".to_string(),
            motivators: strings(&["Novelty", "Non-fiction and facts", "Freedom to browse"]),
        },
        ChildArchetype {
            id: DETERMINED_ACHIEVER.to_string(),
            name: "The Determined Achiever".to_string(),
            description: "Loves goals, levels and finishing series; reading is a challenge to conquer.".to_string(),
            motivators: strings(&["Visible progress", "Challenges", "Recognition"]),
        },
        ChildArchetype {
            id: SOCIAL_CONNECTOR.to_string(),
            name: "The Social Connector".to_string(),
            description: "Reads to share; books matter most when they can be talked about with others.".to_string(),
            motivators: strings(&["Book clubs", "Reading with friends", "Talking about stories"]),
        },
        ChildArchetype {
            id: IMAGINATIVE_DREAMER.to_string(),
            name: "The Imaginative Dreamer".to_string(),
            description: "Disappears into stories and invents worlds of their own.".to_string(),
            motivators: strings(&["Fantasy and adventure", "Unstructured time", "Creative play"]),
        },
        ChildArchetype {
            id: CAREFUL_THINKER.to_string(),
            name: "The Careful Thinker".to_string(),
            description: "Reads slowly and deeply, rereads favourites and notices details others miss.".to_string(),
            motivators: strings(&["Quiet", "Depth over speed", "Predictable routines"]),
        },
        ChildArchetype {
            id: HESITANT_READER.to_string(),
            name: "The Hesitant Reader".to_string(),
            description: "Has not yet found their way into reading; may associate books with struggle.".to_string(),
            motivators: strings(&["Early wins", "Encouragement", "Short, high-interest books"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_six_unique_parent_archetypes() {
        let archetypes = parent_archetypes();
        assert_eq!(archetypes.len(), 6);
        let ids: HashSet<_> = archetypes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_six_unique_child_archetypes() {
        let children = child_archetypes();
        assert_eq!(children.len(), 6);
        let ids: HashSet<_> = children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_autonomy_supporter_traits() {
        let archetypes = parent_archetypes();
        let autonomy = archetypes
            .iter()
            .find(|a| a.id == AUTONOMY_SUPPORTER)
            .unwrap();
        assert_eq!(
            autonomy.traits,
            vec![
                "autonomy_supportive",
                "trust_based",
                "choice_centered",
                "intrinsic_motivation"
            ]
        );
    }

    #[test]
    fn test_every_archetype_has_a_distinguishing_trait() {
        let archetypes = parent_archetypes();
        for archetype in &archetypes {
            let distinguishing = archetype.traits.iter().any(|t| {
                archetypes
                    .iter()
                    .filter(|other| other.id != archetype.id)
                    .all(|other| !other.traits.contains(t))
            });
            assert!(distinguishing, "{} has no distinguishing trait", archetype.id);
        }
    }

    #[test]
    fn test_archetype_traits_are_in_vocabulary() {
        for archetype in parent_archetypes() {
            for t in &archetype.traits {
                assert!(TRAIT_VOCABULARY.contains(&t.as_str()), "unknown trait {}", t);
            }
        }
    }
}
