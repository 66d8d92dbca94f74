//! Built-in guidance content for child archetypes and situational modifiers.

use super::archetypes::*;
use super::model::{ChildGuidance, GuidanceBundle, ModifierGuidance};

pub const ATTENTION_DIFFERENCES: &str = "attention_differences";
pub const DYSLEXIA: &str = "dyslexia";
pub const ADVANCED_READER: &str = "advanced_reader";
pub const ANXIOUS_READER: &str = "anxious_reader";
pub const MULTILINGUAL_HOME: &str = "multilingual_home";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn child(id: &str, title: &str, summary: &str, strategies: &[&str], book_ideas: &[&str]) -> ChildGuidance {
    ChildGuidance {
        child_archetype_id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        strategies: strings(strategies),
        book_ideas: strings(book_ideas),
    }
}

fn modifier(id: &str, name: &str, summary: &str, strategies: &[&str]) -> ModifierGuidance {
    ModifierGuidance {
        modifier_id: id.to_string(),
        name: name.to_string(),
        summary: summary.to_string(),
        strategies: strings(strategies),
    }
}

/// Returns guidance for every child archetype.
pub fn child_guidance() -> Vec<ChildGuidance> {
    vec![
        child(
            CURIOUS_EXPLORER,
            "Feeding a curious explorer",
            "Follow the questions. Explorers read most when books answer something they already wonder about.",
            &[
                "Keep a running list of questions and hunt for books that answer them",
                "Let non-fiction, maps and field guides count as real reading",
                "Visit the library often and let them browse freely",
            ],
            &["Field guides", "How-it-works books", "Biographies of inventors and saints"],
        ),
        child(
            DETERMINED_ACHIEVER,
            "Challenging a determined achiever",
            "Achievers love a target. Give them meaningful ones and keep the story at the centre.",
            &[
                "Set series-completion or genre-passport challenges",
                "Celebrate finishing, then ask what they loved most",
                "Mix in goals about enjoyment, not just volume",
            ],
            &["Long series", "Award-winner lists", "Books with sequels"],
        ),
        child(
            SOCIAL_CONNECTOR,
            "Reading with a social connector",
            "Connectors read to share. Make reading something to talk about together.",
            &[
                "Start a family or friend book club",
                "Read the same book in parallel and swap favourite lines",
                "Let them recommend books to siblings and classmates",
            ],
            &["Graphic novels to pass around", "Books with movie adaptations", "Class read-alouds"],
        ),
        child(
            IMAGINATIVE_DREAMER,
            "Nurturing an imaginative dreamer",
            "Dreamers live inside stories. Protect unhurried time and invite creative responses.",
            &[
                "Leave long, unscheduled reading stretches on weekends",
                "Invite drawings, maps or sequels of favourite worlds",
                "Read aloud books slightly above their level for the language",
            ],
            &["Fantasy and allegory", "Poetry", "Illustrated classics"],
        ),
        child(
            CAREFUL_THINKER,
            "Supporting a careful thinker",
            "Thinkers read slowly and deeply. Depth is a strength, not a lag.",
            &[
                "Never rush a reread; it builds comprehension",
                "Offer a quiet, predictable reading spot",
                "Ask 'what did you notice?' instead of 'did you finish?'",
            ],
            &["Mysteries", "Detailed non-fiction", "Books with rich world-building"],
        ),
        child(
            HESITANT_READER,
            "Encouraging a hesitant reader",
            "Hesitant readers need early wins and warmth. Shrink the task until success is guaranteed.",
            &[
                "Start with five-minute sessions and short, high-interest books",
                "Read alternate pages to share the load",
                "Praise effort and persistence specifically",
            ],
            &["Hi-lo books", "Joke and riddle books", "Comics and graphic novels"],
        ),
    ]
}

/// Returns guidance for every situational modifier.
pub fn modifier_guidance() -> Vec<ModifierGuidance> {
    vec![
        modifier(
            ATTENTION_DIFFERENCES,
            "Attention differences",
            "Short bursts and movement help children with attention differences stay with a book.",
            &[
                "Use short sessions with a visible timer",
                "Allow fidgets, standing or reading while moving",
                "Choose books with short chapters and strong hooks",
            ],
        ),
        modifier(
            DYSLEXIA,
            "Dyslexia",
            "Decoding is effortful; protect the love of stories while skills are built.",
            &[
                "Pair audiobooks with the printed text",
                "Use dyslexia-friendly fonts and spacing where possible",
                "Separate 'practice reading' from 'story time' so stories stay joyful",
            ],
        ),
        modifier(
            ADVANCED_READER,
            "Advanced reader",
            "Advanced readers need content that matches their maturity, not only their reading level.",
            &[
                "Look for depth rather than simply older books",
                "Preview themes in books written for older readers",
                "Encourage rereading classics with new questions",
            ],
        ),
        modifier(
            ANXIOUS_READER,
            "Anxious reader",
            "Anxiety makes mistakes feel dangerous. Lower the stakes of reading aloud.",
            &[
                "Let them read to a pet, a sibling or a stuffed animal first",
                "Avoid correcting every error while they read",
                "Offer predictable, comforting series",
            ],
        ),
        modifier(
            MULTILINGUAL_HOME,
            "Multilingual home",
            "Reading in any home language builds literacy that transfers to English.",
            &[
                "Read together in the language you are most comfortable in",
                "Look for bilingual editions of favourite books",
                "Talk about how words differ between your languages",
            ],
        ),
    ]
}

/// Resolves guidance for a child archetype and a list of modifiers.
///
/// Modifiers come back in the requested order; unknown modifiers are skipped.
pub fn resolve_guidance(
    child_guidance: &[ChildGuidance],
    modifier_guidance: &[ModifierGuidance],
    child_archetype_id: &str,
    modifiers: &[String],
) -> GuidanceBundle {
    let child = child_guidance
        .iter()
        .find(|g| g.child_archetype_id == child_archetype_id)
        .cloned();
    let modifiers = modifiers
        .iter()
        .filter_map(|m| modifier_guidance.iter().find(|g| &g.modifier_id == m).cloned())
        .collect();
    GuidanceBundle { child, modifiers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_child_archetype_has_guidance() {
        let guidance = child_guidance();
        for c in child_archetypes() {
            assert!(
                guidance.iter().any(|g| g.child_archetype_id == c.id),
                "no guidance for {}",
                c.id
            );
        }
    }

    #[test]
    fn test_resolve_keeps_requested_modifier_order_and_skips_unknown() {
        let bundle = resolve_guidance(
            &child_guidance(),
            &modifier_guidance(),
            HESITANT_READER,
            &[
                DYSLEXIA.to_string(),
                "not_a_modifier".to_string(),
                ANXIOUS_READER.to_string(),
            ],
        );
        assert_eq!(
            bundle.child.as_ref().map(|c| c.child_archetype_id.as_str()),
            Some(HESITANT_READER)
        );
        let ids: Vec<_> = bundle.modifiers.iter().map(|m| m.modifier_id.as_str()).collect();
        assert_eq!(ids, vec![DYSLEXIA, ANXIOUS_READER]);
    }

    #[test]
    fn test_resolve_unknown_child_is_empty_without_modifiers() {
        let bundle = resolve_guidance(&child_guidance(), &modifier_guidance(), "nobody", &[]);
        assert!(bundle.is_empty());
    }
}
