//! Built-in parent/child compatibility matrix.
//!
//! The matrix is directional (parent archetype first, child archetype second)
//! and intentionally incomplete: only authored pairs are present. Missing pairs
//! are a content task, never synthesized.

use super::archetypes::*;
use super::model::{CompatibilityEntry, CompatibilityLevel};

fn entry(
    parent: &str,
    child: &str,
    level: CompatibilityLevel,
    summary: &str,
    strengths: &[&str],
    watch_outs: &[&str],
    strategies: &[&str],
) -> CompatibilityEntry {
    let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    CompatibilityEntry {
        parent_archetype_id: parent.to_string(),
        child_archetype_id: child.to_string(),
        level,
        summary: summary.to_string(),
        strengths: to_vec(strengths),
        watch_outs: to_vec(watch_outs),
        strategies: to_vec(strategies),
    }
}

/// Returns every authored compatibility entry.
pub fn compatibility_matrix() -> Vec<CompatibilityEntry> {
    use CompatibilityLevel::*;

    vec![
        // Autonomy Supporter: full row
        entry(
            AUTONOMY_SUPPORTER,
            CURIOUS_EXPLORER,
            Natural,
            "Freedom to follow questions is exactly what an explorer craves.",
            &["Child-led topic choices", "Library visits become adventures"],
            &["Half-finished books piling up"],
            &["Keep a 'questions we want answered' list and let it drive book picks"],
        ),
        entry(
            AUTONOMY_SUPPORTER,
            DETERMINED_ACHIEVER,
            Complementary,
            "Your trust balances their drive; let them own the goals they chase.",
            &["Child sets ambitious goals without pressure from you"],
            &["Achievers may want more recognition than you naturally give"],
            &["Ask them to design their own reading challenge and report back weekly"],
        ),
        entry(
            AUTONOMY_SUPPORTER,
            SOCIAL_CONNECTOR,
            Growth,
            "Connectors read to share; make sure autonomy does not feel like being left alone.",
            &["Child picks books they can discuss with friends"],
            &["Independent reading can feel lonely to this child"],
            &["Offer to read the same book in parallel and swap thoughts"],
        ),
        entry(
            AUTONOMY_SUPPORTER,
            IMAGINATIVE_DREAMER,
            Natural,
            "Unstructured time and open shelves let a dreamer's imagination run.",
            &["Long immersive reading sessions", "Creative responses to stories"],
            &["Reading time may disappear into daydreams"],
            &["Invite them to draw or write the next chapter of a favourite book"],
        ),
        entry(
            AUTONOMY_SUPPORTER,
            CAREFUL_THINKER,
            Complementary,
            "You give a careful thinker the unhurried space to reread and go deep.",
            &["Respect for slow, deep reading"],
            &["Thinkers may want more guidance choosing the next book"],
            &["Offer a short curated stack rather than an open shelf"],
        ),
        entry(
            AUTONOMY_SUPPORTER,
            HESITANT_READER,
            Stretch,
            "Open choice can overwhelm a child who has not yet found their way in.",
            &["No pressure keeps reading from becoming a battle"],
            &["Too little scaffolding; the child may simply not read"],
            &[
                "Narrow choices to two short, high-interest books",
                "Add a small shared routine the child helps design",
            ],
        ),
        // Structured Guide
        entry(
            STRUCTURED_GUIDE,
            CURIOUS_EXPLORER,
            Stretch,
            "Fixed routines can feel like a fence to a child who wants to roam.",
            &["Reliable reading time every day"],
            &["Explorer resists assigned books and rigid slots"],
            &["Keep the time fixed but make the book entirely their choice"],
        ),
        entry(
            STRUCTURED_GUIDE,
            CAREFUL_THINKER,
            Natural,
            "Predictable routines give a careful thinker the calm they read best in.",
            &["Quiet, consistent reading window", "Rereading is welcome"],
            &["Routine may never stretch them to new genres"],
            &["Add one 'new kind of book' slot per month to the routine"],
        ),
        entry(
            STRUCTURED_GUIDE,
            HESITANT_READER,
            Complementary,
            "Small, predictable steps help a hesitant reader build early wins.",
            &["Short daily sessions remove the question of whether to read"],
            &["Routine without warmth can feel like a punishment"],
            &["Start with five minutes and celebrate every finished session"],
        ),
        // Warm Nurturer
        entry(
            WARM_NURTURER,
            DETERMINED_ACHIEVER,
            Growth,
            "Your encouragement fuels an achiever, as long as you also help them aim high.",
            &["Child feels supported while chasing goals"],
            &["Comfort-first habits may under-challenge this child"],
            &["Pair every celebration with a slightly bigger next step"],
        ),
        entry(
            WARM_NURTURER,
            IMAGINATIVE_DREAMER,
            Natural,
            "Cozy, emotionally rich reading time is a dreamer's favourite place.",
            &["Shared wonder at stories", "Safe space for big feelings in books"],
            &["Bedtime stories may stay the only reading they do"],
            &["Keep a 'dream journal' of favourite story worlds together"],
        ),
        entry(
            WARM_NURTURER,
            HESITANT_READER,
            Natural,
            "Warmth rebuilds the association between books and safety.",
            &["Patience with struggle", "Encouragement at every small win"],
            &["Stepping in too quickly on hard words"],
            &["Wait five seconds before helping, then praise the attempt"],
        ),
        // Achievement Coach
        entry(
            ACHIEVEMENT_COACH,
            DETERMINED_ACHIEVER,
            Natural,
            "Two goal-setters: progress charts and challenges energise you both.",
            &["Clear, shared goals", "Visible progress"],
            &["Reading can become only about numbers"],
            &["Add a goal about enjoyment, such as finding a new favourite author"],
        ),
        entry(
            ACHIEVEMENT_COACH,
            HESITANT_READER,
            Stretch,
            "Scoreboards can feel like proof of failure to a hesitant reader.",
            &["Structure helps when goals are tiny"],
            &["Comparisons and missed targets deepen avoidance"],
            &[
                "Track effort, not pages",
                "Hide rankings; celebrate personal bests only",
            ],
        ),
        // Faith Formation Mentor
        entry(
            FAITH_FORMATION_MENTOR,
            SOCIAL_CONNECTOR,
            Natural,
            "Family read-alouds and conversations about virtue feed a connector's love of sharing.",
            &["Stories become family conversations", "Parish and school reading groups"],
            &["Discussion can tip into lecturing"],
            &["Let your child lead the 'what would you do?' conversation"],
        ),
        entry(
            FAITH_FORMATION_MENTOR,
            IMAGINATIVE_DREAMER,
            Complementary,
            "Great stories of faith and adventure give a dreamer worlds worth dreaming in.",
            &["Rich allegory and myth", "Feast-day read-aloud traditions"],
            &["Insisting on a moral for every story"],
            &["Alternate 'lesson' books with purely joyful fantasy"],
        ),
        // Present Companion
        entry(
            PRESENT_COMPANION,
            SOCIAL_CONNECTOR,
            Natural,
            "Reading side by side is exactly the shared experience a connector wants.",
            &["Daily shared reading", "Plenty of talk about books"],
            &["Independent stamina may lag"],
            &["Read the same book separately, then meet to talk about it"],
        ),
        entry(
            PRESENT_COMPANION,
            HESITANT_READER,
            Complementary,
            "Your unhurried presence makes reading feel safe and doable.",
            &["Modeling shows reading is normal", "Shared pages lower the stakes"],
            &["Always reading together can delay independent reading"],
            &["Alternate pages, then gradually hand over whole chapters"],
        ),
    ]
}

/// Looks up a compatibility entry in a slice of entries.
///
/// The lookup is directional; `(parent, child)` and `(child, parent)` are
/// unrelated keys.
pub fn find_compatibility<'a>(
    entries: &'a [CompatibilityEntry],
    parent_archetype_id: &str,
    child_archetype_id: &str,
) -> Option<&'a CompatibilityEntry> {
    entries.iter().find(|e| {
        e.parent_archetype_id == parent_archetype_id && e.child_archetype_id == child_archetype_id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pairs_are_unique() {
        let matrix = compatibility_matrix();
        let keys: HashSet<_> = matrix.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), matrix.len());
    }

    #[test]
    fn test_pairs_reference_known_archetypes() {
        let parents: HashSet<_> = parent_archetypes().into_iter().map(|a| a.id).collect();
        let children: HashSet<_> = child_archetypes().into_iter().map(|c| c.id).collect();
        for e in compatibility_matrix() {
            assert!(parents.contains(&e.parent_archetype_id), "{}", e.key());
            assert!(children.contains(&e.child_archetype_id), "{}", e.key());
        }
    }

    #[test]
    fn test_autonomy_supporter_row_is_complete() {
        let matrix = compatibility_matrix();
        for child in child_archetypes() {
            assert!(
                find_compatibility(&matrix, AUTONOMY_SUPPORTER, &child.id).is_some(),
                "missing autonomy_supporter/{}",
                child.id
            );
        }
    }

    #[test]
    fn test_matrix_has_authored_gaps() {
        let matrix = compatibility_matrix();
        assert!(matrix.len() < 36);
        assert!(find_compatibility(&matrix, ACHIEVEMENT_COACH, CURIOUS_EXPLORER).is_none());
    }

    #[test]
    fn test_lookup_is_directional() {
        let matrix = compatibility_matrix();
        let entry = find_compatibility(&matrix, WARM_NURTURER, HESITANT_READER).unwrap();
        assert_eq!(entry.level, CompatibilityLevel::Natural);
        assert!(find_compatibility(&matrix, HESITANT_READER, WARM_NURTURER).is_none());
    }
}
