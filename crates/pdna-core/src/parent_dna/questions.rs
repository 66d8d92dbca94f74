//! Built-in assessment question bank.

use super::model::{AnswerOption, Question};

fn option(id: &str, text: &str, traits: &[&str]) -> AnswerOption {
    AnswerOption {
        id: id.to_string(),
        text: text.to_string(),
        traits: traits.iter().map(|t| t.to_string()).collect(),
    }
}

fn question(id: &str, prompt: &str, research_note: &str, options: Vec<AnswerOption>) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        research_note: research_note.to_string(),
        options,
    }
}

/// Returns the assessment questions in presentation order.
///
/// The position in this list becomes the persisted `order` field.
pub fn question_bank() -> Vec<Question> {
    vec![
        question(
            "free_half_hour",
            "Your child finishes homework and has thirty free minutes before dinner. What do you most often do?",
            "Perceived choice in leisure reading predicts sustained reading motivation (self-determination theory).",
            vec![
                option("a", "Ask what they feel like reading and let them pick anything from the shelf", &["autonomy_supportive", "choice_centered"]),
                option("b", "Stick to our usual twenty-minute reading slot", &["routine_building", "consistent"]),
                option("c", "Sit down with them and read together", &["shared_reading", "intentional_presence"]),
                option("d", "Remind them how many minutes are left on this week's reading goal", &["goal_oriented", "progress_tracking"]),
            ],
        ),
        question(
            "reluctant_evening",
            "Your child says \"I don't want to read tonight.\" Your first response is...",
            "Responsive, non-controlling replies to resistance protect a child's reading identity.",
            vec![
                option("a", "Ask what's behind it and talk it through, keeping a little reading time on the table", &["autonomy_supportive", "responsive", "reading_prioritizing"]),
                option("b", "Remind them that reading is part of the routine, no exceptions", &["structure_providing", "clear_expectations"]),
                option("c", "Offer a hug and suggest reading something cozy together", &["warmth_centered", "shared_reading"]),
                option("d", "Point out the points they'll earn toward their next badge", &["reward_based", "achievement_focused"]),
            ],
        ),
        question(
            "easy_book",
            "At the library, your child heads straight for a book you think is too easy. You...",
            "Self-selected books, even below level, increase reading volume, which drives fluency.",
            vec![
                option("a", "Let it go; choosing is part of becoming a reader", &["autonomy_supportive", "trust_based"]),
                option("b", "Suggest they also pick one book at their level", &["clear_expectations", "goal_oriented"]),
                option("c", "Ask what they like about it and share your own favourite from that age", &["emotionally_attuned", "modeling"]),
                option("d", "Look together for a saint's story or a book with a virtue theme", &["faith_integrating", "virtue_focused"]),
            ],
        ),
        question(
            "while_they_read",
            "When your child is reading at home, you are usually...",
            "Children whose parents read in their presence are more likely to read independently.",
            vec![
                option("a", "Reading my own book nearby, phone put away, without hovering", &["autonomy_supportive", "respectful", "intentional_presence"]),
                option("b", "Doing chores, but checking in on their progress", &["progress_tracking", "structure_providing"]),
                option("c", "Right beside them, ready to help with hard words", &["responsive", "encouraging"]),
                option("d", "Praying or reading Scripture as part of our evening", &["faith_integrating", "family_ritual"]),
            ],
        ),
        question(
            "finished_book",
            "Your child finishes a book. What happens next?",
            "Talk about books is most effective when the child leads the conversation.",
            vec![
                option("a", "They decide whether and how they want to talk about it", &["trust_based", "intrinsic_motivation"]),
                option("b", "We log it on the family reading chart", &["progress_tracking", "consistent"]),
                option("c", "We celebrate together and I tell them how proud I am", &["encouraging", "warmth_centered"]),
                option("d", "We talk about what the characters chose and why it mattered", &["virtue_focused", "shared_reading"]),
            ],
        ),
        question(
            "screens",
            "How are screens and reading balanced in your home?",
            "Co-created media rules are followed more consistently than imposed ones.",
            vec![
                option("a", "My child helps set the rules and we revisit them together", &["choice_centered", "autonomy_supportive"]),
                option("b", "Clear limits that don't change from day to day", &["clear_expectations", "consistent"]),
                option("c", "Reading time earns screen time", &["reward_based", "goal_oriented"]),
                option("d", "Evenings are unplugged family time, and I keep to it as well", &["modeling", "family_ritual"]),
            ],
        ),
        question(
            "hard_chapter",
            "Your child gets frustrated with a hard chapter. You...",
            "Emotion coaching during academic frustration improves persistence.",
            vec![
                option("a", "Name the feeling and stay with them until they're calm", &["emotionally_attuned", "responsive"]),
                option("b", "Break it into a few pages per day", &["structure_providing", "routine_building"]),
                option("c", "Remind them how far they've come and the goal ahead", &["achievement_focused", "encouraging"]),
                option("d", "Ask whether they'd like to keep going, switch books or take a break", &["choice_centered", "trust_based"]),
            ],
        ),
        question(
            "bedtime",
            "Which best describes bedtime in your home?",
            "Predictable bedtime read-alouds are associated with stronger vocabulary growth.",
            vec![
                option("a", "Same time, same routine, story included", &["routine_building", "consistent"]),
                option("b", "Slow and unrushed; we read until they're sleepy", &["unhurried", "shared_reading"]),
                option("c", "Night prayers and a chapter from a book we chose together", &["family_ritual", "faith_integrating", "reading_prioritizing"]),
                option("d", "They read on their own; I trust them to put the book down", &["trust_based", "autonomy_supportive"]),
            ],
        ),
        question(
            "below_grade_level",
            "The school reports your child is reading below grade level. Your first move is...",
            "Parental framing of reading difficulty shapes a child's self-concept as a reader.",
            vec![
                option("a", "Set a target and a weekly plan to reach it", &["goal_oriented", "achievement_focused", "progress_tracking"]),
                option("b", "Ask my child how reading feels for them right now", &["emotionally_attuned", "autonomy_supportive"]),
                option("c", "Make reading time a non-negotiable daily priority", &["reading_prioritizing", "clear_expectations"]),
                option("d", "Carve out more time to read with them myself", &["intentional_presence", "shared_reading"]),
            ],
        ),
        question(
            "motivation_belief",
            "Which statement do you most agree with?",
            "Parents' beliefs about motivation predict the strategies they use at home.",
            vec![
                option("a", "Kids read more when they find books that matter to them", &["intrinsic_motivation", "choice_centered"]),
                option("b", "Kids read more when they know what is expected", &["clear_expectations", "structure_providing"]),
                option("c", "Kids read more when they feel safe and loved", &["warmth_centered", "emotionally_attuned"]),
                option("d", "Kids read more when they can see their progress", &["progress_tracking", "reward_based"]),
            ],
        ),
        question(
            "parent_reading",
            "How often does your child see you reading for your own enjoyment?",
            "Observed adult reading is one of the strongest home predictors of child reading frequency.",
            vec![
                option("a", "Most days; it's just part of life here", &["modeling", "reading_prioritizing"]),
                option("b", "Sometimes, when things are quiet", &["unhurried", "intentional_presence"]),
                option("c", "Mostly when we read Scripture or devotional books together", &["faith_integrating", "family_ritual"]),
                option("d", "Rarely, but I make sure they get their reading done", &["achievement_focused", "structure_providing"]),
            ],
        ),
        question(
            "busy_week",
            "In a packed week, reading time...",
            "Habit stability under stress distinguishes routines from rules.",
            vec![
                option("a", "Moves around, but my child decides when it happens", &["autonomy_supportive", "choice_centered"]),
                option("b", "Stays on the calendar no matter what", &["consistent", "reading_prioritizing"]),
                option("c", "Becomes a quiet ten minutes together to slow down", &["unhurried", "warmth_centered"]),
                option("d", "Gets caught up on the weekend so we stay on track", &["goal_oriented", "progress_tracking"]),
            ],
        ),
    ]
}
