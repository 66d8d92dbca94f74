use std::path::Path;

use anyhow::{Context, Result};
use pdna_core::parent_dna::{ResponseSet, ScoringOutcome};

use super::context::{CliContext, StoreOptions};

/// Splits a `question=option` argument.
fn parse_answer(raw: &str) -> Result<(String, String)> {
    let (question, option) = raw
        .split_once('=')
        .with_context(|| format!("Expected QUESTION=OPTION, got '{}'", raw))?;
    let (question, option) = (question.trim(), option.trim());
    if question.is_empty() || option.is_empty() {
        anyhow::bail!("Expected QUESTION=OPTION, got '{}'", raw);
    }
    Ok((question.to_string(), option.to_string()))
}

/// Builds the response set from an optional JSON file plus inline answers.
///
/// Inline answers override answers from the file.
fn collect_responses(file: Option<&Path>, inline: &[String]) -> Result<ResponseSet> {
    let mut responses = match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<ResponseSet>(&content)
                .with_context(|| format!("{} is not a JSON object of question -> option", path.display()))?
        }
        None => ResponseSet::new(),
    };

    for raw in inline {
        let (question, option) = parse_answer(raw)?;
        responses.answer(question, option);
    }
    Ok(responses)
}

pub async fn run(options: &StoreOptions, file: Option<&Path>, inline: &[String], json: bool) -> Result<()> {
    let responses = collect_responses(file, inline)?;
    let ctx = CliContext::open(options, true).await?;

    let assessment = ctx.gateway.assessment().await?;
    if assessment.archetypes.is_empty() {
        anyhow::bail!("No archetypes stored; run `pdna setup-complete` first");
    }
    for (question_id, option_id) in responses.iter() {
        match assessment.questions.iter().find(|q| q.id == question_id) {
            None => tracing::warn!("Ignoring answer to unknown question '{}'", question_id),
            Some(question) if question.option(option_id).is_none() => {
                tracing::warn!("Ignoring unknown option '{}' of '{}'", option_id, question_id)
            }
            Some(_) => {}
        }
    }

    let result = ctx.gateway.classify(&responses).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let name_of = |id: &str| {
        assessment
            .archetypes
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    match &result.outcome {
        ScoringOutcome::Decisive => {
            println!("🧬 You are {}", name_of(&result.winning_archetype_id));
        }
        ScoringOutcome::Tied { tied_with } => {
            println!("🧬 You are {}", name_of(&result.winning_archetype_id));
            let others: Vec<String> = tied_with.iter().map(|id| name_of(id)).collect();
            println!("⚖️  Tied with {}", others.join(", "));
        }
        ScoringOutcome::InsufficientData => {
            println!("❓ Not enough answers to classify ({} given)", responses.len());
            return Ok(());
        }
    }

    if let Some(archetype) = assessment
        .archetypes
        .iter()
        .find(|a| a.id == result.winning_archetype_id)
    {
        println!("   {}", archetype.tagline);
    }

    println!();
    println!("📊 Scores");
    for score in result.ranking() {
        println!("  {:>3}  {}", score.score, name_of(&score.archetype_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_answer() {
        assert_eq!(
            parse_answer("free_half_hour=c").unwrap(),
            ("free_half_hour".to_string(), "c".to_string())
        );
        assert_eq!(
            parse_answer(" bedtime = b ").unwrap(),
            ("bedtime".to_string(), "b".to_string())
        );
        assert!(parse_answer("bedtime").is_err());
        assert!(parse_answer("=b").is_err());
        assert!(parse_answer("bedtime=").is_err());
    }

    #[test]
    fn test_inline_answers_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bedtime": "a", "screens": "d"}}"#).unwrap();

        let responses =
            collect_responses(Some(file.path()), &["bedtime=b".to_string()]).unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.get("bedtime"), Some("b"));
        assert_eq!(responses.get("screens"), Some("d"));
    }

    #[test]
    fn test_malformed_answers_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(collect_responses(Some(file.path()), &[]).is_err());
    }
}
