use anyhow::Result;
use pdna_application::admin::execute;
use pdna_application::{ActionEnvelope, AdminAction, Assessment, DnaStats, LoadReport, ValidationReport};
use pdna_core::config::StorageBackend;

use super::context::{CliContext, StoreOptions};

async fn run_action(ctx: &CliContext, action: AdminAction, confirm: bool) -> ActionEnvelope {
    execute(&ctx.gateway, &ctx.config.seed, action, confirm).await
}

fn print_json(envelope: &ActionEnvelope) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

fn finish(envelope: &ActionEnvelope) -> Result<()> {
    if !envelope.success {
        anyhow::bail!("{}", envelope.message);
    }
    Ok(())
}

fn print_stats(stats: &DnaStats) {
    let counts = &stats.counts;
    println!("  Questions:     {}", counts.questions);
    println!("  Archetypes:    {}", counts.archetypes);
    println!("  Compatibility: {}", counts.compatibility);
    println!("  Guidance:      {}", counts.guidance);
    println!("  Config:        {}", counts.config);
    println!("  Total:         {}", counts.total());
    match (&stats.dataset, &stats.version) {
        (Some(dataset), Some(version)) => println!("  Dataset:       {} v{}", dataset, version),
        (Some(dataset), None) => println!("  Dataset:       {} (unversioned)", dataset),
        _ => println!("  Dataset:       never loaded"),
    }
    if let Some(loaded) = stats.last_loaded {
        println!("  Last loaded:   {}", loaded.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub async fn setup_complete(options: &StoreOptions, yes: bool, json: bool) -> Result<()> {
    let ctx = CliContext::open(options, false).await?;
    if !json {
        println!("🌱 Loading Parent DNA dataset '{}' v{}...", ctx.config.seed.dataset, ctx.config.seed.version);
    }

    let envelope = run_action(&ctx, AdminAction::SetupComplete, yes).await;
    if json {
        print_json(&envelope)?;
        return finish(&envelope);
    }

    let report: Option<LoadReport> = envelope
        .data
        .clone()
        .and_then(|data| serde_json::from_value(data).ok());

    if envelope.success {
        println!("✅ {}", envelope.message);
        if let Some(report) = &report {
            if report.documents_deleted > 0 {
                println!("🗑️  Removed {} existing documents", report.documents_deleted);
            }
            println!("📦 Wrote {} documents", report.documents_written);
        }
        if let Some(stats) = &envelope.stats {
            print_stats(stats);
        }
        if ctx.backend == StorageBackend::Memory {
            println!("ℹ️  In-memory store: nothing was persisted");
        }
        return Ok(());
    }

    if report.as_ref().is_some_and(|r| r.requires_confirmation) {
        println!("⚠️  {}", envelope.message);
        println!("   Re-run with --yes to replace the stored data.");
    }
    finish(&envelope)
}

pub async fn validate(options: &StoreOptions, json: bool) -> Result<()> {
    let ctx = CliContext::open(options, true).await?;
    let envelope = run_action(&ctx, AdminAction::Validate, false).await;
    if json {
        print_json(&envelope)?;
        return finish(&envelope);
    }

    let report: Option<ValidationReport> = envelope
        .data
        .clone()
        .and_then(|data| serde_json::from_value(data).ok());

    if let Some(report) = &report {
        let counts = &report.counts;
        println!("🔍 Stored dataset");
        println!(
            "  {} questions, {} parent archetypes, {} child archetypes, {} compatibility entries, {} guidance entries",
            counts.questions, counts.archetypes, counts.child_archetypes, counts.compatibility, counts.guidance
        );
        for issue in &report.issues {
            println!("❌ {}", issue);
        }
        for recommendation in &report.recommendations {
            println!("💡 {}", recommendation);
        }
    }

    if envelope.success {
        println!("✅ {}", envelope.message);
    }
    finish(&envelope)
}

pub async fn get_assessment(options: &StoreOptions, json: bool) -> Result<()> {
    let ctx = CliContext::open(options, true).await?;
    let envelope = run_action(&ctx, AdminAction::GetAssessment, false).await;
    if json {
        print_json(&envelope)?;
        return finish(&envelope);
    }
    finish(&envelope)?;

    let assessment: Assessment = match envelope.data.clone() {
        Some(data) => serde_json::from_value(data)?,
        None => anyhow::bail!("Assessment payload missing"),
    };

    println!("📋 {}", envelope.message);
    for (index, question) in assessment.questions.iter().enumerate() {
        println!();
        println!("{}. {} [{}]", index + 1, question.prompt, question.id);
        for option in &question.options {
            println!("   {}) {}", option.id, option.text);
        }
    }
    println!();
    println!("🧬 Parent archetypes");
    for archetype in &assessment.archetypes {
        println!("  {} ({}): {}", archetype.name, archetype.id, archetype.tagline);
    }
    Ok(())
}

pub async fn stats(options: &StoreOptions, json: bool) -> Result<()> {
    let ctx = CliContext::open(options, true).await?;
    let envelope = run_action(&ctx, AdminAction::Stats, false).await;
    if json {
        print_json(&envelope)?;
        return finish(&envelope);
    }
    finish(&envelope)?;

    println!("📊 {}", envelope.message);
    if let Some(stats) = &envelope.stats {
        print_stats(stats);
    }
    Ok(())
}
