//! Colored output for envelopes and streamed log lines.

use colored::Colorize;
use pdna_application::{ActionEnvelope, AdminAction, Assessment, DnaStats, OperationLogEntry, ValidationReport};

pub fn print_log(entry: &OperationLogEntry) {
    let line = format!("  │ {}", entry.message);
    match entry.level.as_str() {
        "ERROR" => println!("{}", line.red()),
        "WARN" => println!("{}", line.yellow()),
        _ => println!("{}", line.bright_black()),
    }
}

fn print_stats(stats: &DnaStats) {
    let counts = &stats.counts;
    println!(
        "  {} questions · {} archetypes · {} compatibility · {} guidance · {} config",
        counts.questions, counts.archetypes, counts.compatibility, counts.guidance, counts.config
    );
    if let (Some(dataset), Some(version)) = (&stats.dataset, &stats.version) {
        println!("  {} v{}", dataset, version);
    }
    if let Some(loaded) = stats.last_loaded {
        println!("  {}", format!("last loaded {}", loaded.format("%Y-%m-%d %H:%M UTC")).bright_black());
    }
}

pub fn print_envelope(action: AdminAction, envelope: &ActionEnvelope) {
    if envelope.success {
        println!("{}", format!("✅ {}", envelope.message).bright_green());
    } else {
        println!("{}", format!("❌ {}", envelope.message).bright_red());
    }

    match action {
        AdminAction::Validate => {
            let report = envelope
                .data
                .clone()
                .and_then(|d| serde_json::from_value::<ValidationReport>(d).ok());
            if let Some(report) = report {
                for issue in &report.issues {
                    println!("  {}", format!("✗ {}", issue).red());
                }
                for recommendation in &report.recommendations {
                    println!("  {}", format!("• {}", recommendation).yellow());
                }
            }
        }
        AdminAction::GetAssessment => {
            let assessment = envelope
                .data
                .clone()
                .and_then(|d| serde_json::from_value::<Assessment>(d).ok());
            if let Some(assessment) = assessment {
                for question in &assessment.questions {
                    println!("  {} {}", format!("[{}]", question.id).bright_black(), question.prompt);
                }
                for archetype in &assessment.archetypes {
                    println!("  {} {}", "🧬".bright_magenta(), archetype.name.bright_magenta());
                }
            }
        }
        AdminAction::SetupComplete | AdminAction::Stats => {}
    }

    if let Some(stats) = &envelope.stats {
        print_stats(stats);
    }
}

pub fn print_help() {
    println!("{}", "Commands:".bright_magenta().bold());
    for action in <AdminAction as strum::IntoEnumIterator>::iter() {
        println!("  {:<16} {}", action.to_string().bright_cyan(), action.description());
    }
    println!("  {:<16} {}", "setup-complete --yes".bright_cyan(), "Load without the overwrite prompt");
    println!("  {:<16} {}", "status".bright_cyan(), "Show the session state");
    println!("  {:<16} {}", "logout".bright_cyan(), "Sign out and forget the stored session");
    println!("  {:<16} {}", "quit".bright_cyan(), "Leave the console (the session stays valid)");
}
