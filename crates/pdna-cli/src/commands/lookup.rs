use anyhow::Result;

use super::context::{CliContext, StoreOptions};

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}:", title);
    for item in items {
        println!("    • {}", item);
    }
}

pub async fn compatibility(options: &StoreOptions, parent: &str, child: &str, json: bool) -> Result<()> {
    let ctx = CliContext::open(options, true).await?;
    let entry = ctx.gateway.get_compatibility(parent, child).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let Some(entry) = entry else {
        println!("🤷 No compatibility guidance for {} with {} yet", parent, child);
        return Ok(());
    };

    println!("🤝 {} × {} ({})", entry.parent_archetype_id, entry.child_archetype_id, entry.level);
    println!("  {}", entry.summary);
    print_list("Strengths", &entry.strengths);
    print_list("Watch out for", &entry.watch_outs);
    print_list("Try", &entry.strategies);
    Ok(())
}

pub async fn guidance(options: &StoreOptions, child: &str, modifiers: &[String], json: bool) -> Result<()> {
    let ctx = CliContext::open(options, true).await?;
    let bundle = ctx.gateway.get_guidance(child, modifiers).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    if bundle.is_empty() {
        println!("🤷 No guidance found for {}", child);
        return Ok(());
    }

    match &bundle.child {
        Some(guidance) => {
            println!("📚 {}", guidance.title);
            println!("  {}", guidance.summary);
            print_list("Strategies", &guidance.strategies);
            print_list("Book ideas", &guidance.book_ideas);
        }
        None => println!("🤷 No guidance for child archetype {}", child),
    }

    for modifier in &bundle.modifiers {
        println!();
        println!("🧩 {}", modifier.name);
        println!("  {}", modifier.summary);
        print_list("Strategies", &modifier.strategies);
    }

    let skipped: Vec<&String> = modifiers
        .iter()
        .filter(|m| !bundle.modifiers.iter().any(|g| &g.modifier_id == *m))
        .collect();
    if !skipped.is_empty() {
        println!();
        println!(
            "⚠️  Unknown modifiers skipped: {}",
            skipped.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}
