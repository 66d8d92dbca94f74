use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdna_core::config::StorageBackend;
use pdna_core::inquiry::InquiryType;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pdna")]
#[command(about = "Parent DNA CLI - assessment content, scoring and inquiries", long_about = None)]
struct Cli {
    /// Document store to use (overrides the config file)
    #[arg(long, global = true)]
    store: Option<StorageBackend>,

    /// Data directory of the directory store (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace all Parent DNA collections with the built-in dataset
    SetupComplete {
        /// Overwrite existing data without asking
        #[arg(long, short)]
        yes: bool,
    },
    /// Check the stored dataset for missing or incomplete content
    Validate,
    /// Read questions and archetypes back from the store
    GetAssessment,
    /// Show per-collection counts and the last load
    Stats,
    /// Score a set of answers and print the winning archetype
    Classify {
        /// JSON file mapping question ids to option ids
        #[arg(long)]
        answers: Option<PathBuf>,
        /// A single answer as `question=option` (repeatable)
        #[arg(long = "answer", value_name = "QUESTION=OPTION")]
        answer: Vec<String>,
    },
    /// Look up guidance for a parent/child archetype pair
    Compatibility {
        parent: String,
        child: String,
    },
    /// Look up guidance for a child archetype and its modifiers
    Guidance {
        child: String,
        /// Modifier id such as `dyslexia` (repeatable)
        #[arg(long = "modifier", short)]
        modifiers: Vec<String>,
    },
    /// Send a contact inquiry
    Inquiry {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long = "type", default_value = "general")]
        inquiry_type: InquiryType,
        #[arg(long, default_value = "")]
        organization: String,
        #[arg(long, default_value = "")]
        role: String,
        /// Write the mail to the outbox directory instead of logging it
        #[arg(long)]
        outbox: bool,
    },
    /// Show the resolved configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = commands::context::StoreOptions {
        backend: cli.store,
        data_dir: cli.data_dir,
    };
    let json = cli.json;

    match cli.command {
        Commands::SetupComplete { yes } => commands::admin::setup_complete(&options, yes, json).await?,
        Commands::Validate => commands::admin::validate(&options, json).await?,
        Commands::GetAssessment => commands::admin::get_assessment(&options, json).await?,
        Commands::Stats => commands::admin::stats(&options, json).await?,
        Commands::Classify { answers, answer } => {
            commands::classify::run(&options, answers.as_deref(), &answer, json).await?
        }
        Commands::Compatibility { parent, child } => {
            commands::lookup::compatibility(&options, &parent, &child, json).await?
        }
        Commands::Guidance { child, modifiers } => {
            commands::lookup::guidance(&options, &child, &modifiers, json).await?
        }
        Commands::Inquiry {
            name,
            email,
            message,
            inquiry_type,
            organization,
            role,
            outbox,
        } => {
            let form = pdna_core::inquiry::InquiryForm {
                name,
                email,
                organization,
                role,
                inquiry_type,
                message,
            };
            commands::inquiry::run(&options, &form, outbox, json).await?
        }
        Commands::Config => commands::context::show(&options)?,
    }

    Ok(())
}
