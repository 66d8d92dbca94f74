use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use pdna_application::operation_log::OperationLogReceiver;
use pdna_application::{AdminAction, AdminConsole, OperationLogLayer, ParentDnaService};
use pdna_core::config::StorageBackend;
use pdna_core::store::DocumentStore;
use pdna_infrastructure::{
    ConfigService, DirDocumentStore, FileSessionStore, InMemoryDocumentStore, PdnaPaths,
    SharedSecretAuth,
};

mod command;
mod helper;
mod render;

use command::ConsoleCommand;
use helper::ConsoleHelper;

type ConsoleEditor = Editor<ConsoleHelper, DefaultHistory>;

fn init_tracing(paths: &PdnaPaths, operation_log: OperationLogLayer) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "pdna-console.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(operation_log)
        .init();

    Ok(guard)
}

/// Reads a line with the helper's masking switched on.
fn read_secret(rl: &mut ConsoleEditor, prompt: &str) -> rustyline::Result<String> {
    if let Some(helper) = rl.helper_mut() {
        helper.masking = true;
    }
    let secret = rl.readline(prompt);
    if let Some(helper) = rl.helper_mut() {
        helper.masking = false;
    }
    secret
}

enum SignIn {
    Accepted,
    Rejected,
    Quit,
}

async fn sign_in(rl: &mut ConsoleEditor, console: &AdminConsole) -> Result<SignIn> {
    let secret = match read_secret(rl, "admin secret: ") {
        Ok(secret) => secret,
        Err(ReadlineError::Interrupted) => return Ok(SignIn::Rejected),
        Err(ReadlineError::Eof) => return Ok(SignIn::Quit),
        Err(e) => return Err(e.into()),
    };

    if console.sign_in(secret.trim(), Utc::now()).await? {
        println!("{}", "🔓 Signed in".bright_green());
        Ok(SignIn::Accepted)
    } else {
        println!("{}", "Incorrect secret".bright_red());
        Ok(SignIn::Rejected)
    }
}

/// Drives `operation` to completion while printing the log lines it emits.
async fn stream_logs<F: Future>(operation: F, logs: &mut OperationLogReceiver) -> F::Output {
    // Anything queued before the operation started is not part of it
    while logs.try_recv().is_ok() {}

    tokio::pin!(operation);
    loop {
        tokio::select! {
            output = &mut operation => {
                while let Ok(entry) = logs.try_recv() {
                    render::print_log(&entry);
                }
                return output;
            }
            Some(entry) = logs.recv() => render::print_log(&entry),
        }
    }
}

async fn run_action(
    rl: &mut ConsoleEditor,
    console: &AdminConsole,
    logs: &mut OperationLogReceiver,
    action: AdminAction,
    confirm: bool,
) -> Result<()> {
    println!("{}", format!("▶ {}", action).bright_magenta());
    let envelope = match stream_logs(console.run(action, confirm, Utc::now()), logs).await {
        Ok(envelope) => envelope,
        Err(e) => {
            println!("{}", format!("🔒 {}", e).bright_red());
            return Ok(());
        }
    };

    let needs_confirmation = envelope
        .data
        .as_ref()
        .and_then(|d| d.get("requires_confirmation"))
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if !needs_confirmation {
        render::print_envelope(action, &envelope);
        return Ok(());
    }

    println!("{}", format!("⚠️  {}", envelope.message).bright_yellow());
    let answer = match rl.readline("Replace all stored Parent DNA data? [y/N] ") {
        Ok(answer) => answer,
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => String::new(),
        Err(e) => return Err(e.into()),
    };
    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        println!("{}", "Cancelled; nothing was changed".bright_black());
        return Ok(());
    }

    match stream_logs(console.run(action, true, Utc::now()), logs).await {
        Ok(envelope) => render::print_envelope(action, &envelope),
        Err(e) => println!("{}", format!("🔒 {}", e).bright_red()),
    }
    Ok(())
}

/// Signs the console out once the inactivity window has passed.
fn spawn_expiry_watch(console: Arc<AdminConsole>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(console.check_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match console.check_expiry(Utc::now()).await {
                Ok(true) => println!(
                    "\n{}",
                    "⏰ Session expired after inactivity. Press Enter to sign in again.".bright_yellow()
                ),
                Ok(false) => {}
                Err(e) => tracing::warn!("[Console] Expiry check failed: {}", e),
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let paths = PdnaPaths::resolve().context("Failed to resolve the Parent DNA directories")?;
    let config_service = ConfigService::from_paths(&paths);
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    let paths = paths.with_data_dir(config.storage.data_dir.clone());

    let (operation_log, mut logs) = OperationLogLayer::channel();
    let _log_guard = init_tracing(&paths, operation_log)?;

    let auth = SharedSecretAuth::new(config.admin.shared_secret.clone());
    if !auth.is_configured() {
        eprintln!(
            "{}",
            format!(
                "Admin sign-in is disabled: set admin.shared_secret in {}",
                config_service.path().display()
            )
            .bright_red()
        );
        return Ok(());
    }

    let store: Arc<dyn DocumentStore> = match config.storage.backend {
        StorageBackend::Dir => Arc::new(DirDocumentStore::new(paths.store_dir())),
        StorageBackend::Memory => Arc::new(InMemoryDocumentStore::new()),
    };
    let console = Arc::new(AdminConsole::new(
        Arc::new(ParentDnaService::with_store(store)),
        Arc::new(auth),
        Arc::new(FileSessionStore::new(paths.session_file())),
        config.seed.clone(),
        &config.admin,
    )?);
    tracing::info!("[Console] Started with {} store", config.storage.backend);

    let mut rl: ConsoleEditor = Editor::new()?;
    rl.set_helper(Some(ConsoleHelper::new()));

    println!("{}", "=== Parent DNA Admin Console ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    if console.resume(Utc::now()).await? {
        println!("{}", "🔓 Resumed previous session".bright_green());
    }
    spawn_expiry_watch(console.clone());

    loop {
        if !console.state()?.is_authenticated() {
            match sign_in(&mut rl, &console).await? {
                SignIn::Accepted | SignIn::Rejected => continue,
                SignIn::Quit => break,
            }
        }

        let line = match rl.readline("pdna> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        let now = Utc::now();
        if !console.state()?.is_authenticated() || console.check_expiry(now).await? {
            println!("{}", "🔒 Session expired; sign in again".bright_yellow());
            continue;
        }
        console.touch(now).await?;

        match ConsoleCommand::parse(trimmed) {
            ConsoleCommand::Action { action, confirm } => {
                run_action(&mut rl, &console, &mut logs, action, confirm).await?
            }
            ConsoleCommand::Status => {
                println!(
                    "{} (sessions expire after {} minutes without activity)",
                    format!("{:?}", console.state()?).bright_cyan(),
                    console.timeout().num_minutes()
                );
            }
            ConsoleCommand::Logout => {
                console.sign_out().await?;
                println!("{}", "🔒 Signed out".bright_green());
            }
            ConsoleCommand::Help => render::print_help(),
            ConsoleCommand::Quit => break,
            ConsoleCommand::Unknown(input) => {
                println!("{}", format!("Unknown command: {} (try 'help')", input).bright_black());
            }
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
