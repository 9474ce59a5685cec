use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::{EnvFilter, fmt};

use anchor_core::AnchorError;
use anchor_core::completion::CompletionClient;
use anchor_core::session::{SendOutcome, SessionController, SessionState};
use anchor_core::store::SessionStore;
use anchor_infrastructure::storage::SecretStorage;
use anchor_infrastructure::{AnchorPaths, InMemorySessionStore, TomlSessionStore};
use anchor_interaction::{OpenAICompletionClient, ProcessEnv, resolve_completion_settings};

mod command;
mod helper;
mod render;

use command::Command;
use helper::CliHelper;

type LineEditor = Editor<CliHelper, DefaultHistory>;

#[derive(Parser)]
#[command(name = "anchor")]
#[command(about = "Anchor - a short guided session for everyday stress", long_about = None)]
struct Args {
    /// Directory holding secret.json, store.toml and logs (default: ~/.config/anchor)
    #[arg(long, env = "ANCHOR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Chat model, overriding secret.json and OPENAI_MODEL_NAME
    #[arg(long)]
    model: Option<String>,

    /// Keep the disclaimer flag, snapshot and history in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Write logs to <data dir>/logs/anchor.log instead of stderr
    #[arg(long)]
    log_file: bool,
}

enum Flow {
    Continue,
    Quit,
}

/// The controller plus the store it shares with the REPL.
struct App {
    controller: SessionController,
    store: Arc<dyn SessionStore>,
}

impl App {
    async fn handle(&self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => render::help(),
            Command::Start => match self.controller.start_session().await {
                Ok(greeting) => render::message(&greeting),
                Err(err) => report(&err),
            },
            Command::New => match self.controller.start_new_session().await {
                Ok(greeting) => render::message(&greeting),
                Err(err) => report(&err),
            },
            Command::Resume => self.resume().await,
            Command::End => match self.controller.end_session().await {
                Ok(summary) => render::summary(&summary),
                Err(err) => report(&err),
            },
            Command::ExitSafety => match self.controller.exit_safety_mode().await {
                Ok(()) => {
                    println!("{}", "Take care of yourself.".bright_green());
                    println!();
                    render::home(false);
                }
                Err(err) => report(&err),
            },
            Command::History => match self.store.history().await {
                Ok(entries) => render::history(&entries),
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to read session history");
                    report(&err);
                }
            },
            Command::Say(text) => self.say(&text).await,
            Command::Unknown(name) => {
                render::notice(&format!("Unknown command '{}'. Type '/help'.", name))
            }
        }
        Flow::Continue
    }

    async fn say(&self, text: &str) {
        if self.controller.state().await == SessionState::Active {
            println!("{}", "Anchor is thinking...".bright_black());
        }

        match self.controller.send_message(text).await {
            Ok(SendOutcome::Replied(reply)) | Ok(SendOutcome::Fallback(reply)) => {
                render::message(&reply)
            }
            Ok(SendOutcome::Diverted(_)) => render::safety_screen(),
            Ok(SendOutcome::Discarded) => {}
            Err(err) => report(&err),
        }
    }

    async fn resume(&self) {
        match self.controller.resume_saved_session().await {
            Ok(Some(_)) => {
                println!("{}", "Picking up where you left off.".bright_green());
                println!();
                for message in self.controller.messages().await {
                    render::message(&message);
                }
            }
            Ok(None) => render::notice("There is no unfinished session to resume."),
            Err(err) => report(&err),
        }
    }

    async fn has_saved_session(&self) -> bool {
        match self.store.load_snapshot().await {
            Ok(snapshot) => snapshot.is_some_and(|s| !s.messages.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read saved session");
                false
            }
        }
    }

    async fn prompt(&self) -> &'static str {
        match self.controller.state().await {
            SessionState::Active => "you> ",
            SessionState::SafetyDiverted => "safety> ",
            SessionState::Idle | SessionState::SummaryShown => "anchor> ",
        }
    }
}

fn report(err: &AnchorError) {
    if err.is_invalid_transition() || err.is_busy() {
        render::notice(&err.to_string());
    } else {
        render::error(&err.to_string());
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Shows the disclaimer until it is accepted. Returns false if the user leaves.
async fn disclaimer_gate(rl: &mut LineEditor, store: &dyn SessionStore) -> Result<bool> {
    let accepted = store.has_accepted_disclaimer().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to read disclaimer flag");
        false
    });
    if accepted {
        return Ok(true);
    }

    render::disclaimer();
    loop {
        match rl.readline("Type 'accept' to continue or 'quit' to leave: ") {
            Ok(line) => match line.trim().to_lowercase().as_str() {
                "accept" | "yes" | "y" => {
                    if let Err(err) = store.accept_disclaimer().await {
                        tracing::warn!(error = %err, "Failed to save disclaimer flag");
                    }
                    println!();
                    return Ok(true);
                }
                "quit" | "exit" => return Ok(false),
                _ => {}
            },
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => return Ok(false),
            Err(err) => return Err(err.into()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = match &args.data_dir {
        Some(dir) => AnchorPaths::with_root(dir.clone()),
        None => AnchorPaths::new().context("Failed to locate the config directory")?,
    };
    init_tracing(args.log_file.then(|| paths.log_file()).as_deref())?;

    // ===== Backend Initialization =====
    let secrets = SecretStorage::with_path(paths.secret_file());
    let settings = resolve_completion_settings(&secrets, &ProcessEnv, args.model.as_deref())
        .context("Anchor needs an OpenAI API key to start")?;
    tracing::info!(model = %settings.model, "Completion settings resolved");
    let completion: Arc<dyn CompletionClient> = Arc::new(OpenAICompletionClient::new(settings)?);

    let store: Arc<dyn SessionStore> = if args.ephemeral {
        Arc::new(InMemorySessionStore::new())
    } else {
        Arc::new(TomlSessionStore::new(paths.store_file()))
    };

    let app = App {
        controller: SessionController::new(completion, Arc::clone(&store)),
        store,
    };

    // ===== REPL Setup =====
    let mut rl: LineEditor = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    if !disclaimer_gate(&mut rl, app.store.as_ref()).await? {
        println!("{}", "Goodbye!".bright_green());
        return Ok(());
    }
    render::home(app.has_saved_session().await);

    // ===== Main REPL Loop =====
    loop {
        let prompt = app.prompt().await;

        match rl.readline(prompt) {
            Ok(line) => {
                let conversing = app.controller.state().await == SessionState::Active;
                let Some(command) = Command::parse(&line, conversing) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.trim());

                if let Flow::Quit = app.handle(command).await {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
