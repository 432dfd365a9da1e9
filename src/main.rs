//! Interactive requirements interview on the terminal.
//!
//! Reads one answer per line from stdin and prints the assistant's replies.
//! Lines starting with `/` are commands; see `/help`.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use srs_assistant::adapters::ai::build_provider;
use srs_assistant::adapters::document::{LocalDocumentFileStorage, TemplateDocumentGenerator};
use srs_assistant::application::{
    CreateSessionCommand, ElicitationOrchestrator, ExportDocumentCommand, ExportDocumentHandler,
    OrchestratorConfig, RephrasingAdvisor, SessionEvent,
};
use srs_assistant::config::{AppConfig, LoggingConfig};
use srs_assistant::domain::elicitation::resolution_label;

const HELP: &str = "Commands:
  /export   write the SRS document
  /status   show stage and counts
  /reset    discard the project and start over
  /quit     leave";

#[derive(Debug, Parser)]
#[command(name = "srs-assistant", version, about = "Guided requirements interview")]
struct Args {
    /// Project name; asked for interactively when omitted
    #[arg(short, long)]
    project: Option<String>,

    /// Directory exported documents are written to
    #[arg(short, long, env = "SRS_ASSISTANT__EXPORT__OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Reply immediately instead of pausing between turns
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("srs-assistant error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = args.output_dir {
        config.export.output_dir = dir;
    }
    if args.no_delay {
        config.session.turn_delay_ms = 0;
    }
    config.validate()?;
    init_tracing(&config.logging)?;

    let mut orchestrator = ElicitationOrchestrator::new(OrchestratorConfig::from(&config.session));
    if let Some(provider) = build_provider(&config.ai) {
        orchestrator =
            orchestrator.with_advisor(RephrasingAdvisor::new(provider, config.ai.max_tokens));
    }
    let exporter = ExportDocumentHandler::new(
        Arc::new(TemplateDocumentGenerator::new()),
        Arc::new(LocalDocumentFileStorage::new(config.export.output_dir.clone())),
    );

    let mut events = orchestrator.subscribe();
    info!(output_dir = %config.export.output_dir.display(), "srs-assistant ready");

    match args.project {
        Some(name) => start_project(&mut orchestrator, &name),
        None => println!("Project name:"),
    }
    print_events(&mut events);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match classify(&line) {
            Input::Blank => continue,
            Input::Command("/quit" | "/exit") => break,
            Input::Command("/help") => println!("{HELP}"),
            Input::Command("/status") => print_status(&orchestrator),
            Input::Command("/reset") => {
                orchestrator.reset_session();
                print_events(&mut events);
                println!("Project name:");
            }
            Input::Command("/export") => {
                match exporter
                    .handle(orchestrator.session(), ExportDocumentCommand::now())
                    .await
                {
                    Ok(result) => println!(
                        "Exported {} requirement(s) to {} ({} bytes)",
                        result.requirement_count,
                        result.path.display(),
                        result.size_bytes
                    ),
                    Err(err) => {
                        warn!(code = %err.code(), error = %err, "export refused");
                        println!("{err}");
                    }
                }
            }
            Input::Command(command) => {
                println!("Unknown command {command}\n{HELP}");
            }
            Input::Text(text) if !orchestrator.session().is_started() => {
                start_project(&mut orchestrator, text);
            }
            Input::Text(text) => {
                orchestrator.submit_turn(text).await;
            }
        }
        print_events(&mut events);
    }

    Ok(())
}

/// One line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    /// Trimmed command, leading `/` included.
    Command(&'a str),
    /// Answer exactly as typed.
    Text(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Input::Blank
    } else if trimmed.starts_with('/') {
        Input::Command(trimmed)
    } else {
        Input::Text(line)
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| format!("failed to initialize tracing subscriber: {err}"))?;
    Ok(())
}

fn start_project(orchestrator: &mut ElicitationOrchestrator, name: &str) {
    if let Err(err) = orchestrator.create_session(CreateSessionCommand {
        project_name: name.to_string(),
    }) {
        println!("{err}\nProject name:");
    }
}

fn print_events(events: &mut broadcast::Receiver<SessionEvent>) {
    loop {
        match events.try_recv() {
            Ok(SessionEvent::Message(message)) if !message.is_user() => {
                println!("\n{}\n", message.text());
            }
            Ok(SessionEvent::Message(_)) => {}
            Ok(SessionEvent::Suggestion { suggestion, .. }) => {
                println!("Suggested rewrite: {suggestion}\n");
            }
            Ok(SessionEvent::Reset) => println!("Project discarded."),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "event output fell behind");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return,
        }
    }
}

fn print_status(orchestrator: &ElicitationOrchestrator) {
    let Some(snapshot) = orchestrator.snapshot() else {
        println!("No project yet.");
        return;
    };
    let stats = snapshot.stats();
    println!(
        "Project: {}\nStage: {}\nRequirements: {}\nAmbiguities: {} ({} unresolved)\nContradictions: {} ({} unresolved)",
        snapshot.project_name,
        snapshot.stage,
        stats.requirements,
        stats.ambiguities,
        stats.unresolved_ambiguities,
        stats.contradictions,
        stats.unresolved_contradictions,
    );
    for finding in &snapshot.ambiguities {
        println!(
            "  - \"{}\" [{}] {}",
            finding.source_text,
            finding.terms_joined(),
            resolution_label(finding.resolved)
        );
    }
}
