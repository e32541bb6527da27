//! task-market - browse and edit tasks on the task-market backend
//!
//! Needs a session token from `task-login`, passed via `--token` or the
//! `TASKMARKET_TOKEN` environment variable.

use clap::{Parser, Subcommand};
use std::sync::Arc;

use libtaskmarket::{
    ApiError, Config, HttpApi, MarketError, Result, Session, TaskController, UiState,
};

#[derive(Parser, Debug)]
#[command(name = "task-market")]
#[command(about = "Browse and edit tasks on the task-market backend", long_about = None)]
struct Cli {
    /// Session token issued by task-login
    #[arg(short, long, env = "TASKMARKET_TOKEN", hide_env_values = true)]
    token: String,

    /// Backend base URL (overrides the config file)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Output format for listings (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all tasks
    List,
    /// Create a task
    Create { title: String, content: String },
    /// Update an existing task
    Update {
        id: i64,
        title: String,
        content: String,
    },
    /// Delete a task
    Delete { id: i64 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("error")
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Create { title, content } | Command::Update { title, content, .. } =
        &cli.command
    {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(MarketError::InvalidInput(
                "title and content must not be blank".to_string(),
            ));
        }
    }

    let mut config = Config::load_or_default()?;
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }

    let api = Arc::new(HttpApi::from_config(&config.server)?);
    let session = Session::with_token(cli.token);
    let mut controller = TaskController::new(api);

    match &cli.command {
        Command::List => {
            controller.load(&session).await;
            consume(&mut controller)?;
            render_tasks(&controller, &cli.format)?;
        }
        Command::Create { title, content } => {
            controller.create(&session, title, content).await;
            let message = consume(&mut controller)?;
            println!("{message}");
        }
        Command::Update { id, title, content } => {
            controller.update(&session, *id, title, content).await;
            let message = consume(&mut controller)?;
            println!("{message}");
        }
        Command::Delete { id } => {
            controller.delete(&session, *id).await;
            let message = consume(&mut controller)?;
            println!("{message}");
        }
    }

    Ok(())
}

/// Observe the terminal UI state exactly once, then reset the controller.
/// A successful list load parks at Idle, so Idle is a success here too.
fn consume(controller: &mut TaskController) -> Result<String> {
    let outcome = controller.state().clone();
    controller.reset();

    match outcome {
        UiState::Success(message) => Ok(message),
        UiState::Idle => Ok(String::new()),
        UiState::Error(message) => Err(MarketError::Api(ApiError::Server(message))),
        UiState::Loading => Err(MarketError::Api(ApiError::Server(
            "operation did not complete".to_string(),
        ))),
    }
}

fn render_tasks(controller: &TaskController, format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(controller.tasks())
                .map_err(|e| MarketError::InvalidInput(format!("failed to encode tasks: {e}")))?;
            println!("{json}");
        }
        "text" => {
            for task in controller.tasks() {
                println!("{}\t{}\t{}", task.id, task.title, task.content);
            }
        }
        other => {
            return Err(MarketError::InvalidInput(format!(
                "unknown format '{other}' (expected text or json)"
            )));
        }
    }
    Ok(())
}
