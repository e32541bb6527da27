//! task-register - create an account on the task-market backend

use clap::Parser;
use std::sync::Arc;

use libtaskmarket::{
    ApiError, Config, Credentials, HttpApi, MarketError, RegisterController, Result, UiState,
};

#[derive(Parser, Debug)]
#[command(name = "task-register")]
#[command(about = "Create an account on the task-market backend", long_about = None)]
struct Cli {
    /// Display name for the new account
    #[arg(short, long)]
    name: String,

    /// Account email
    #[arg(short, long, env = "TASKMARKET_EMAIL")]
    email: String,

    /// Account password (prefer the environment variable to the flag)
    #[arg(short, long, env = "TASKMARKET_PASSWORD", hide_env_values = true)]
    password: String,

    /// Backend base URL (overrides the config file)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
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
    if cli.name.trim().is_empty() || cli.email.trim().is_empty() || cli.password.trim().is_empty() {
        return Err(MarketError::InvalidInput(
            "name, email and password must not be blank".to_string(),
        ));
    }

    let mut config = Config::load_or_default()?;
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }

    let api = Arc::new(HttpApi::from_config(&config.server)?);
    let mut controller = RegisterController::new(api);

    let credentials = Credentials::new(cli.email, cli.password);
    controller.register(&cli.name, &credentials).await;

    // Consume the outcome once, then reset
    let outcome = controller.state().clone();
    controller.reset();

    match outcome {
        UiState::Success(message) => {
            println!("{message}");
            Ok(())
        }
        UiState::Error(message) => Err(MarketError::Api(ApiError::Rejected(message))),
        UiState::Idle | UiState::Loading => Err(MarketError::Api(ApiError::Rejected(
            "registration did not complete".to_string(),
        ))),
    }
}
