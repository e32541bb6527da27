//! task-login - obtain a session token from the task-market backend
//!
//! Prints the token to stdout on success so it composes with the other
//! tools: `TASKMARKET_TOKEN=$(task-login -e yael1@mail.com) task-market list`

use clap::Parser;
use std::sync::Arc;

use libtaskmarket::{
    ApiError, Config, Credentials, HttpApi, LoginController, MarketError, Result, Session, UiState,
};

#[derive(Parser, Debug)]
#[command(name = "task-login")]
#[command(about = "Log in to the task-market backend and print a session token", long_about = None)]
struct Cli {
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
    if cli.email.trim().is_empty() || cli.password.trim().is_empty() {
        return Err(MarketError::InvalidInput(
            "email and password must not be blank".to_string(),
        ));
    }

    let mut config = Config::load_or_default()?;
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
    }

    let api = Arc::new(HttpApi::from_config(&config.server)?);
    let mut session = Session::new();
    let mut controller = LoginController::new(api);

    let credentials = Credentials::new(cli.email, cli.password);
    controller.login(&mut session, &credentials).await;

    // Consume the outcome once, then reset
    let outcome = controller.state().clone();
    controller.reset();

    match outcome {
        UiState::Success(message) => {
            eprintln!("{message}");
            println!("{}", session.token().unwrap_or_default());
            Ok(())
        }
        UiState::Error(message) => Err(MarketError::Api(ApiError::Rejected(message))),
        UiState::Idle | UiState::Loading => Err(MarketError::Api(ApiError::Rejected(
            "login did not complete".to_string(),
        ))),
    }
}
