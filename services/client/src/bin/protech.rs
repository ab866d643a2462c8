//! services/client/src/bin/protech.rs

use client_lib::{
    commands::{dispatch, Args, Outcome},
    config::Config,
    error::ClientError,
    state::AppState,
};
use protech_core::routes::Route;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Using project API at {}", config.api_base_url);

    // --- 2. Build the Shared AppState ---
    let state = AppState::from_config(config)?;

    // --- 3. Run the Requested Command ---
    let args = Args::new(std::env::args().skip(1).collect());
    let outcome = match dispatch(&state, &args).await {
        Ok(outcome) => outcome,
        Err(ClientError::Usage(message)) => {
            eprintln!("{}", message);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e),
    };

    Ok(match outcome {
        Outcome::Done => ExitCode::SUCCESS,
        Outcome::Invalid(_) => ExitCode::from(2),
        Outcome::Navigate(Route::Login) => {
            eprintln!("Not signed in. Continue at {}", Route::Login.path());
            ExitCode::FAILURE
        }
        Outcome::Navigate(Route::Error) => {
            eprintln!("Something went wrong. Please try again later.");
            ExitCode::FAILURE
        }
        Outcome::Navigate(route) => {
            println!("-> {}", route.path());
            ExitCode::SUCCESS
        }
    })
}
