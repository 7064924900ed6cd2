//! recipeshare CLI - runs and maintains the recipe-sharing API
//!
//! - `serve`: run the HTTP API until SIGINT/SIGTERM
//! - `migrate`: create tables and seed rank tiers
//! - `check-db`: verify the database answers

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "recipeshare",
    author,
    version,
    about = "Recipe-sharing REST API over PostgreSQL",
    long_about = "Serve the recipe-sharing API (recipes, steps, images, users, likes, pantries, \
                  locations). Database settings come from DB_* environment variables or a .env file."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and seed rank tiers (idempotent)
    Migrate,
    /// Check that the database is reachable
    CheckDb,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env first so RUST_LOG from the file applies to tracing
    let env_sources = config::load_dotenv();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::log_sources(&env_sources);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate => commands::run_migrate().await,
        Commands::CheckDb => commands::run_check_db().await,
    }
}
