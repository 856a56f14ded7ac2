//! folio CLI - personal website backend
//!
//! Loads `.env` from the working directory, sets up tracing, and dispatches
//! subcommands. The server's pool, notifier, and recorder are created and
//! owned here.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    author,
    version,
    about = "Personal website backend: portfolio, blog, and contact messages"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: could not load .env: {e}");
        }
    }

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
    }
}
