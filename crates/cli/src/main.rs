//! Boutique CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Create the catalog and session tables
//! boutique-cli migrate
//!
//! # Insert the demo products into an empty catalog
//! boutique-cli seed
//!
//! # Insert them even if the catalog already has products
//! boutique-cli seed --force
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string, falls back
//!   to `DATABASE_URL`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "boutique-cli")]
#[command(author, version, about = "Boutique CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (catalog and session store)
    Migrate,
    /// Seed the catalog with demo products
    Seed {
        /// Insert even when the catalog already has products
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await,
        Commands::Seed { force } => commands::seed::demo_catalog(force).await,
    }
}
