//! Storefront CLI - browse the product catalog from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{auth, config, list, product, products};
use storefront_core::services::ListKind;

/// Environment variable holding the log filter (e.g. `SF_LOG=debug`)
const LOG_ENV: &str = "SF_LOG";

/// Storefront - a product catalog in your terminal
#[derive(Parser)]
#[command(name = "sf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Only show products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show product details (requires login)
    Product {
        /// Product ID
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in with the demo account
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and forget the session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the shopping cart (requires login)
    Cart {
        #[command(subcommand)]
        command: Option<list::ListCommands>,
    },

    /// Manage favorites (requires login)
    Favorites {
        #[command(subcommand)]
        command: Option<list::ListCommands>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<config::ConfigCommands>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Products { search, json } => products::run(search.as_deref(), json).await,
        Commands::Product { id, json } => product::run(id, json).await,
        Commands::Login { username, password } => auth::login(username, password).await,
        Commands::Logout => auth::logout(),
        Commands::Whoami { json } => auth::whoami(json),
        Commands::Cart { command } => list::run(ListKind::Cart, command).await,
        Commands::Favorites { command } => list::run(ListKind::Favorites, command).await,
        Commands::Config { command } => config::run(command),
    }
}
