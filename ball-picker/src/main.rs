//! BALL Lottery Picker CLI
//!
//! Draws a balance-weighted winner among the holders of a token.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ball_picker::commands::{self, draw::SeedSource};
use ball_picker::config::{default_config_path, Config};

#[derive(Parser)]
#[command(name = "ball-picker")]
#[command(about = "Weighted lottery among token holders")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the RPC endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Override the token mint
    #[arg(long, global = true)]
    mint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the holder summary
    Holders {
        /// Maximum number of holders to list
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Draw a winner
    Draw {
        /// Derive the draw seed from a public phrase
        #[arg(long, conflicts_with = "seed_hex")]
        seed: Option<String>,

        /// Use an exact 32-byte seed given as hex
        #[arg(long)]
        seed_hex: Option<String>,

        /// Skip the ticket lookup prompt after the draw
        #[arg(long)]
        no_interactive: bool,
    },

    /// Show who owns a ticket
    Lookup {
        /// Ticket number
        ticket: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    let mut config = match &cli.command {
        Commands::Init { force } if *force || !Config::exists(&config_path) => Config::default(),
        _ => Config::load(&config_path)?,
    };
    if let Some(endpoint) = cli.endpoint {
        config.rpc_endpoint = endpoint;
    }
    if let Some(mint) = cli.mint {
        config.token_mint = mint;
    }

    match cli.command {
        Commands::Init { force } => commands::init::run(&config_path, &config, force).await,
        Commands::Holders { limit } => commands::holders::run(&config, limit).await,
        Commands::Draw {
            seed,
            seed_hex,
            no_interactive,
        } => {
            let seed = SeedSource::from_flags(seed, seed_hex);
            commands::draw::run(&config, seed, !no_interactive).await
        }
        Commands::Lookup { ticket } => commands::lookup::run(&config, ticket).await,
    }
}
