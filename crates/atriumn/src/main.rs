//! Atriumn - command-line client for the Atriumn AI orchestration service.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{config, recommend, run, traits};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Atriumn - run AI tasks on the Atriumn orchestration service
#[derive(Parser)]
#[command(name = "atriumn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as compact JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API key (default: ATRIUMN_API_KEY, ATRIUMN_AI_API_KEY, API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Service URL (default: ATRIUMN_API_URL, ATRIUMN_BASE_URL, https://api.atriumn.ai)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Wire protocol
    #[arg(long, global = true, value_enum, default_value = "tasks")]
    pub protocol: commands::ProtocolArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an arbitrary task
    Run(run::RunArgs),

    /// Ask for a model recommendation
    RecommendModel(recommend::RecommendArgs),

    /// Extract traits from a story
    ExtractTraits(traits::TraitsArgs),

    /// Show the resolved configuration
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results
    let filter = if cli.verbose {
        "atriumn=debug,atriumn_client=debug,info"
    } else {
        "atriumn=info,atriumn_client=warn,warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let ctx = commands::Context {
        api_key: cli.api_key,
        base_url: cli.base_url,
        timeout: cli.timeout,
        protocol: cli.protocol,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Run(args) => run::run(args, &ctx).await,
        Commands::RecommendModel(args) => recommend::run(args, &ctx).await,
        Commands::ExtractTraits(args) => traits::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
