//! itinera -- client for the travel-mobility planner.
//!
//! Thin command-line surface over [`itinera_core::AppStore`]: onboarding,
//! plan inspection and refresh, assistant chat, and checklist tracking.

mod chat_cmd;
mod check_cmd;
mod config;
mod onboard_cmd;
mod plan_cmd;
mod status_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

use itinera_core::{AppStore, FileStorage, HttpApiClient};

use config::ItineraConfig;

#[derive(Parser)]
#[command(name = "itinera", about = "Travel-mobility plan client")]
struct Cli {
    /// API base URL (overrides ITINERA_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the itinera config file
    Init {
        /// API base URL to record
        #[arg(long, default_value = config::DEFAULT_API_URL)]
        api_url: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Capture your travel profile and generate a plan
    Onboard(onboard_cmd::OnboardArgs),
    /// Inspect or refresh the plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Talk to the assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Track checklist completion
    Check {
        #[command(subcommand)]
        command: CheckCommands,
    },
    /// Show profile, plan, and sync state
    Status,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Render the current plan (refreshing it first if stale)
    Show,
    /// Force a plan refresh
    Refresh,
}

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Send a message
    Send { message: String },
    /// Retry the last failed message
    Retry,
    /// Print the transcript
    History,
    /// Reset the conversation
    Clear,
}

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Toggle completion for a checklist item id
    Toggle { id: String },
    /// List checklist items with completion marks
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Init only writes the config file; it must not require a working
    // API or touch the store.
    if let Commands::Init { api_url, force } = &cli.command {
        return config::run_init(api_url, *force);
    }

    let resolved = ItineraConfig::resolve(cli.api_url.as_deref())?;
    let transport = HttpApiClient::new(&resolved.api_base_url)?;
    let storage = FileStorage::open_default()?;
    let mut store = AppStore::open(Box::new(transport), Box::new(storage));

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Onboard(args) => onboard_cmd::run(&mut store, args).await,
        Commands::Plan { command } => plan_cmd::run(&mut store, command).await,
        Commands::Chat { command } => chat_cmd::run(&mut store, command).await,
        Commands::Check { command } => check_cmd::run(&mut store, command),
        Commands::Status => status_cmd::run(&store),
    }
}
