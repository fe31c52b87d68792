mod commands;
mod config;
mod display;
mod error;
mod github;
mod report;

use clap::{Parser, Subcommand};
use commands::create::CreateArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "invitation-report",
    version,
    about = "Report pending and failed GitHub organization invitations as CSV"
)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show verbose output (rate limits, debug info)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the invitation report and commit it to a repository
    Create(CreateArgs),
    /// Print the invitations without committing anything
    Preview {
        /// Report on a single organization
        #[arg(long)]
        org: Option<String>,
        /// Report on every organization of an enterprise
        #[arg(long)]
        enterprise: Option<String>,
        /// GitHub token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// GitHub API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,invitation_report={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Create(args) => commands::create::run(args, cli.json, cli.verbose).await,
        Commands::Preview {
            org,
            enterprise,
            token,
            api_url,
        } => commands::preview::run(org, enterprise, token, api_url, cli.json, cli.verbose).await,
    };

    if let Err(e) = result {
        display::error(&e.to_string());
        std::process::exit(1);
    }
}
