use anyhow::Result;
use clap::{Parser, Subcommand};
use ownabee_core::transfer::SourceAction;
use ownabee_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::PortalContext;

#[derive(Parser)]
#[command(name = "ownabee")]
#[command(about = "Ownabee Portal CLI - manage institutions and transfer portfolios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and PIN
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        pin: String,
    },
    /// Sign in with a Google ID token
    LoginGoogle {
        #[arg(long)]
        credential: String,
    },
    /// Show the signed-in user and their institutions
    Whoami,
    /// Sign out and forget the stored session
    Logout,
    /// List institutions visible to the signed-in user
    Institutions,
    /// List shared tablets of an institution
    Tablets { institution: String },
    /// List parents of an institution
    Parents { institution: String },
    /// List portfolios of a profile
    Portfolios { profile: String },
    /// Copy or move portfolios from a shared tablet to a parent
    Transfer {
        #[arg(long)]
        institution: String,
        #[arg(long)]
        tablet: String,
        #[arg(long)]
        parent: String,
        /// Portfolio id to transfer (repeatable)
        #[arg(long = "portfolio")]
        portfolios: Vec<String>,
        /// Transfer every portfolio on the tablet
        #[arg(long, conflicts_with = "portfolios")]
        all: bool,
        /// KEEP copies, DELETE moves
        #[arg(long, default_value = "keep")]
        action: SourceAction,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigService::new()?.get_config()?;
    init_tracing(&config.log_level);

    let ctx = PortalContext::open(&config).await?;

    match cli.command {
        Commands::Login { email, pin } => commands::auth::login(&ctx, &email, &pin).await?,
        Commands::LoginGoogle { credential } => {
            commands::auth::login_google(&ctx, &credential).await?
        }
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Institutions => commands::list::institutions(&ctx).await?,
        Commands::Tablets { institution } => commands::list::tablets(&ctx, &institution).await?,
        Commands::Parents { institution } => commands::list::parents(&ctx, &institution).await?,
        Commands::Portfolios { profile } => commands::list::portfolios(&ctx, &profile).await?,
        Commands::Transfer {
            institution,
            tablet,
            parent,
            portfolios,
            all,
            action,
        } => {
            let selection = commands::transfer::TransferArgs {
                institution,
                tablet,
                parent,
                portfolios,
                all,
                action,
            };
            commands::transfer::run(&ctx, selection).await?
        }
    }

    Ok(())
}
