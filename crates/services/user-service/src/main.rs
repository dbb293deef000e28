//! User Service - command line entry point.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::BootstrapSeeds;
use user_service_lib::config::{StorageKind, UserServiceConfig};
use user_service_lib::open_repository;
use user_service_lib::repository::ProcedureSet;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management core")]
struct Cli {
    /// Override the storage backend (memory | procedures)
    #[arg(long, global = true)]
    storage: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the configured store and ensure the default accounts exist
    Bootstrap,
    /// Validate the configured stored procedure names
    CheckProcedures,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = UserServiceConfig::from_env()?;
    if let Some(storage) = cli.storage {
        config.storage = storage.parse::<StorageKind>()?;
    }

    match cli.command {
        Commands::Bootstrap => {
            let seeds = BootstrapSeeds::standard()?;
            let repo = open_repository(&config, &seeds).await?;

            let admin = repo.default_administrator();
            let user = repo.default_user();
            info!(id = %admin.id(), email = admin.email(), "Default administrator ready");
            info!(id = %user.id(), email = user.email(), "Default user ready");
        }
        Commands::CheckProcedures => {
            let procedures = ProcedureSet::from_config(&config.procedures)?;
            info!(
                create = %procedures.create,
                get = %procedures.get,
                update = %procedures.update,
                delete = %procedures.delete,
                "Procedure names are valid"
            );
        }
    }

    Ok(())
}
