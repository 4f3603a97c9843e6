use std::process::ExitCode;

use clap::Parser;
use portier::SqliteRepositoryProvider;
use portier::config::DEFAULT_DATABASE_URL;
use portier_core::RepositoryProvider;

/// Command line interface for Portier
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    db_url: String,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(clap::Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Check that the database is reachable
    Health,
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => migrate(&cli.db_url).await,
        Commands::Health => health(&cli.db_url).await,
        Commands::Version => {
            println!("Portier v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn migrate(db_url: &str) -> Result<(), portier::Error> {
    println!("Running migrations...");
    let repositories = SqliteRepositoryProvider::connect(db_url).await?;
    repositories.migrate().await?;
    println!("Migrations applied");
    Ok(())
}

async fn health(db_url: &str) -> Result<(), portier::Error> {
    let repositories = SqliteRepositoryProvider::connect(db_url).await?;
    repositories.health_check().await?;
    println!("ok");
    Ok(())
}
