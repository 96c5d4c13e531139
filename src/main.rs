use anyhow::Result;
use clap::{Parser, Subcommand};
use stratum::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Stratum project
    Init {
        /// Project name
        name: String,
    },
    /// Create a new migration file for a package
    New {
        /// Package handle
        package: String,
        /// Migration name
        name: String,
    },
    /// Run any outstanding migrations for a package
    Migrate {
        /// Handle of the package to migrate
        #[arg(short, long)]
        package: String,
    },
    /// Show completed and pending migrations for a package
    Status {
        /// Handle of the package to inspect
        #[arg(short, long)]
        package: String,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Init { name } => {
            let current_dir = std::env::current_dir()?;
            commands::init::execute_init(name, &current_dir)
        }
        Commands::New { package, name } => commands::new::execute_new(package, name),
        Commands::Migrate { package } => commands::migrate::execute_migrate(package).await,
        Commands::Status { package, json } => commands::status::execute_status(package, *json).await,
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}
