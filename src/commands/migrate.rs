use anyhow::Result;

use crate::commands::validate_name;
use crate::config::Config;
use crate::database::connect_app_db;
use crate::runner::MigrationRunner;
use crate::workspace::ensure_project_directory;

/// Runs any outstanding migrations for a package. Scripted migrations are
/// only reachable through the library API; the CLI executes SQL files.
pub async fn execute_migrate(package: &str) -> Result<()> {
    validate_name(package)?;

    let project_root = ensure_project_directory()?;
    let config = Config::load_from_directory(&project_root)?;

    let migrations_dir = config.migrations_dir(&project_root, package);
    if !migrations_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "Package '{package}' has no migrations directory at {}",
            migrations_dir.display()
        ));
    }

    let db = connect_app_db(&config.database).await?;

    println!("Running migrations for package '{package}'");

    let runner = MigrationRunner::new(package, migrations_dir);
    let pending = runner.pending_migrations(&db).await?;

    if pending.is_empty() {
        println!("No pending migrations.");
        return Ok(());
    }

    for record in pending {
        println!("Running {}", record.filename);
        if runner.run_migration(&db, record).await? {
            println!("Complete");
        } else {
            println!("Skipped (empty migration file)");
        }
    }

    println!("Migrations complete");
    Ok(())
}
