use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;

use crate::commands::validate_name;
use crate::config::Config;
use crate::workspace::ensure_project_directory;

/// Creates a timestamp-prefixed SQL migration file in the package's
/// migrations directory. The timestamp prefix keeps filename order aligned
/// with creation order.
pub fn execute_new(package: &str, name: &str) -> Result<()> {
    validate_name(package)?;
    validate_name(name)?;

    let project_root = ensure_project_directory()?;
    let config = Config::load_from_directory(&project_root)?;

    let migrations_dir = config.migrations_dir(&project_root, package);
    fs::create_dir_all(&migrations_dir)
        .with_context(|| format!("Failed to create {}", migrations_dir.display()))?;

    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let filename = format!("{timestamp}_{name}.sql");
    let path = migrations_dir.join(&filename);

    fs::write(&path, "-- Write the migration SQL for this change here.\n")
        .with_context(|| format!("Failed to create {}", path.display()))?;

    println!("Created migration {}", path.display());
    Ok(())
}
