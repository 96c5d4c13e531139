use anyhow::Result;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::path::Path;

use crate::commands::validate_name;
use crate::config::Config;
use crate::database::connect_app_db;
use crate::discovery;
use crate::records;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub package: String,
    pub completed: Vec<CompletedMigration>,
    pub pending: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletedMigration {
    pub filename: String,
    pub completed_at: Option<chrono::NaiveDateTime>,
}

pub async fn execute_status(package: &str, json: bool) -> Result<()> {
    validate_name(package)?;

    let project_root = crate::workspace::ensure_project_directory()?;
    let config = Config::load_from_directory(&project_root)?;
    let db = connect_app_db(&config.database).await?;

    let report = build_status_report(&db, &config, &project_root, package).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.completed.is_empty() && report.pending.is_empty() {
        println!("No migrations found for package '{package}'");
        return Ok(());
    }

    println!("Migrations for package '{package}':");
    for migration in &report.completed {
        match &migration.completed_at {
            Some(at) => println!("  [x] {} (completed {at})", migration.filename),
            None => println!("  [x] {}", migration.filename),
        }
    }
    for filename in &report.pending {
        println!("  [ ] {filename}");
    }

    Ok(())
}

/// Records any new migration files first, so the report reflects what a
/// migrate run would pick up.
pub async fn build_status_report(
    db: &DatabaseConnection,
    config: &Config,
    project_root: &Path,
    package: &str,
) -> Result<StatusReport> {
    let migrations_dir = config.migrations_dir(project_root, package);
    discovery::record_new_migrations(db, package, &migrations_dir).await?;

    let completed = records::completed(db, package)
        .await?
        .into_iter()
        .map(|record| CompletedMigration {
            filename: record.filename,
            completed_at: record.completed_at,
        })
        .collect();

    let pending = records::pending(db, package)
        .await?
        .into_iter()
        .map(|record| record.filename)
        .collect();

    Ok(StatusReport {
        package: package.to_string(),
        completed,
        pending,
    })
}
