use crate::records;
use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Filenames of every migration file in a package's migrations directory,
/// sorted ascending. A missing directory yields an empty list.
pub fn migration_filenames(migrations_dir: &Path) -> Result<Vec<String>> {
    let mut filenames = Vec::new();

    if !migrations_dir.is_dir() {
        return Ok(filenames);
    }

    for entry in fs::read_dir(migrations_dir).with_context(|| {
        format!(
            "Failed to read migrations directory {}",
            migrations_dir.display()
        )
    })? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        if filename.starts_with('.') {
            continue;
        }

        filenames.push(filename);
    }

    filenames.sort();
    Ok(filenames)
}

/// Diffs the files on disk against the recorded filenames and creates a
/// pending record for each new one. Returns the newly recorded filenames.
pub async fn record_new_migrations(
    db: &DatabaseConnection,
    package: &str,
    migrations_dir: &Path,
) -> Result<Vec<String>> {
    let on_disk = migration_filenames(migrations_dir)?;

    let recorded: HashSet<String> = records::all(db, package)
        .await?
        .into_iter()
        .map(|record| record.filename)
        .collect();

    let mut new_files = Vec::new();
    for filename in on_disk {
        if recorded.contains(&filename) {
            continue;
        }

        records::get_or_create(db, package, &filename).await?;
        tracing::info!("Recorded new migration {filename} for package {package}");
        new_files.push(filename);
    }

    Ok(new_files)
}
