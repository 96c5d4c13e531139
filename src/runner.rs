use crate::database::entities::migrations;
use crate::discovery;
use crate::records;
use crate::script::{self, ScriptRegistry};
use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use std::fs;
use std::path::PathBuf;

/// Orchestrates migration discovery and sequential execution for a single
/// package.
pub struct MigrationRunner {
    package: String,
    migrations_dir: PathBuf,
    scripts: ScriptRegistry,
}

impl MigrationRunner {
    pub fn new(package: impl Into<String>, migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            migrations_dir: migrations_dir.into(),
            scripts: ScriptRegistry::new(),
        }
    }

    /// Attaches the scripted migrations compiled into the embedding
    /// application. Migration files that are not plain SQL are resolved
    /// against this registry.
    pub fn with_scripts(mut self, scripts: ScriptRegistry) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Records any new migration files and returns the pending records in
    /// execution order.
    pub async fn pending_migrations(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Vec<migrations::Model>> {
        discovery::record_new_migrations(db, &self.package, &self.migrations_dir).await?;
        records::pending(db, &self.package).await
    }

    /// Runs every pending migration in filename order. Execution stops at the
    /// first failure; the failing migration stays pending. Returns the
    /// filenames that were applied.
    pub async fn run_pending(&self, db: &DatabaseConnection) -> Result<Vec<String>> {
        let pending = self.pending_migrations(db).await?;

        let mut applied = Vec::new();
        for record in pending {
            let filename = record.filename.clone();
            tracing::info!("Running migration {filename}");
            if self.run_migration(db, record).await? {
                applied.push(filename);
            }
        }

        Ok(applied)
    }

    /// Runs a single migration and marks it completed. Returns false when the
    /// file was skipped (empty SQL file); the record is left pending.
    pub async fn run_migration(
        &self,
        db: &DatabaseConnection,
        record: migrations::Model,
    ) -> Result<bool> {
        let path = self.migrations_dir.join(&record.filename);

        if record.filename.ends_with(".sql") {
            let sql = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read migration file {}", path.display()))?;

            if sql.trim().is_empty() {
                tracing::warn!("Skipping empty migration file {}", record.filename);
                return Ok(false);
            }

            db.execute_unprepared(&sql)
                .await
                .with_context(|| format!("Migration {} failed", record.filename))?;
        } else {
            let name = script::script_name(&record.filename)?;
            let migration = self.scripts.get(&name).ok_or_else(|| {
                anyhow::anyhow!(
                    "No script migration named {name} is registered for file {}",
                    record.filename
                )
            })?;

            migration
                .run(db)
                .await
                .with_context(|| format!("Migration {} failed", record.filename))?;
        }

        records::mark_completed(db, record).await?;
        Ok(true)
    }
}
