use crate::config::{DatabaseConfig, DatabaseType};
use crate::database::connect_app_db;
use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn test_database_config(db_path: &Path) -> DatabaseConfig {
    DatabaseConfig {
        ty: DatabaseType::Sqlite,
        path: Some(db_path.to_string_lossy().to_string()),
        host: None,
        port: None,
        database: None,
        username: None,
        password: None,
    }
}

pub async fn setup_test_db(temp_dir: &TempDir) -> Result<DatabaseConnection> {
    let config = test_database_config(&temp_dir.path().join("test.db"));
    connect_app_db(&config).await
}

/// Lays out a minimal project in the temp directory. The database path is
/// absolute so tests do not depend on the process working directory.
pub fn setup_test_project(temp_dir: &TempDir, name: &str) -> Result<()> {
    let project_path = temp_dir.path();

    fs::create_dir_all(project_path.join("packages"))?;
    fs::write(
        project_path.join("project.yml"),
        format!(
            r#"name: {name}

database:
  type: sqlite
  path: {}

packages:
  path: ./packages
"#,
            project_path.join("database.db").display()
        ),
    )?;

    Ok(())
}

pub fn write_package_migration(
    project_root: &Path,
    package: &str,
    filename: &str,
    contents: &str,
) -> Result<()> {
    let dir = project_root
        .join("packages")
        .join(package)
        .join("migrations");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(filename), contents)?;

    Ok(())
}

pub async fn query_strings(
    db: &DatabaseConnection,
    sql: &str,
    column: &str,
) -> Result<Vec<String>> {
    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;

    let mut values = Vec::new();
    for row in rows {
        values.push(row.try_get::<String>("", column)?);
    }

    Ok(values)
}
