use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use stratum::config::{DatabaseConfig, DatabaseType};
use stratum::database::connect_app_db;
use stratum::records;
use stratum::runner::MigrationRunner;
use stratum::script::{ScriptMigration, ScriptRegistry};

async fn setup(temp_dir: &TempDir) -> Result<(DatabaseConnection, PathBuf)> {
    let config = DatabaseConfig {
        ty: DatabaseType::Sqlite,
        path: Some(
            temp_dir
                .path()
                .join("database.db")
                .to_string_lossy()
                .to_string(),
        ),
        host: None,
        port: None,
        database: None,
        username: None,
        password: None,
    };

    let db = connect_app_db(&config).await?;

    let migrations_dir = temp_dir.path().join("packages/blog/migrations");
    fs::create_dir_all(&migrations_dir)?;

    Ok((db, migrations_dir))
}

async fn table_names(db: &DatabaseConnection) -> Result<Vec<String>> {
    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name".to_string(),
        ))
        .await?;

    let mut names = Vec::new();
    for row in rows {
        names.push(row.try_get::<String>("", "name")?);
    }
    Ok(names)
}

#[tokio::test]
async fn sql_migrations_run_in_filename_order_and_are_tracked() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let (db, migrations_dir) = setup(&temp_dir).await?;

    fs::write(
        migrations_dir.join("002_create_comments.sql"),
        "CREATE TABLE comments (id INTEGER PRIMARY KEY AUTOINCREMENT, post_id INTEGER NOT NULL);",
    )?;
    fs::write(
        migrations_dir.join("001_create_posts.sql"),
        "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL);",
    )?;

    let runner = MigrationRunner::new("blog", &migrations_dir);
    let applied = runner.run_pending(&db).await?;

    assert_eq!(
        applied,
        vec!["001_create_posts.sql", "002_create_comments.sql"]
    );

    let tables = table_names(&db).await?;
    assert!(tables.contains(&"posts".to_string()));
    assert!(tables.contains(&"comments".to_string()));

    let completed = records::completed(&db, "blog").await?;
    assert_eq!(completed.len(), 2);
    assert!(completed.iter().all(|record| record.completed));
    assert!(completed.iter().all(|record| record.completed_at.is_some()));

    Ok(())
}

#[tokio::test]
async fn discovered_files_become_pending_records_without_running() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let (db, migrations_dir) = setup(&temp_dir).await?;

    fs::write(migrations_dir.join("001_create_posts.sql"), "SELECT 1;")?;
    fs::write(migrations_dir.join("002_seed_posts.sql"), "SELECT 1;")?;

    let runner = MigrationRunner::new("blog", &migrations_dir);
    let pending = runner.pending_migrations(&db).await?;

    let filenames: Vec<_> = pending.iter().map(|m| m.filename.as_str()).collect();
    assert_eq!(filenames, vec!["001_create_posts.sql", "002_seed_posts.sql"]);
    assert!(pending.iter().all(|record| !record.completed));

    Ok(())
}

#[tokio::test]
async fn later_runs_pick_up_newly_added_files() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let (db, migrations_dir) = setup(&temp_dir).await?;

    fs::write(
        migrations_dir.join("001_create_posts.sql"),
        "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL);",
    )?;

    let runner = MigrationRunner::new("blog", &migrations_dir);
    assert_eq!(runner.run_pending(&db).await?.len(), 1);

    fs::write(
        migrations_dir.join("002_seed_posts.sql"),
        "INSERT INTO posts (title) VALUES ('hello');",
    )?;

    let applied = runner.run_pending(&db).await?;
    assert_eq!(applied, vec!["002_seed_posts.sql"]);

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT title FROM posts".to_string(),
        ))
        .await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}

struct SeedDefaults;

#[async_trait]
impl ScriptMigration for SeedDefaults {
    fn name(&self) -> &str {
        "SeedDefaults"
    }

    async fn run(&self, db: &DatabaseConnection) -> Result<()> {
        db.execute_unprepared("INSERT INTO settings (key, value) VALUES ('theme', 'dark')")
            .await?;
        Ok(())
    }
}

#[tokio::test]
async fn script_migrations_run_through_the_registry() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let (db, migrations_dir) = setup(&temp_dir).await?;

    fs::write(
        migrations_dir.join("001_create_settings.sql"),
        "CREATE TABLE settings (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
    )?;
    fs::write(migrations_dir.join("002_seed_defaults.rs"), "")?;

    let mut scripts = ScriptRegistry::new();
    scripts.register(Box::new(SeedDefaults));

    let runner = MigrationRunner::new("blog", &migrations_dir).with_scripts(scripts);
    let applied = runner.run_pending(&db).await?;

    assert_eq!(
        applied,
        vec!["001_create_settings.sql", "002_seed_defaults.rs"]
    );

    let rows = db
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT value FROM settings WHERE key = 'theme'".to_string(),
        ))
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].try_get::<String>("", "value")?, "dark");

    Ok(())
}

#[tokio::test]
async fn packages_track_their_migrations_independently() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let (db, blog_dir) = setup(&temp_dir).await?;

    let shop_dir = temp_dir.path().join("packages/shop/migrations");
    fs::create_dir_all(&shop_dir)?;

    fs::write(
        blog_dir.join("001_init.sql"),
        "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT);",
    )?;
    fs::write(
        shop_dir.join("001_init.sql"),
        "CREATE TABLE orders (id INTEGER PRIMARY KEY AUTOINCREMENT);",
    )?;

    MigrationRunner::new("blog", &blog_dir).run_pending(&db).await?;

    let shop_pending = records::pending(&db, "shop").await;
    assert!(shop_pending?.is_empty());

    MigrationRunner::new("shop", &shop_dir).run_pending(&db).await?;

    assert_eq!(records::completed(&db, "blog").await?.len(), 1);
    assert_eq!(records::completed(&db, "shop").await?.len(), 1);

    Ok(())
}
