use crate::database::entities::migrations;
use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Looks up the tracking record for a migration file, creating a pending one
/// if the file has never been seen for this package.
pub async fn get_or_create(
    db: &DatabaseConnection,
    package: &str,
    filename: &str,
) -> Result<migrations::Model> {
    let existing = migrations::Entity::find()
        .filter(migrations::Column::Package.eq(package))
        .filter(migrations::Column::Filename.eq(filename))
        .one(db)
        .await
        .with_context(|| format!("Failed to look up migration record for {filename}"))?;

    if let Some(record) = existing {
        return Ok(record);
    }

    let record = migrations::ActiveModel {
        package: Set(package.to_string()),
        filename: Set(filename.to_string()),
        completed: Set(false),
        ..Default::default()
    };

    record
        .insert(db)
        .await
        .with_context(|| format!("Failed to record migration {filename} for package {package}"))
}

pub async fn all(db: &DatabaseConnection, package: &str) -> Result<Vec<migrations::Model>> {
    migrations::Entity::find()
        .filter(migrations::Column::Package.eq(package))
        .order_by_asc(migrations::Column::Filename)
        .all(db)
        .await
        .with_context(|| format!("Failed to load migration records for package {package}"))
}

pub async fn completed(db: &DatabaseConnection, package: &str) -> Result<Vec<migrations::Model>> {
    migrations::Entity::find()
        .filter(migrations::Column::Package.eq(package))
        .filter(migrations::Column::Completed.eq(true))
        .order_by_asc(migrations::Column::Filename)
        .all(db)
        .await
        .with_context(|| format!("Failed to load completed migrations for package {package}"))
}

/// Pending migrations for a package, ordered by filename ascending. This is
/// the execution order.
pub async fn pending(db: &DatabaseConnection, package: &str) -> Result<Vec<migrations::Model>> {
    migrations::Entity::find()
        .filter(migrations::Column::Package.eq(package))
        .filter(migrations::Column::Completed.eq(false))
        .order_by_asc(migrations::Column::Filename)
        .all(db)
        .await
        .with_context(|| format!("Failed to load pending migrations for package {package}"))
}

pub async fn mark_completed(
    db: &DatabaseConnection,
    record: migrations::Model,
) -> Result<migrations::Model> {
    let filename = record.filename.clone();

    let mut active: migrations::ActiveModel = record.into();
    active.completed = Set(true);
    active.completed_at = Set(Some(Utc::now().naive_utc()));

    active
        .update(db)
        .await
        .with_context(|| format!("Failed to mark migration {filename} as completed"))
}
