use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StratumMigrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StratumMigrations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StratumMigrations::Package)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StratumMigrations::Filename)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StratumMigrations::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StratumMigrations::CompletedAt)
                            .date_time()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stratum_migrations_package_filename")
                    .table(StratumMigrations::Table)
                    .col(StratumMigrations::Package)
                    .col(StratumMigrations::Filename)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StratumMigrations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum StratumMigrations {
    #[sea_orm(iden = "__stratum_migrations")]
    Table,
    Id,
    Package,
    Filename,
    Completed,
    CompletedAt,
}
