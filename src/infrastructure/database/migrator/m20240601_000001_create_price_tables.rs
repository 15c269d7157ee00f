//! Create price_tables table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceTables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceTables::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceTables::Name).string().not_null())
                    .col(
                        ColumnDef::new(PriceTables::ToleranceMinutes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PriceTables::FlatUntilMinutes).big_integer())
                    .col(ColumnDef::new(PriceTables::FlatUntilValue).decimal_len(12, 2))
                    .col(ColumnDef::new(PriceTables::IncrementalFromMinutes).big_integer())
                    .col(ColumnDef::new(PriceTables::IncrementalEveryMinutes).big_integer())
                    .col(ColumnDef::new(PriceTables::IncrementalAddValue).decimal_len(12, 2))
                    .col(ColumnDef::new(PriceTables::CapPeriodMinutes).big_integer())
                    .col(ColumnDef::new(PriceTables::CapMaxValue).decimal_len(12, 2))
                    .col(
                        ColumnDef::new(PriceTables::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceTables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PriceTables {
    Table,
    Id,
    Name,
    ToleranceMinutes,
    FlatUntilMinutes,
    FlatUntilValue,
    IncrementalFromMinutes,
    IncrementalEveryMinutes,
    IncrementalAddValue,
    CapPeriodMinutes,
    CapMaxValue,
    SyncedAt,
}
