use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(RevenueEvents::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(RevenueEvents::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(RevenueEvents::DealId).string().not_null())
          .col(
            ColumnDef::new(RevenueEvents::GrossCents).big_integer().not_null(),
          )
          .col(ColumnDef::new(RevenueEvents::FeeCents).big_integer().not_null())
          .col(ColumnDef::new(RevenueEvents::NetCents).big_integer().not_null())
          .col(
            ColumnDef::new(RevenueEvents::ProducerCents)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(RevenueEvents::PlatformCents)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(RevenueEvents::NetConsistent).boolean().not_null(),
          )
          .col(ColumnDef::new(RevenueEvents::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_revenue_events_deal")
          .table(RevenueEvents::Table)
          .col(RevenueEvents::DealId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(RevenueEvents::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum RevenueEvents {
  Table,
  Id,
  DealId,
  GrossCents,
  FeeCents,
  NetCents,
  ProducerCents,
  PlatformCents,
  NetConsistent,
  CreatedAt,
}
