use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_partners_and_dancers::Partners;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PayoutDestinations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PayoutDestinations::PartnerId)
              .integer()
              .not_null()
              .primary_key(),
          )
          .col(
            ColumnDef::new(PayoutDestinations::AccountRef).string().not_null(),
          )
          .col(
            ColumnDef::new(PayoutDestinations::Verified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(PayoutDestinations::UpdatedAt)
              .date_time()
              .not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_payout_destinations_partner")
              .from(PayoutDestinations::Table, PayoutDestinations::PartnerId)
              .to(Partners::Table, Partners::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PayoutDestinations::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PayoutDestinations {
  Table,
  PartnerId,
  AccountRef,
  Verified,
  UpdatedAt,
}
