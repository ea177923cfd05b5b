use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_partners_and_dancers::Dancers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Payouts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Payouts::Id).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(Payouts::DancerId).integer().not_null())
          .col(ColumnDef::new(Payouts::AmountCents).big_integer().not_null())
          .col(ColumnDef::new(Payouts::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_payouts_dancer")
              .from(Payouts::Table, Payouts::DancerId)
              .to(Dancers::Table, Dancers::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_payouts_dancer")
          .table(Payouts::Table)
          .col(Payouts::DancerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Payouts::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Payouts {
  Table,
  Id,
  DancerId,
  AmountCents,
  CreatedAt,
}
