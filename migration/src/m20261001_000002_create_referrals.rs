use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_partners_and_dancers::{Dancers, Partners};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    // One row per dancer: a dancer has at most one referring partner
    manager
      .create_table(
        Table::create()
          .table(Referrals::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Referrals::DancerId)
              .integer()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(Referrals::PartnerId).integer().not_null())
          .col(ColumnDef::new(Referrals::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_referrals_dancer")
              .from(Referrals::Table, Referrals::DancerId)
              .to(Dancers::Table, Dancers::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_referrals_partner")
              .from(Referrals::Table, Referrals::PartnerId)
              .to(Partners::Table, Partners::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_referrals_partner")
          .table(Referrals::Table)
          .col(Referrals::PartnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Referrals::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Referrals {
  Table,
  DancerId,
  PartnerId,
  CreatedAt,
}
