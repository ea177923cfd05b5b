use sea_orm_migration::prelude::*;

use super::{
  m20261001_000001_create_partners_and_dancers::Partners,
  m20261001_000004_create_payouts::Payouts,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(PartnerCommissions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PartnerCommissions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(PartnerCommissions::PartnerId)
              .integer()
              .not_null(),
          )
          .col(ColumnDef::new(PartnerCommissions::PayoutId).string().not_null())
          .col(
            ColumnDef::new(PartnerCommissions::DancerId)
              .integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(PartnerCommissions::PayoutAmountCents)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(PartnerCommissions::RateBps).integer().not_null())
          .col(
            ColumnDef::new(PartnerCommissions::AmountCents)
              .big_integer()
              .not_null(),
          )
          .col(
            ColumnDef::new(PartnerCommissions::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(PartnerCommissions::TransferRef).string().null())
          .col(
            ColumnDef::new(PartnerCommissions::CreatedAt)
              .date_time()
              .not_null(),
          )
          .col(ColumnDef::new(PartnerCommissions::PaidAt).date_time().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_partner_commissions_partner")
              .from(PartnerCommissions::Table, PartnerCommissions::PartnerId)
              .to(Partners::Table, Partners::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_partner_commissions_payout")
              .from(PartnerCommissions::Table, PartnerCommissions::PayoutId)
              .to(Payouts::Table, Payouts::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // At most one commission per payout, enforced here rather than in code
    manager
      .create_index(
        Index::create()
          .name("idx_partner_commissions_payout")
          .table(PartnerCommissions::Table)
          .col(PartnerCommissions::PayoutId)
          .unique()
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_partner_commissions_partner")
          .table(PartnerCommissions::Table)
          .col(PartnerCommissions::PartnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PartnerCommissions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum PartnerCommissions {
  Table,
  Id,
  PartnerId,
  PayoutId,
  DancerId,
  PayoutAmountCents,
  RateBps,
  AmountCents,
  Status,
  TransferRef,
  CreatedAt,
  PaidAt,
}
