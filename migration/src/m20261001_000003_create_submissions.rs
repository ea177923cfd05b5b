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
          .table(Submissions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Submissions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Submissions::DancerId).integer().not_null())
          .col(ColumnDef::new(Submissions::VideoUrl).string().not_null())
          .col(
            ColumnDef::new(Submissions::ReviewStatus)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Submissions::SubmittedAt).date_time().not_null())
          .col(ColumnDef::new(Submissions::ReviewedAt).date_time().null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_submissions_dancer")
              .from(Submissions::Table, Submissions::DancerId)
              .to(Dancers::Table, Dancers::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // Serves the trailing-window activity lookup
    manager
      .create_index(
        Index::create()
          .name("idx_submissions_activity")
          .table(Submissions::Table)
          .col(Submissions::DancerId)
          .col(Submissions::ReviewStatus)
          .col(Submissions::SubmittedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Submissions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Submissions {
  Table,
  Id,
  DancerId,
  VideoUrl,
  ReviewStatus,
  SubmittedAt,
  ReviewedAt,
}
