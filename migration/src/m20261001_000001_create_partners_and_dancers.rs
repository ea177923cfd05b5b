use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Partners::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Partners::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Partners::Name).string().not_null())
          .col(ColumnDef::new(Partners::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Dancers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Dancers::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Dancers::Name).string().not_null())
          .col(ColumnDef::new(Dancers::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Dancers::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Partners::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Partners {
  Table,
  Id,
  Name,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum Dancers {
  Table,
  Id,
  Name,
  CreatedAt,
}
