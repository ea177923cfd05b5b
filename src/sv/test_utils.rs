//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection,
    DbBackend, NotSet, Schema, Set,
  };

  use crate::{
    entity::*,
    prelude::{DateTime, Utc},
  };

  /// Creates an in-memory SQLite database with all required tables
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = [
      schema.create_table_from_entity(partner::Entity),
      schema.create_table_from_entity(dancer::Entity),
      schema.create_table_from_entity(referral::Entity),
      schema.create_table_from_entity(submission::Entity),
      schema.create_table_from_entity(payout::Entity),
      schema.create_table_from_entity(partner_commission::Entity),
      schema.create_table_from_entity(payout_destination::Entity),
      schema.create_table_from_entity(revenue_event::Entity),
    ];

    for stmt in stmts {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  pub async fn partner(db: &DatabaseConnection, name: &str) -> i32 {
    partner::ActiveModel {
      id: NotSet,
      name: Set(name.into()),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  pub async fn dancer(db: &DatabaseConnection, name: &str) -> i32 {
    dancer::ActiveModel {
      id: NotSet,
      name: Set(name.into()),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  pub async fn submission(
    db: &DatabaseConnection,
    dancer_id: i32,
    status: ReviewStatus,
    submitted_at: DateTime,
  ) {
    submission::ActiveModel {
      id: NotSet,
      dancer_id: Set(dancer_id),
      video_url: Set(format!("https://videos.example/{dancer_id}")),
      review_status: Set(status),
      submitted_at: Set(submitted_at),
      reviewed_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
  }

  pub async fn verified_destination(db: &DatabaseConnection, partner_id: i32) {
    payout_destination::ActiveModel {
      partner_id: Set(partner_id),
      account_ref: Set(format!("acct_{partner_id}")),
      verified: Set(true),
      updated_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap();
  }
}
