use crate::{entity::payout_destination, prelude::*, sv};

pub struct Destination<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Destination<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Stores a partner's payout account. Any change resets verification.
  pub async fn upsert(
    &self,
    partner_id: i32,
    account_ref: &str,
  ) -> Result<payout_destination::Model> {
    if account_ref.trim().is_empty() {
      return Err(Error::InvalidArgs("Account reference is required".into()));
    }

    sv::Partner::new(self.db).by_id(partner_id).await?;

    let now = Utc::now().naive_utc();
    let existing = payout_destination::Entity::find_by_id(partner_id)
      .one(self.db)
      .await?;

    let destination = match existing {
      Some(existing) => {
        payout_destination::ActiveModel {
          account_ref: Set(account_ref.to_string()),
          verified: Set(false),
          updated_at: Set(now),
          ..existing.into()
        }
        .update(self.db)
        .await?
      }
      None => {
        payout_destination::ActiveModel {
          partner_id: Set(partner_id),
          account_ref: Set(account_ref.to_string()),
          verified: Set(false),
          updated_at: Set(now),
        }
        .insert(self.db)
        .await?
      }
    };

    Ok(destination)
  }

  pub async fn verify(
    &self,
    partner_id: i32,
  ) -> Result<payout_destination::Model> {
    let destination = payout_destination::Entity::find_by_id(partner_id)
      .one(self.db)
      .await?
      .ok_or(Error::DestinationUnverified)?;

    Ok(
      payout_destination::ActiveModel {
        verified: Set(true),
        updated_at: Set(Utc::now().naive_utc()),
        ..destination.into()
      }
      .update(self.db)
      .await?,
    )
  }

  pub async fn get(
    &self,
    partner_id: i32,
  ) -> Result<Option<payout_destination::Model>> {
    Ok(
      payout_destination::Entity::find_by_id(partner_id).one(self.db).await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::test_db;

  #[tokio::test]
  async fn test_change_resets_verification() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;
    let sv = Destination::new(&db);

    assert!(!sv.upsert(partner, "acct_1").await.unwrap().verified);
    assert!(sv.verify(partner).await.unwrap().verified);

    let changed = sv.upsert(partner, "acct_2").await.unwrap();
    assert_eq!(changed.account_ref, "acct_2");
    assert!(!changed.verified);
    assert!(!sv.get(partner).await.unwrap().unwrap().verified);
  }

  #[tokio::test]
  async fn test_verify_without_destination() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;

    assert!(matches!(
      Destination::new(&db).verify(partner).await,
      Err(Error::DestinationUnverified)
    ));
  }
}
