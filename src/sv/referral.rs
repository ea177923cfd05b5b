use sea_orm::QueryTrait;

use crate::{
  entity::{ReviewStatus, dancer, partner, referral, submission},
  prelude::*,
};

/// Trailing window in which an approved submission makes a dancer active.
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

pub struct Referral<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Referral<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Record that `dancer_id` signed up under `partner_id`.
  /// Referrals are immutable: a dancer can be referred only once.
  pub async fn refer(
    &self,
    partner_id: i32,
    dancer_id: i32,
  ) -> Result<referral::Model> {
    let txn = self.db.begin().await?;

    partner::Entity::find_by_id(partner_id)
      .one(&txn)
      .await?
      .ok_or(Error::PartnerNotFound)?;

    dancer::Entity::find_by_id(dancer_id)
      .one(&txn)
      .await?
      .ok_or(Error::DancerNotFound)?;

    if referral::Entity::find_by_id(dancer_id).one(&txn).await?.is_some() {
      return Err(Error::AlreadyReferred);
    }

    let referral = referral::ActiveModel {
      dancer_id: Set(dancer_id),
      partner_id: Set(partner_id),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(referral)
  }

  pub async fn referrer_of(&self, dancer_id: i32) -> Result<Option<i32>> {
    let referral = referral::Entity::find_by_id(dancer_id).one(self.db).await?;
    Ok(referral.map(|r| r.partner_id))
  }

  pub async fn referred_dancers(&self, partner_id: i32) -> Result<Vec<i32>> {
    referred_dancers(self.db, partner_id).await
  }

  /// Size of the partner's active referred-dancer set, always counting the
  /// dancer whose payout triggered the calculation.
  pub async fn count_active_dancers(
    &self,
    partner_id: i32,
    as_of_payout_dancer_id: i32,
  ) -> Result<u64> {
    count_active_dancers_at(
      self.db,
      partner_id,
      Some(as_of_payout_dancer_id),
      Utc::now().naive_utc(),
    )
    .await
  }

  /// Active referred dancers without a triggering payout.
  pub async fn active_dancers(&self, partner_id: i32) -> Result<u64> {
    count_active_dancers_at(self.db, partner_id, None, Utc::now().naive_utc())
      .await
  }
}

async fn referred_dancers<C: ConnectionTrait>(
  conn: &C,
  partner_id: i32,
) -> Result<Vec<i32>> {
  Ok(
    referral::Entity::find()
      .select_only()
      .column(referral::Column::DancerId)
      .filter(referral::Column::PartnerId.eq(partner_id))
      .into_tuple()
      .all(conn)
      .await?,
  )
}

pub(crate) async fn count_active_dancers_at<C: ConnectionTrait>(
  conn: &C,
  partner_id: i32,
  triggering_dancer_id: Option<i32>,
  now: DateTime,
) -> Result<u64> {
  let any_referral = referral::Entity::find()
    .filter(referral::Column::PartnerId.eq(partner_id))
    .one(conn)
    .await?;
  if any_referral.is_none() {
    return Ok(0);
  }

  let since = now - TimeDelta::days(ACTIVITY_WINDOW_DAYS);

  // Subquery keeps the bound parameter count constant in the referral count
  let referred = referral::Entity::find()
    .select_only()
    .column(referral::Column::DancerId)
    .filter(referral::Column::PartnerId.eq(partner_id))
    .into_query();

  let active: Vec<i32> = submission::Entity::find()
    .select_only()
    .column(submission::Column::DancerId)
    .distinct()
    .filter(submission::Column::DancerId.in_subquery(referred))
    .filter(submission::Column::ReviewStatus.eq(ReviewStatus::Approved))
    .filter(submission::Column::SubmittedAt.gte(since))
    .into_tuple()
    .all(conn)
    .await?;

  // The triggering approval may not be visible to the query yet
  let mut set: HashSet<i32> = active.into_iter().collect();
  set.extend(triggering_dancer_id);

  debug!(
    "Partner {} has {} active referred dancer(s)",
    partner_id,
    set.len()
  );

  Ok(set.len() as u64)
}

#[cfg(test)]
mod tests {
  use sea_orm::{Database, DbBackend, Schema};

  use super::*;
  use crate::sv::test_utils::test_db;

  #[tokio::test]
  async fn test_refer_is_immutable() {
    let db = test_db::setup().await;
    let first = test_db::partner(&db, "First").await;
    let second = test_db::partner(&db, "Second").await;
    let dancer = test_db::dancer(&db, "Ana").await;

    let sv = Referral::new(&db);
    sv.refer(first, dancer).await.unwrap();

    assert!(matches!(
      sv.refer(second, dancer).await,
      Err(Error::AlreadyReferred)
    ));
    assert_eq!(sv.referrer_of(dancer).await.unwrap(), Some(first));
  }

  #[tokio::test]
  async fn test_refer_unknown_partner() {
    let db = test_db::setup().await;
    let dancer = test_db::dancer(&db, "Ana").await;

    assert!(matches!(
      Referral::new(&db).refer(404, dancer).await,
      Err(Error::PartnerNotFound)
    ));
  }

  #[tokio::test]
  async fn test_no_referrals_skips_activity_query() {
    // No submissions table: any activity query would fail
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(partner::Entity),
      schema.create_table_from_entity(dancer::Entity),
      schema.create_table_from_entity(referral::Entity),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    let partner = test_db::partner(&db, "Lonely").await;
    let dancer = test_db::dancer(&db, "Ana").await;

    let sv = Referral::new(&db);
    assert_eq!(sv.count_active_dancers(partner, dancer).await.unwrap(), 0);

    sv.refer(partner, dancer).await.unwrap();
    assert!(sv.count_active_dancers(partner, dancer).await.is_err());
  }

  #[tokio::test]
  async fn test_triggering_dancer_always_counted() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;
    let dancer = test_db::dancer(&db, "Ana").await;
    Referral::new(&db).refer(partner, dancer).await.unwrap();

    let count =
      Referral::new(&db).count_active_dancers(partner, dancer).await.unwrap();
    assert_eq!(count, 1);
  }

  #[tokio::test]
  async fn test_active_window() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;
    let sv = Referral::new(&db);
    let now = Utc::now().naive_utc();

    let recent = test_db::dancer(&db, "Recent").await;
    let edge = test_db::dancer(&db, "Edge").await;
    let stale = test_db::dancer(&db, "Stale").await;
    let rejected = test_db::dancer(&db, "Rejected").await;
    let trigger = test_db::dancer(&db, "Trigger").await;
    for dancer in [recent, edge, stale, rejected, trigger] {
      sv.refer(partner, dancer).await.unwrap();
    }

    let window = TimeDelta::days(ACTIVITY_WINDOW_DAYS);
    test_db::submission(&db, recent, ReviewStatus::Approved, now).await;
    test_db::submission(&db, recent, ReviewStatus::Approved, now).await;
    test_db::submission(&db, edge, ReviewStatus::Approved, now - window).await;
    test_db::submission(
      &db,
      stale,
      ReviewStatus::Approved,
      now - window - TimeDelta::seconds(1),
    )
    .await;
    test_db::submission(&db, rejected, ReviewStatus::Rejected, now).await;

    // recent + edge (inclusive bound) + trigger
    let count =
      count_active_dancers_at(&db, partner, Some(trigger), now).await.unwrap();
    assert_eq!(count, 3);

    // Already active trigger is not counted twice
    let count =
      count_active_dancers_at(&db, partner, Some(recent), now).await.unwrap();
    assert_eq!(count, 2);
  }

  #[tokio::test]
  async fn test_other_partners_dancers_ignored() {
    let db = test_db::setup().await;
    let ours = test_db::partner(&db, "Ours").await;
    let theirs = test_db::partner(&db, "Theirs").await;
    let sv = Referral::new(&db);
    let now = Utc::now().naive_utc();

    let mine = test_db::dancer(&db, "Mine").await;
    let other = test_db::dancer(&db, "Other").await;
    sv.refer(ours, mine).await.unwrap();
    sv.refer(theirs, other).await.unwrap();
    test_db::submission(&db, other, ReviewStatus::Approved, now).await;

    assert_eq!(sv.count_active_dancers(ours, mine).await.unwrap(), 1);
    assert_eq!(sv.referred_dancers(theirs).await.unwrap(), vec![other]);
  }

  #[tokio::test]
  async fn test_partner_only_count_skips_unreferred_dancers() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;
    let sv = Referral::new(&db);
    let now = Utc::now().naive_utc();

    let active = test_db::dancer(&db, "Active").await;
    let idle = test_db::dancer(&db, "Idle").await;
    sv.refer(partner, active).await.unwrap();
    sv.refer(partner, idle).await.unwrap();
    test_db::submission(&db, active, ReviewStatus::Approved, now).await;

    assert_eq!(sv.active_dancers(partner).await.unwrap(), 1);
    assert_eq!(
      count_active_dancers_at(&db, partner, None, now).await.unwrap(),
      1
    );
  }

  #[tokio::test]
  async fn test_count_beyond_sqlite_variable_limit() {
    const REFERRALS: u32 = 33_000;

    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;

    db.execute_unprepared(&format!(
      "INSERT INTO dancers (name, created_at) \
       WITH RECURSIVE seq(n) AS \
         (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < {REFERRALS}) \
       SELECT 'Dancer ' || n, '2026-01-01 00:00:00' FROM seq"
    ))
    .await
    .unwrap();
    db.execute_unprepared(&format!(
      "INSERT INTO referrals (dancer_id, partner_id, created_at) \
       SELECT id, {partner}, created_at FROM dancers"
    ))
    .await
    .unwrap();

    let sv = Referral::new(&db);
    assert_eq!(sv.referred_dancers(partner).await.unwrap().len(), 33_000);

    let last = REFERRALS as i32;
    let now = Utc::now().naive_utc();
    test_db::submission(&db, last, ReviewStatus::Approved, now).await;

    assert_eq!(sv.count_active_dancers(partner, 1).await.unwrap(), 2);

    let receipt = crate::sv::Payout::new(&db).complete(1, 5000).await.unwrap();
    let commission = receipt.commission.commission().unwrap();
    assert_eq!(commission.partner_id, partner);
    assert_eq!(commission.amount_cents, 150);
  }
}
