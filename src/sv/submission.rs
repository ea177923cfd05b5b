use crate::{
  entity::{ReviewStatus, submission},
  prelude::*,
  sv,
};

pub struct Submission<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Submission<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn submit(
    &self,
    dancer_id: i32,
    video_url: &str,
  ) -> Result<submission::Model> {
    if !video_url.starts_with("https://") && !video_url.starts_with("http://")
    {
      return Err(Error::InvalidArgs("Video URL must be http(s)".into()));
    }

    sv::Dancer::new(self.db).by_id(dancer_id).await?;

    let submission = submission::ActiveModel {
      id: NotSet,
      dancer_id: Set(dancer_id),
      video_url: Set(video_url.to_string()),
      review_status: Set(ReviewStatus::Pending),
      submitted_at: Set(Utc::now().naive_utc()),
      reviewed_at: Set(None),
    };

    Ok(submission.insert(self.db).await?)
  }

  pub async fn review(
    &self,
    submission_id: i32,
    approved: bool,
  ) -> Result<submission::Model> {
    let submission = submission::Entity::find_by_id(submission_id)
      .one(self.db)
      .await?
      .ok_or(Error::SubmissionNotFound)?;

    let status =
      if approved { ReviewStatus::Approved } else { ReviewStatus::Rejected };

    Ok(
      submission::ActiveModel {
        review_status: Set(status),
        reviewed_at: Set(Some(Utc::now().naive_utc())),
        ..submission.into()
      }
      .update(self.db)
      .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{Referral, test_utils::test_db};

  #[tokio::test]
  async fn test_approval_makes_dancer_active() {
    let db = test_db::setup().await;
    let partner = test_db::partner(&db, "Crew").await;
    let active = test_db::dancer(&db, "Active").await;
    let trigger = test_db::dancer(&db, "Trigger").await;
    let referral = Referral::new(&db);
    referral.refer(partner, active).await.unwrap();
    referral.refer(partner, trigger).await.unwrap();

    let sv = Submission::new(&db);
    let submission =
      sv.submit(active, "https://videos.example/1").await.unwrap();
    assert_eq!(submission.review_status, ReviewStatus::Pending);
    assert_eq!(referral.count_active_dancers(partner, trigger).await.unwrap(), 1);

    let reviewed = sv.review(submission.id, true).await.unwrap();
    assert_eq!(reviewed.review_status, ReviewStatus::Approved);
    assert!(reviewed.reviewed_at.is_some());
    assert_eq!(referral.count_active_dancers(partner, trigger).await.unwrap(), 2);
  }

  #[tokio::test]
  async fn test_submit_validation() {
    let db = test_db::setup().await;
    let sv = Submission::new(&db);

    assert!(matches!(
      sv.submit(1, "ftp://videos.example/1").await,
      Err(Error::InvalidArgs(_))
    ));
    assert!(matches!(
      sv.submit(1, "https://videos.example/1").await,
      Err(Error::DancerNotFound)
    ));
    assert!(matches!(
      sv.review(5, true).await,
      Err(Error::SubmissionNotFound)
    ));
  }
}
