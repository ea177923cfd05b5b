use crate::{entity::partner, prelude::*};

pub struct Partner<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Partner<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, name: &str) -> Result<partner::Model> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::InvalidArgs("Partner name must not be empty".into()));
    }

    let partner = partner::ActiveModel {
      id: NotSet,
      name: Set(name.to_string()),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(partner.insert(self.db).await?)
  }

  pub async fn by_id(&self, partner_id: i32) -> Result<partner::Model> {
    partner::Entity::find_by_id(partner_id)
      .one(self.db)
      .await?
      .ok_or(Error::PartnerNotFound)
  }
}
