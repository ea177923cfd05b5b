use crate::{entity::dancer, prelude::*};

pub struct Dancer<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Dancer<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, name: &str) -> Result<dancer::Model> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::InvalidArgs("Dancer name must not be empty".into()));
    }

    let dancer = dancer::ActiveModel {
      id: NotSet,
      name: Set(name.to_string()),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(dancer.insert(self.db).await?)
  }

  pub async fn by_id(&self, dancer_id: i32) -> Result<dancer::Model> {
    dancer::Entity::find_by_id(dancer_id)
      .one(self.db)
      .await?
      .ok_or(Error::DancerNotFound)
  }
}
