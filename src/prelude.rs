pub use std::{collections::HashSet, sync::Arc, time::Duration};

pub use chrono::{NaiveDateTime as DateTime, TimeDelta, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
  EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
  TransactionTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
