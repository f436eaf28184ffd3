use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Follow entity - `user_from_id` follows `user_to_id`.
///
/// At most one row exists per ordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub id: i32,
    pub user_from_id: i32,
    pub user_to_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`Follow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFollow {
    pub user_from_id: i32,
    pub user_to_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewFollow {
    pub fn new(user_from_id: i32, user_to_id: i32) -> Self {
        Self {
            user_from_id,
            user_to_id,
            created_at: None,
        }
    }

    pub fn into_follow(self, id: i32, created_at: Option<DateTime<Utc>>) -> Follow {
        Follow {
            id,
            user_from_id: self.user_from_id,
            user_to_id: self.user_to_id,
            created_at,
        }
    }
}
