use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like entity - one user liking one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`Like`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLike {
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewLike {
    pub fn new(user_id: i32, post_id: i32) -> Self {
        Self {
            user_id,
            post_id,
            created_at: None,
        }
    }

    pub fn into_like(self, id: i32, created_at: Option<DateTime<Utc>>) -> Like {
        Like {
            id,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at,
        }
    }
}
