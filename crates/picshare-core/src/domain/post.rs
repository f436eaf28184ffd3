use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Media, User};

/// Post entity - a publication owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub caption: Option<String>,
    pub location: Option<String>,
    pub user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i32,
    pub caption: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Create a new post for `user_id`.
    pub fn new(user_id: i32, caption: Option<String>) -> Self {
        Self {
            user_id,
            caption,
            location: None,
            created_at: None,
        }
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn into_post(self, id: i32, created_at: Option<DateTime<Utc>>) -> Post {
        Post {
            id,
            caption: self.caption,
            location: self.location,
            user_id: self.user_id,
            created_at,
        }
    }
}

/// A post together with the relations that were loaded alongside it.
///
/// `user` is `None` when the author was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithRelations {
    pub post: Post,
    pub user: Option<User>,
    pub media: Vec<Media>,
}

impl PostWithRelations {
    /// A post with nothing loaded around it.
    pub fn bare(post: Post) -> Self {
        Self {
            post,
            user: None,
            media: Vec::new(),
        }
    }
}
