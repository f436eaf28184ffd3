use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// Comment entity - text left by a user on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub comment_text: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub user_id: i32,
    pub post_id: i32,
    pub comment_text: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewComment {
    pub fn new(user_id: i32, post_id: i32, comment_text: impl Into<String>) -> Self {
        Self {
            user_id,
            post_id,
            comment_text: comment_text.into(),
            created_at: None,
        }
    }

    pub fn into_comment(self, id: i32, created_at: Option<DateTime<Utc>>) -> Comment {
        Comment {
            id,
            comment_text: self.comment_text,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at,
        }
    }
}

/// A comment with its author, if the author was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub user: Option<User>,
}
