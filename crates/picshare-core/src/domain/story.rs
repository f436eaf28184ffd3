use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime applied by [`NewStory::with_default_ttl`].
pub const DEFAULT_STORY_TTL_HOURS: i64 = 24;

/// Story entity - ephemeral media published by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: i32,
    pub user_id: i32,
    pub media_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl Story {
    /// A story stops being visible once `at` reaches `expires_at`.
    pub fn is_expired(&self, at: DateTime<Utc>) -> bool {
        at >= self.expires_at
    }
}

/// Insertion form of [`Story`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub user_id: i32,
    pub media_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl NewStory {
    pub fn new(user_id: i32, media_url: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            media_url: media_url.into(),
            created_at: None,
            expires_at,
        }
    }

    /// Create a story published now that expires after the default lifetime.
    pub fn with_default_ttl(user_id: i32, media_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            media_url: media_url.into(),
            created_at: Some(now),
            expires_at: now + Duration::hours(DEFAULT_STORY_TTL_HOURS),
        }
    }

    pub fn into_story(self, id: i32, created_at: Option<DateTime<Utc>>) -> Story {
        Story {
            id,
            user_id: self.user_id,
            media_url: self.media_url,
            created_at,
            expires_at: self.expires_at,
        }
    }
}
