//! Data Transfer Objects - the serialized form of each record.
//!
//! Field names are the wire keys. Timestamps are ISO-8601 strings, `None`
//! renders as `null`.

use serde::{Deserialize, Serialize};

/// A user's public information. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
    pub is_private: bool,
    pub created_at: Option<String>,
}

/// A user plus counts of the loaded collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub posts_count: u64,
    pub followers_count: u64,
    pub following_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub caption: Option<String>,
    pub location: Option<String>,
    pub user_id: i32,
    pub created_at: Option<String>,
    /// `null` when the author was not loaded.
    pub user: Option<UserResponse>,
    /// Always a sequence, empty when the post has no media.
    pub media: Vec<MediaResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub post_id: i32,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub comment_text: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: Option<String>,
    pub user: Option<UserResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowResponse {
    pub id: i32,
    pub user_from_id: i32,
    pub user_to_id: i32,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub id: i32,
    pub user_id: i32,
    pub media_url: String,
    pub created_at: Option<String>,
    pub expires_at: String,
}
