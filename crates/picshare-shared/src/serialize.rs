//! Conversion of domain records into their wire mappings.
//!
//! Every function here is pure and infallible. Relations that were not
//! loaded degrade to `null` (single) or `[]` (collections).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use picshare_core::domain::{
    CommentWithAuthor, Follow, Like, Media, PostWithRelations, Story, User, UserWithRelations,
};

use crate::dto::{
    CommentResponse, FollowResponse, LikeResponse, MediaResponse, PostResponse,
    StoryResponse, UserProfileResponse, UserResponse,
};

/// ISO-8601 rendering used for every timestamp on the wire.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn optional_timestamp(at: Option<&DateTime<Utc>>) -> Option<String> {
    at.map(timestamp)
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        bio: user.bio.clone(),
        profile_picture: user.profile_picture.clone(),
        website: user.website.clone(),
        is_private: user.is_private,
        created_at: optional_timestamp(user.created_at.as_ref()),
    }
}

/// User mapping with counts taken from the loaded collections.
pub fn user_profile(profile: &UserWithRelations) -> UserProfileResponse {
    UserProfileResponse {
        user: user(&profile.user),
        posts_count: profile.posts.len() as u64,
        followers_count: profile.followers.len() as u64,
        following_count: profile.following.len() as u64,
    }
}

pub fn post(loaded: &PostWithRelations) -> PostResponse {
    let post = &loaded.post;
    PostResponse {
        id: post.id,
        caption: post.caption.clone(),
        location: post.location.clone(),
        user_id: post.user_id,
        created_at: optional_timestamp(post.created_at.as_ref()),
        user: loaded.user.as_ref().map(user),
        media: loaded.media.iter().map(media).collect(),
    }
}

pub fn media(media: &Media) -> MediaResponse {
    MediaResponse {
        id: media.id,
        media_type: media.media_type.as_str().to_string(),
        url: media.url.clone(),
        post_id: media.post_id,
        created_at: optional_timestamp(media.created_at.as_ref()),
    }
}

pub fn comment(loaded: &CommentWithAuthor) -> CommentResponse {
    let comment = &loaded.comment;
    CommentResponse {
        id: comment.id,
        comment_text: comment.comment_text.clone(),
        user_id: comment.user_id,
        post_id: comment.post_id,
        created_at: optional_timestamp(comment.created_at.as_ref()),
        user: loaded.user.as_ref().map(user),
    }
}

pub fn like(like: &Like) -> LikeResponse {
    LikeResponse {
        id: like.id,
        user_id: like.user_id,
        post_id: like.post_id,
        created_at: optional_timestamp(like.created_at.as_ref()),
    }
}

pub fn follow(follow: &Follow) -> FollowResponse {
    FollowResponse {
        id: follow.id,
        user_from_id: follow.user_from_id,
        user_to_id: follow.user_to_id,
        created_at: optional_timestamp(follow.created_at.as_ref()),
    }
}

pub fn story(story: &Story) -> StoryResponse {
    StoryResponse {
        id: story.id,
        user_id: story.user_id,
        media_url: story.media_url.clone(),
        created_at: optional_timestamp(story.created_at.as_ref()),
        expires_at: timestamp(&story.expires_at),
    }
}

/// Render a DTO as a plain key-value mapping.
///
/// DTOs always serialize to JSON objects; anything else yields an empty map.
pub fn to_mapping<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use picshare_core::domain::{
        Comment, MediaType, NewFollow, NewLike, NewMedia, NewPost, NewStory, NewUser, Post,
    };

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    fn ana() -> User {
        NewUser::new("ana", "ana@x.com", "hash", "Ana", "Lopez")
            .with_bio("hello")
            .into_user(1, Some(fixed_time()))
    }

    fn sorted_keys(map: &Map<String, Value>) -> Vec<&str> {
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_user_mapping_keys_and_values() {
        let map = to_mapping(&user(&ana()));

        assert_eq!(
            sorted_keys(&map),
            vec![
                "bio",
                "created_at",
                "email",
                "first_name",
                "id",
                "is_private",
                "last_name",
                "profile_picture",
                "username",
                "website",
            ]
        );
        assert_eq!(map["username"], "ana");
        assert_eq!(map["bio"], "hello");
        assert_eq!(map["profile_picture"], Value::Null);
        assert_eq!(map["is_private"], false);
        assert_eq!(map["created_at"], "2024-03-01T12:30:00.000000Z");
        assert!(!map.contains_key("password"));
    }

    #[test]
    fn test_timestamps_parse_back_as_iso8601() {
        let rendered = timestamp(&fixed_time());
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), fixed_time());
    }

    #[test]
    fn test_missing_timestamp_serializes_to_null() {
        let like = NewLike::new(1, 2).into_like(5, None);
        let map = to_mapping(&super::like(&like));
        assert_eq!(sorted_keys(&map), vec!["created_at", "id", "post_id", "user_id"]);
        assert_eq!(map["created_at"], Value::Null);
    }

    #[test]
    fn test_post_without_media_has_empty_sequence() {
        let post = NewPost::new(1, None).into_post(3, Some(fixed_time()));
        let map = to_mapping(&super::post(&PostWithRelations::bare(post)));

        assert_eq!(
            sorted_keys(&map),
            vec!["caption", "created_at", "id", "location", "media", "user", "user_id"]
        );
        assert_eq!(map["media"], Value::Array(vec![]));
        assert_eq!(map["user"], Value::Null);
        assert_eq!(map["caption"], Value::Null);
    }

    #[test]
    fn test_post_inlines_author_and_media() {
        let author = ana();
        let post = NewPost::new(author.id, Some("hi".to_string()))
            .at_location("Lisbon")
            .into_post(10, Some(fixed_time()));
        let media = NewMedia::new(post.id, MediaType::Image, "http://x/1.jpg")
            .into_media(20, Some(fixed_time()));
        let loaded = PostWithRelations {
            post,
            user: Some(author),
            media: vec![media],
        };

        let map = to_mapping(&super::post(&loaded));

        assert_eq!(map["caption"], "hi");
        assert_eq!(map["location"], "Lisbon");
        assert_eq!(map["user"]["username"], "ana");
        let media = map["media"].as_array().unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0]["type"], "image");
        assert_eq!(media[0]["url"], "http://x/1.jpg");
        assert_eq!(media[0]["post_id"], 10);
    }

    #[test]
    fn test_media_mapping_keys() {
        let media = NewMedia::new(4, MediaType::Carousel, "http://x/c").into_media(2, None);
        let map = to_mapping(&super::media(&media));
        assert_eq!(
            sorted_keys(&map),
            vec!["created_at", "id", "post_id", "type", "url"]
        );
        assert_eq!(map["type"], "carousel");
    }

    #[test]
    fn test_comment_without_loaded_author_degrades_to_null() {
        let loaded = CommentWithAuthor {
            comment: Comment {
                id: 1,
                comment_text: "nice".to_string(),
                user_id: 1,
                post_id: 2,
                created_at: Some(fixed_time()),
            },
            user: None,
        };
        let map = to_mapping(&comment(&loaded));
        assert_eq!(
            sorted_keys(&map),
            vec!["comment_text", "created_at", "id", "post_id", "user", "user_id"]
        );
        assert_eq!(map["comment_text"], "nice");
        assert_eq!(map["user"], Value::Null);
    }

    #[test]
    fn test_follow_and_story_mappings() {
        let follow = NewFollow::new(1, 2).into_follow(9, Some(fixed_time()));
        let map = to_mapping(&super::follow(&follow));
        assert_eq!(
            sorted_keys(&map),
            vec!["created_at", "id", "user_from_id", "user_to_id"]
        );
        assert_eq!(map["user_from_id"], 1);
        assert_eq!(map["user_to_id"], 2);

        let expires = fixed_time() + Duration::hours(24);
        let story = NewStory::new(1, "http://x/s.mp4", expires).into_story(4, None);
        let map = to_mapping(&super::story(&story));
        assert_eq!(
            sorted_keys(&map),
            vec!["created_at", "expires_at", "id", "media_url", "user_id"]
        );
        assert_eq!(map["created_at"], Value::Null);
        assert_eq!(map["expires_at"], "2024-03-02T12:30:00.000000Z");
    }

    #[test]
    fn test_profile_counts_loaded_collections() {
        let owner = ana();
        let posts: Vec<Post> = (1..=3)
            .map(|id| NewPost::new(owner.id, None).into_post(id, None))
            .collect();
        let followers = (2..=6)
            .map(|from| NewFollow::new(from, owner.id).into_follow(from, None))
            .collect();
        let following = vec![NewFollow::new(owner.id, 2).into_follow(50, None)];
        let profile = UserWithRelations {
            user: owner,
            posts,
            followers,
            following,
        };

        let map = to_mapping(&user_profile(&profile));

        assert_eq!(map["posts_count"], 3);
        assert_eq!(map["followers_count"], 5);
        assert_eq!(map["following_count"], 1);
        assert_eq!(map["username"], "ana");
    }

    #[test]
    fn test_empty_profile_counts_are_zero() {
        let map = to_mapping(&user_profile(&UserWithRelations::bare(ana())));
        assert_eq!(map["posts_count"], 0);
        assert_eq!(map["followers_count"], 0);
        assert_eq!(map["following_count"], 0);
    }
}
