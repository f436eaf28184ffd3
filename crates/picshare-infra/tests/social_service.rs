use chrono::{Duration, Utc};

use picshare_core::domain::{
    MediaType, NewComment, NewFollow, NewLike, NewMedia, NewPost, NewStory, NewUser,
};
use picshare_core::{DomainError, SocialService};
use picshare_infra::store;
use picshare_shared::{serialize, to_mapping};
use serde_json::Value;

fn service() -> SocialService {
    SocialService::new(store::context())
}

fn user(name: &str) -> NewUser {
    NewUser::new(name, format!("{}@x.com", name), "hash", "First", "Last")
}

#[tokio::test]
async fn test_post_scenario_serializes_caption_and_media() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let post = svc
        .create_post(NewPost::new(ana.id, Some("hi".to_string())))
        .await
        .unwrap();
    svc.attach_media(NewMedia::new(post.id, MediaType::Image, "http://x/1.jpg"))
        .await
        .unwrap();

    let loaded = svc.load_post(post.id).await.unwrap();
    let map = to_mapping(&serialize::post(&loaded));

    assert_eq!(map["caption"], "hi");
    assert_eq!(map["user"]["username"], "ana");
    let media = map["media"].as_array().unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0]["type"], "image");
}

#[tokio::test]
async fn test_post_without_media_loads_empty_media() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let post = svc.create_post(NewPost::new(ana.id, None)).await.unwrap();

    let map = to_mapping(&serialize::post(&svc.load_post(post.id).await.unwrap()));
    assert_eq!(map["media"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_profile_counts_posts_and_followers() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    for i in 0..3 {
        svc.create_post(NewPost::new(ana.id, Some(format!("post {}", i))))
            .await
            .unwrap();
    }
    for name in ["bo", "cy"] {
        let fan = svc.register_user(user(name)).await.unwrap();
        svc.follow_user(NewFollow::new(fan.id, ana.id)).await.unwrap();
    }

    let profile = svc.load_user_profile(ana.id).await.unwrap();
    let map = to_mapping(&serialize::user_profile(&profile));

    assert_eq!(map["posts_count"], 3);
    assert_eq!(map["followers_count"], 2);
    assert_eq!(map["following_count"], 0);
}

#[tokio::test]
async fn test_duplicate_username_and_email_rejected() {
    let svc = service();
    svc.register_user(user("ana")).await.unwrap();

    let err = svc
        .register_user(NewUser::new("ana", "new@x.com", "h", "A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));

    let err = svc
        .register_user(NewUser::new("other", "ana@x.com", "h", "A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn test_missing_parents_report_not_found() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();

    let err = svc
        .add_comment(NewComment::new(ana.id, 404, "hello"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Post",
            id: 404
        }
    ));

    let err = svc.like_post(NewLike::new(77, 1)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));

    let err = svc
        .attach_media(NewMedia::new(5, MediaType::Video, "http://x/v.mp4"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn test_follow_pair_is_unique() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let bo = svc.register_user(user("bo")).await.unwrap();

    svc.follow_user(NewFollow::new(ana.id, bo.id)).await.unwrap();
    let err = svc
        .follow_user(NewFollow::new(ana.id, bo.id))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn test_second_like_is_duplicate() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let post = svc.create_post(NewPost::new(ana.id, None)).await.unwrap();

    svc.like_post(NewLike::new(ana.id, post.id)).await.unwrap();
    let err = svc
        .like_post(NewLike::new(ana.id, post.id))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn test_comments_load_with_authors() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let bo = svc.register_user(user("bo")).await.unwrap();
    let post = svc.create_post(NewPost::new(ana.id, None)).await.unwrap();

    let first = svc
        .add_comment(NewComment::new(bo.id, post.id, "nice"))
        .await
        .unwrap();
    svc.add_comment(NewComment::new(ana.id, post.id, "thanks"))
        .await
        .unwrap();

    let single = to_mapping(&serialize::comment(&svc.load_comment(first.id).await.unwrap()));
    assert_eq!(single["comment_text"], "nice");
    assert_eq!(single["user"]["username"], "bo");

    let all = svc.load_post_comments(post.id).await.unwrap();
    let authors: Vec<_> = all
        .iter()
        .map(|c| c.user.as_ref().map(|u| u.username.as_str()))
        .collect();
    assert_eq!(authors, vec![Some("bo"), Some("ana")]);
}

#[tokio::test]
async fn test_story_must_expire_after_creation() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();
    let now = Utc::now();

    let mut backwards = NewStory::new(ana.id, "http://x/s.jpg", now - Duration::hours(1));
    backwards.created_at = Some(now);
    let err = svc.publish_story(backwards).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let story = svc
        .publish_story(NewStory::with_default_ttl(ana.id, "http://x/s.jpg"))
        .await
        .unwrap();
    let active = svc.active_stories(ana.id, Utc::now()).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, story.id);

    let later = Utc::now() + Duration::hours(25);
    assert!(svc.active_stories(ana.id, later).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unstamped_story_checked_against_insert_time() {
    let svc = service();
    let ana = svc.register_user(user("ana")).await.unwrap();

    let expired = NewStory::new(ana.id, "http://x/s.jpg", Utc::now() - Duration::hours(1));
    assert!(expired.created_at.is_none());
    let err = svc.publish_story(expired).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    let earlier = Utc::now() - Duration::hours(2);
    assert!(svc.active_stories(ana.id, earlier).await.unwrap().is_empty());

    let expires_at = Utc::now() + Duration::hours(1);
    let story = svc
        .publish_story(NewStory::new(ana.id, "http://x/s.jpg", expires_at))
        .await
        .unwrap();
    let created_at = story.created_at.unwrap();
    assert!(created_at < story.expires_at);
}
