use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an account that owns posts, comments, likes and stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Password hash. Opaque to this crate and never serialized for the wire.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
    pub is_private: bool,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertion form of [`User`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub website: Option<String>,
    pub is_private: bool,
    pub is_active: bool,
    /// Left empty, the store stamps the insertion time.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Create a public, active user with no optional profile fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            bio: None,
            profile_picture: None,
            website: None,
            is_private: false,
            is_active: true,
            created_at: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }

    pub fn with_website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Attach the stored identity, producing the persisted record.
    pub fn into_user(self, id: i32, created_at: Option<DateTime<Utc>>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            profile_picture: self.profile_picture,
            website: self.website,
            is_private: self.is_private,
            is_active: self.is_active,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("ana", "ana@x.com", "hash", "Ana", "Lopez");
        assert!(!user.is_private);
        assert!(user.is_active);
        assert!(user.bio.is_none());
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_into_user_keeps_fields() {
        let now = Utc::now();
        let user = NewUser::new("ana", "ana@x.com", "hash", "Ana", "Lopez")
            .with_website("https://ana.dev")
            .private()
            .into_user(7, Some(now));
        assert_eq!(user.id, 7);
        assert_eq!(user.website.as_deref(), Some("https://ana.dev"));
        assert!(user.is_private);
        assert_eq!(user.created_at, Some(now));
    }
}
