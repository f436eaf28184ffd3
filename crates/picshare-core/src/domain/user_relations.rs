use super::{Follow, Post, User};

/// A user with the collections that profile views count.
///
/// `followers` holds rows whose `user_to_id` is this user, `following`
/// those whose `user_from_id` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithRelations {
    pub user: User,
    pub posts: Vec<Post>,
    pub followers: Vec<Follow>,
    pub following: Vec<Follow>,
}

impl UserWithRelations {
    pub fn bare(user: User) -> Self {
        Self {
            user,
            posts: Vec::new(),
            followers: Vec::new(),
            following: Vec::new(),
        }
    }
}
