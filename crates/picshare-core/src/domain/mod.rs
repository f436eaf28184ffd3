//! Domain entities - plain records with no persistence behaviour.

mod comment;
mod follow;
mod like;
mod media;
mod post;
mod story;
mod user;
mod user_relations;

pub use comment::{Comment, CommentWithAuthor, NewComment};
pub use follow::{Follow, NewFollow};
pub use like::{Like, NewLike};
pub use media::{Media, MediaType, NewMedia};
pub use post::{NewPost, Post, PostWithRelations};
pub use story::{DEFAULT_STORY_TTL_HOURS, NewStory, Story};
pub use user::{NewUser, User};
pub use user_relations::UserWithRelations;
