use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, NewComment, NewPost, NewTag, Post, Tag};
use crate::error::RepoError;

/// Tag persistence.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, RepoError>;

    /// Tags whose slug is in `slugs`. Unknown slugs are simply absent.
    async fn find_tags_by_slugs(&self, slugs: &[String]) -> Result<Vec<Tag>, RepoError>;

    /// Insert a tag. Duplicate names or slugs fail with `RepoError::Constraint`.
    async fn insert_tag(&self, tag: NewTag) -> Result<Tag, RepoError>;

    async fn update_tag(&self, tag: &Tag) -> Result<Tag, RepoError>;

    /// Delete a tag and detach it from every post.
    async fn delete_tag(&self, id: i64) -> Result<(), RepoError>;
}

/// Post persistence. Returned posts carry their tags and favorites.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, RepoError>;

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a post with no tags. Duplicate titles or slugs fail with
    /// `RepoError::Constraint`.
    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Persist title, content and `updated_at`.
    async fn update_post(&self, post: &Post) -> Result<(), RepoError>;

    /// Replace the post's tag set with exactly `tag_ids`. An unknown tag or
    /// post fails with `RepoError::MissingReference`.
    async fn set_post_tags(&self, post_id: i64, tag_ids: &[i64]) -> Result<(), RepoError>;

    async fn add_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError>;

    async fn remove_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError>;

    /// Delete a post together with its comments, tag links and favorites.
    async fn delete_post(&self, id: i64) -> Result<(), RepoError>;
}

/// Comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, RepoError>;

    /// Comments on a post, newest first.
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;

    /// An unknown post fails with `RepoError::MissingReference`.
    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn update_comment(&self, comment: &Comment) -> Result<Comment, RepoError>;

    async fn delete_comment(&self, id: i64) -> Result<(), RepoError>;
}

/// One atomic scope of work over every repository.
///
/// Nothing is visible to other units of work until [`UnitOfWork::commit`].
/// Dropping a unit of work without committing discards its writes.
#[async_trait]
pub trait UnitOfWork: TagRepository + PostRepository + CommentRepository {
    async fn commit(self: Box<Self>) -> Result<(), RepoError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepoError>;
}

/// Entry point to the persistence layer.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepoError>;
}
