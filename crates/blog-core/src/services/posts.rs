use serde::Serialize;

use super::{BlogMutations, abort, lookup};
use crate::context::RequestContext;
use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::policy::{Action, Resource};

/// Fields accepted when creating or editing a post.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    /// Slugs of existing tags. Replaces the whole tag set on update.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPayload {
    pub success: bool,
    pub post: Post,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedPayload {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritePayload {
    pub success: bool,
    pub favorited: bool,
    pub post: Post,
}

impl BlogMutations {
    /// Create a post authored by the current user.
    pub async fn create_post(
        &self,
        ctx: &RequestContext,
        input: PostInput,
    ) -> Result<PostPayload, DomainError> {
        self.authorize(ctx, Action::Create, Resource::NewPost)?;
        let author_id = ctx
            .actor
            .user_id()
            .ok_or_else(|| DomainError::Unauthenticated("a post needs an author".to_string()))?;
        let draft = NewPost::new(author_id, &input.title, &input.content)?;

        let uow = self.begin().await?;
        let resolved = lookup::resolve_tags(uow.as_ref(), &input.tags).await;
        let tags = match resolved {
            Ok(tags) => tags,
            Err(err) => return abort(uow, err).await,
        };

        let mut post = uow.insert_post(draft).await?;
        let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
        uow.set_post_tags(post.id, &tag_ids).await?;
        uow.commit().await?;
        post.set_tags(tags);

        tracing::info!(
            request_id = ctx.request_id(),
            post_id = post.id,
            author_id = %author_id,
            tags = ?post.tag_slugs(),
            "Post created"
        );
        Ok(PostPayload {
            success: true,
            post,
        })
    }

    /// Overwrite title, content and tags of a post. Only its author may do so.
    pub async fn update_post(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: PostInput,
    ) -> Result<PostPayload, DomainError> {
        let uow = self.begin().await?;
        let mut post = lookup::require_post(uow.as_ref(), id).await?;
        self.authorize(ctx, Action::Update, Resource::Post(&post))?;
        post.apply_edit(&input.title, &input.content)?;

        let resolved = lookup::resolve_tags(uow.as_ref(), &input.tags).await;
        let tags = match resolved {
            Ok(tags) => tags,
            Err(err) => return abort(uow, err).await,
        };

        uow.update_post(&post).await?;
        let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
        uow.set_post_tags(post.id, &tag_ids).await?;
        uow.commit().await?;
        post.set_tags(tags);

        tracing::info!(
            request_id = ctx.request_id(),
            post_id = post.id,
            tags = ?post.tag_slugs(),
            "Post updated"
        );
        Ok(PostPayload {
            success: true,
            post,
        })
    }

    /// Delete a post and, through the store, all of its comments.
    pub async fn delete_post(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<DeletedPayload, DomainError> {
        let uow = self.begin().await?;
        let post = lookup::require_post(uow.as_ref(), id).await?;
        self.authorize(ctx, Action::Delete, Resource::Post(&post))?;

        uow.delete_post(post.id).await?;
        uow.commit().await?;

        tracing::info!(request_id = ctx.request_id(), post_id = id, "Post deleted");
        Ok(DeletedPayload { success: true })
    }

    /// Add the current user to the post's favorites, or remove them if present.
    pub async fn toggle_favorite(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<FavoritePayload, DomainError> {
        let uow = self.begin().await?;
        let mut post = lookup::require_post(uow.as_ref(), id).await?;
        self.authorize(ctx, Action::Favorite, Resource::Post(&post))?;
        let user_id = ctx
            .actor
            .user_id()
            .ok_or_else(|| DomainError::Unauthenticated("favorites need a user".to_string()))?;

        let favorited = if post.is_favorited_by(user_id) {
            uow.remove_favorite(post.id, user_id).await?;
            post.favorites.retain(|u| *u != user_id);
            false
        } else {
            uow.add_favorite(post.id, user_id).await?;
            post.favorites.push(user_id);
            true
        };
        uow.commit().await?;

        tracing::debug!(
            request_id = ctx.request_id(),
            post_id = id,
            favorited,
            "Favorite toggled"
        );
        Ok(FavoritePayload {
            success: true,
            favorited,
            post,
        })
    }
}
