use serde::Serialize;

use super::{BlogMutations, DeletedPayload, lookup};
use crate::context::RequestContext;
use crate::domain::{Comment, NewComment, Post};
use crate::error::DomainError;
use crate::policy::{Action, Resource};

#[derive(Debug, Clone)]
pub struct CommentInput {
    pub post_slug: String,
    pub email: String,
    pub comment: String,
}

/// Result of commenting: the parent post first, then the new comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentCreatedPayload {
    pub post: Post,
    pub comment: Comment,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentPayload {
    pub success: bool,
    pub comment: Comment,
}

impl BlogMutations {
    /// Comment on the post identified by `post_slug`. Requires a logged-in user.
    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        input: CommentInput,
    ) -> Result<CommentCreatedPayload, DomainError> {
        self.authorize(ctx, Action::Create, Resource::NewComment)?;
        let user_id = ctx.actor.user_id().ok_or_else(|| {
            DomainError::Unauthenticated("you must be logged in to comment".to_string())
        })?;

        let uow = self.begin().await?;
        let post = lookup::require_post_by_slug(uow.as_ref(), &input.post_slug).await?;
        let draft = NewComment::new(post.id, user_id, &input.email, &input.comment)?;
        let comment = uow.insert_comment(draft).await?;
        uow.commit().await?;

        tracing::info!(
            request_id = ctx.request_id(),
            post_id = post.id,
            comment_id = comment.id,
            "Comment created"
        );
        Ok(CommentCreatedPayload { post, comment })
    }

    /// Replace a comment's body. Only the commenting user may do so.
    pub async fn update_comment(
        &self,
        ctx: &RequestContext,
        id: i64,
        body: &str,
    ) -> Result<CommentPayload, DomainError> {
        let uow = self.begin().await?;
        let mut comment = lookup::require_comment(uow.as_ref(), id).await?;
        self.authorize(ctx, Action::Update, Resource::Comment(&comment))?;
        comment.apply_edit(body)?;

        let comment = uow.update_comment(&comment).await?;
        uow.commit().await?;

        tracing::info!(request_id = ctx.request_id(), comment_id = id, "Comment updated");
        Ok(CommentPayload {
            success: true,
            comment,
        })
    }

    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<DeletedPayload, DomainError> {
        let uow = self.begin().await?;
        let comment = lookup::require_comment(uow.as_ref(), id).await?;
        self.authorize(ctx, Action::Delete, Resource::Comment(&comment))?;

        uow.delete_comment(comment.id).await?;
        uow.commit().await?;

        tracing::info!(request_id = ctx.request_id(), comment_id = id, "Comment deleted");
        Ok(DeletedPayload { success: true })
    }
}
