use serde::Serialize;

use super::{BlogMutations, lookup};
use crate::context::RequestContext;
use crate::domain::{NewTag, Tag};
use crate::error::DomainError;
use crate::policy::{Action, Resource};

/// Tag form. A missing slug is derived from the name on create and left
/// unchanged on update.
#[derive(Debug, Clone)]
pub struct TagInput {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagPayload {
    pub tag: Tag,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagDeletedPayload {
    pub tag: Tag,
    pub success: bool,
}

impl BlogMutations {
    pub async fn create_tag(
        &self,
        ctx: &RequestContext,
        input: TagInput,
    ) -> Result<TagPayload, DomainError> {
        self.authorize(ctx, Action::Create, Resource::Tag)?;
        let draft = NewTag::new(&input.name, input.slug.as_deref())?;

        let uow = self.begin().await?;
        let tag = uow.insert_tag(draft).await?;
        uow.commit().await?;

        tracing::info!(
            request_id = ctx.request_id(),
            tag_id = tag.id,
            slug = %tag.slug,
            "Tag created"
        );
        Ok(TagPayload { tag })
    }

    pub async fn update_tag(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: TagInput,
    ) -> Result<TagPayload, DomainError> {
        self.authorize(ctx, Action::Update, Resource::Tag)?;

        let uow = self.begin().await?;
        let mut tag = lookup::require_tag(uow.as_ref(), id).await?;
        tag.apply_edit(&input.name, input.slug.as_deref())?;
        let tag = uow.update_tag(&tag).await?;
        uow.commit().await?;

        tracing::info!(
            request_id = ctx.request_id(),
            tag_id = tag.id,
            slug = %tag.slug,
            "Tag updated"
        );
        Ok(TagPayload { tag })
    }

    /// Delete a tag. Posts keep existing, minus the tag.
    pub async fn delete_tag(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<TagDeletedPayload, DomainError> {
        self.authorize(ctx, Action::Delete, Resource::Tag)?;

        let uow = self.begin().await?;
        let tag = lookup::require_tag(uow.as_ref(), id).await?;
        uow.delete_tag(tag.id).await?;
        uow.commit().await?;

        tracing::info!(request_id = ctx.request_id(), tag_id = id, "Tag deleted");
        Ok(TagDeletedPayload { tag, success: true })
    }
}
