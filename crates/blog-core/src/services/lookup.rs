//! Entity lookups that fail with a clear error when nothing matches.

use std::collections::HashSet;

use crate::domain::{Comment, Post, Tag};
use crate::error::DomainError;
use crate::ports::UnitOfWork;

/// Resolve every slug to a tag, in the order given, ignoring repeats.
///
/// Fails with `UnknownTags` naming all slugs that have no tag.
pub async fn resolve_tags(uow: &dyn UnitOfWork, slugs: &[String]) -> Result<Vec<Tag>, DomainError> {
    let mut seen = HashSet::new();
    let wanted: Vec<String> = slugs
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| seen.insert(s.clone()))
        .collect();

    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let mut found = uow.find_tags_by_slugs(&wanted).await?;

    let mut tags = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();
    for slug in wanted {
        match found.iter().position(|t| t.slug == slug) {
            Some(idx) => tags.push(found.swap_remove(idx)),
            None => missing.push(slug),
        }
    }

    if !missing.is_empty() {
        return Err(DomainError::UnknownTags(missing));
    }
    Ok(tags)
}

pub async fn require_post(uow: &dyn UnitOfWork, id: i64) -> Result<Post, DomainError> {
    uow.find_post(id)
        .await?
        .ok_or_else(|| DomainError::not_found_id("post", id))
}

pub async fn require_post_by_slug(uow: &dyn UnitOfWork, slug: &str) -> Result<Post, DomainError> {
    uow.find_post_by_slug(slug)
        .await?
        .ok_or_else(|| DomainError::not_found_slug("post", slug))
}

pub async fn require_comment(uow: &dyn UnitOfWork, id: i64) -> Result<Comment, DomainError> {
    uow.find_comment(id)
        .await?
        .ok_or_else(|| DomainError::not_found_id("comment", id))
}

pub async fn require_tag(uow: &dyn UnitOfWork, id: i64) -> Result<Tag, DomainError> {
    uow.find_tag(id)
        .await?
        .ok_or_else(|| DomainError::not_found_id("tag", id))
}
