use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;
use super::tag::Tag;
use crate::error::DomainError;

pub const TITLE_MAX_LEN: usize = 250;

/// Post entity - a blog post with its author, tags and favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_id: Uuid,
    pub tags: Vec<Tag>,
    pub favorites: Vec<Uuid>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn tag_slugs(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.slug.as_str()).collect()
    }

    /// Replace the tag list, ordered by slug.
    pub fn set_tags(&mut self, mut tags: Vec<Tag>) {
        tags.sort_by(|a, b| a.slug.cmp(&b.slug));
        self.tags = tags;
    }

    pub fn is_favorited_by(&self, user_id: Uuid) -> bool {
        self.favorites.contains(&user_id)
    }

    /// Overwrite the editable fields and bump `updated_at`.
    ///
    /// Author, slug and `published_at` never change after creation.
    pub fn apply_edit(&mut self, title: &str, content: &str) -> Result<(), DomainError> {
        self.title = validate_title(title)?;
        self.content = content.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A post that has not been stored yet. Tags are attached after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_id: Uuid,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Validate the title and derive the slug from it.
    pub fn new(author_id: Uuid, title: &str, content: &str) -> Result<Self, DomainError> {
        let title = validate_title(title)?;
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "post title must contain at least one letter or digit".to_string(),
            ));
        }
        if slug.len() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "post slug must be at most {TITLE_MAX_LEN} characters"
            )));
        }

        let now = Utc::now();
        Ok(Self {
            title,
            slug,
            content: content.to_string(),
            author_id,
            published_at: now,
            updated_at: now,
        })
    }
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("post title is required".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "post title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_derives_slug() {
        let author = Uuid::new_v4();
        let post = NewPost::new(author, "  My First Post ", "hello").unwrap();

        assert_eq!(post.title, "My First Post");
        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.author_id, author);
        assert_eq!(post.published_at, post.updated_at);
    }

    #[test]
    fn test_new_post_rejects_unsluggable_title() {
        let result = NewPost::new(Uuid::new_v4(), "???", "x");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_new_post_rejects_long_title() {
        let title = "a".repeat(TITLE_MAX_LEN + 1);
        assert!(NewPost::new(Uuid::new_v4(), &title, "x").is_err());
    }

    #[test]
    fn test_apply_edit_keeps_identity_fields() {
        let author = Uuid::new_v4();
        let draft = NewPost::new(author, "Original", "body").unwrap();
        let mut post = Post {
            id: 7,
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
            author_id: author,
            tags: vec![],
            favorites: vec![],
            published_at: draft.published_at,
            updated_at: draft.updated_at,
        };

        post.apply_edit("Renamed", "new body").unwrap();

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "new body");
        assert_eq!(post.slug, "original");
        assert_eq!(post.author_id, author);
        assert!(post.updated_at >= post.published_at);
    }
}
