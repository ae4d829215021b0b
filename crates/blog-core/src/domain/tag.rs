use serde::{Deserialize, Serialize};

use super::slug::{is_valid_slug, slugify};
use crate::error::DomainError;

pub const TAG_NAME_MAX_LEN: usize = 100;
pub const TAG_SLUG_MAX_LEN: usize = 100;

/// Tag entity - a label attachable to many posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A tag that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

impl NewTag {
    /// Validate a tag form. A missing slug is derived from the name.
    pub fn new(name: &str, slug: Option<&str>) -> Result<Self, DomainError> {
        let name = validate_name(name)?;
        let slug = match slug {
            Some(slug) => validate_slug(slug)?,
            None => validate_slug(&slugify(&name))?,
        };
        Ok(Self { name, slug })
    }
}

impl Tag {
    /// Apply an edit form. The slug is kept when none is given.
    pub fn apply_edit(&mut self, name: &str, slug: Option<&str>) -> Result<(), DomainError> {
        let name = validate_name(name)?;
        let slug = match slug {
            Some(slug) => validate_slug(slug)?,
            None => self.slug.clone(),
        };
        self.name = name;
        self.slug = slug;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("tag name is required".to_string()));
    }
    if name.chars().count() > TAG_NAME_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "tag name must be at most {TAG_NAME_MAX_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_slug(slug: &str) -> Result<String, DomainError> {
    let slug = slug.trim();
    if !is_valid_slug(slug) {
        return Err(DomainError::Validation(format!(
            "'{slug}' is not a valid slug (lowercase letters, numbers, underscores or hyphens)"
        )));
    }
    if slug.len() > TAG_SLUG_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "tag slug must be at most {TAG_SLUG_MAX_LEN} characters"
        )));
    }
    Ok(slug.to_string())
}
