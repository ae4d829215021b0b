use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const EMAIL_MAX_LEN: usize = 254;

/// Comment entity - a user's remark on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub email: String,
    pub comment: String,
    /// Moderation flag. Always false on creation.
    pub approved: bool,
    pub published_at: DateTime<Utc>,
}

impl Comment {
    pub fn apply_edit(&mut self, body: &str) -> Result<(), DomainError> {
        self.comment = validate_body(body)?;
        Ok(())
    }
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: Uuid,
    pub email: String,
    pub comment: String,
    pub approved: bool,
    pub published_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(post_id: i64, user_id: Uuid, email: &str, body: &str) -> Result<Self, DomainError> {
        Ok(Self {
            post_id,
            user_id,
            email: validate_email(email)?,
            comment: validate_body(body)?,
            approved: false,
            published_at: Utc::now(),
        })
    }
}

fn validate_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim();
    let valid_shape = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_shape {
        return Err(DomainError::Validation("invalid email address".to_string()));
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }
    Ok(email.to_string())
}

fn validate_body(body: &str) -> Result<String, DomainError> {
    if body.trim().is_empty() {
        return Err(DomainError::Validation("comment must not be empty".to_string()));
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_is_unapproved() {
        let comment = NewComment::new(1, Uuid::new_v4(), "reader@example.com", "Nice!").unwrap();
        assert!(!comment.approved);
        assert_eq!(comment.email, "reader@example.com");
    }

    #[test]
    fn test_new_comment_rejects_bad_email() {
        for email in ["", "no-at-sign", "@example.com", "reader@"] {
            assert!(
                matches!(
                    NewComment::new(1, Uuid::new_v4(), email, "body"),
                    Err(DomainError::Validation(_))
                ),
                "accepted {email:?}"
            );
        }
    }

    #[test]
    fn test_new_comment_rejects_blank_body() {
        assert!(NewComment::new(1, Uuid::new_v4(), "a@b.c", "  \n").is_err());
    }
}
