//! Request bodies accepted by the mutation endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts` and `PUT /api/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    /// Tag slugs. Omitted means no tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Body of `POST /api/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_slug: String,
    pub email: String,
    pub comment: String,
}

/// Body of `PUT /api/comments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub comment: String,
}

/// Body of `POST /api/tags` and `PUT /api/tags/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}
