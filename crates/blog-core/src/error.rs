//! Domain-level error types.

use thiserror::Error;

/// Domain errors - every way a mutation can fail.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Entity not found: {entity_type} with {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Unknown tag slugs: {}", .0.join(", "))]
    UnknownTags(Vec<String>),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found_id(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity_type,
            key: format!("id {id}"),
        }
    }

    pub fn not_found_slug(entity_type: &'static str, slug: &str) -> Self {
        Self::NotFound {
            entity_type,
            key: format!("slug '{slug}'"),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Missing reference: {0}")]
    MissingReference(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::MissingReference(key) => DomainError::NotFound {
                entity_type: "referenced record",
                key,
            },
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "record",
                key: "the requested key".to_string(),
            },
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
