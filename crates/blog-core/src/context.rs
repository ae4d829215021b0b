//! Explicit per-request context handed to every mutation.

use uuid::Uuid;

/// Who is performing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User { id: Uuid, roles: Vec<String> },
}

impl Actor {
    pub fn user(id: Uuid) -> Self {
        Self::User { id, roles: vec![] }
    }

    pub fn with_roles(id: Uuid, roles: Vec<String>) -> Self {
        Self::User { id, roles }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::Anonymous => None,
            Actor::User { id, .. } => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User { .. })
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self {
            Actor::Anonymous => false,
            Actor::User { roles, .. } => roles.iter().any(|r| r == role),
        }
    }

    /// True when this actor is the given user.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

/// Request-scoped values threaded into every handler call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Actor,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            request_id: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Actor::Anonymous)
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Request id for log fields, `-` when none was assigned.
    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }
}
