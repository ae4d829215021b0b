//! Authorization policy.
//!
//! Every mutating handler asks [`Policy::authorize`] before it writes. Posts
//! and comments may only be changed by the user who created them; tags follow
//! a configurable [`TagPolicy`].

use std::fmt;
use std::str::FromStr;

use crate::context::Actor;
use crate::domain::{Comment, Post};
use crate::error::DomainError;

/// What an actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Favorite,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Favorite => "favorite",
        };
        f.write_str(verb)
    }
}

/// The entity an action targets. `New*` variants stand for not-yet-created rows.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    NewPost,
    Post(&'a Post),
    NewComment,
    Comment(&'a Comment),
    Tag,
}

impl Resource<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Resource::NewPost | Resource::Post(_) => "post",
            Resource::NewComment | Resource::Comment(_) => "comment",
            Resource::Tag => "tag",
        }
    }
}

/// Who may create, update and delete tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagPolicy {
    /// Any caller, including anonymous ones.
    Open,
    /// Any authenticated user.
    #[default]
    Authenticated,
    /// Authenticated users carrying the named role.
    Role(String),
}

impl FromStr for TagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("open") {
            return Ok(TagPolicy::Open);
        }
        if raw.eq_ignore_ascii_case("authenticated") {
            return Ok(TagPolicy::Authenticated);
        }

        // Role names are matched exactly against token roles, so keep their case.
        match raw.split_once(':') {
            Some((keyword, role)) if keyword.eq_ignore_ascii_case("role") && !role.is_empty() => {
                Ok(TagPolicy::Role(role.to_string()))
            }
            _ => Err(format!(
                "unknown tag policy '{s}' (expected open, authenticated or role:<name>)"
            )),
        }
    }
}

/// The authorization predicate applied before every write.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    tags: TagPolicy,
}

impl Policy {
    pub fn new(tags: TagPolicy) -> Self {
        Self { tags }
    }

    /// Whether `actor` may perform `action` on `resource`.
    pub fn can(&self, actor: &Actor, action: Action, resource: Resource<'_>) -> bool {
        match (action, resource) {
            (Action::Create, Resource::NewPost) => actor.is_authenticated(),
            (Action::Update | Action::Delete, Resource::Post(post)) => actor.is(post.author_id),
            (Action::Favorite, Resource::Post(_)) => actor.is_authenticated(),

            (Action::Create, Resource::NewComment) => actor.is_authenticated(),
            (Action::Update | Action::Delete, Resource::Comment(comment)) => {
                actor.is(comment.user_id)
            }

            (Action::Create | Action::Update | Action::Delete, Resource::Tag) => match &self.tags {
                TagPolicy::Open => true,
                TagPolicy::Authenticated => actor.is_authenticated(),
                TagPolicy::Role(role) => actor.has_role(role),
            },

            _ => false,
        }
    }

    /// Like [`Policy::can`], but explains a refusal.
    ///
    /// Anonymous actors get `Unauthenticated`, authenticated ones `Forbidden`.
    pub fn authorize(
        &self,
        actor: &Actor,
        action: Action,
        resource: Resource<'_>,
    ) -> Result<(), DomainError> {
        if self.can(actor, action, resource) {
            return Ok(());
        }

        let kind = resource.kind();
        if !actor.is_authenticated() {
            return Err(DomainError::Unauthenticated(format!(
                "you must be logged in to {action} a {kind}"
            )));
        }

        let reason = match resource {
            Resource::Post(_) => format!("only the post author can {action} it"),
            Resource::Comment(_) => format!("only the comment user can {action} it"),
            Resource::Tag => match &self.tags {
                TagPolicy::Role(role) => format!("the '{role}' role is required to {action} a tag"),
                _ => format!("you may not {action} a tag"),
            },
            _ => format!("you may not {action} a {kind}"),
        };
        Err(DomainError::Forbidden(reason))
    }
}
