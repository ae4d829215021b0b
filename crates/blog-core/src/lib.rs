//! # Blog Core
//!
//! The domain layer of the blog service: entities, the authorization policy,
//! port traits and the mutation handlers that tie them together.
//! This crate has no infrastructure dependencies.

pub mod context;
pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use context::{Actor, RequestContext};
pub use error::DomainError;
pub use policy::{Policy, TagPolicy};
pub use services::BlogMutations;
