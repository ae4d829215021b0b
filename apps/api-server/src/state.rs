//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{Store, TokenService};
use blog_core::{BlogMutations, Policy};
use blog_infra::{InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub mutations: Arc<BlogMutations>,
    pub tokens: Arc<dyn TokenService>,
    /// Which store backs the mutations, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (store, storage) = build_store(config).await;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!(
            storage,
            tag_policy = ?config.tag_policy,
            "Application state initialized"
        );

        Self::from_parts(store, storage, tokens, Policy::new(config.tag_policy.clone()))
    }

    pub fn from_parts(
        store: Arc<dyn Store>,
        storage: &'static str,
        tokens: Arc<dyn TokenService>,
        policy: Policy,
    ) -> Self {
        Self {
            mutations: Arc::new(BlogMutations::new(store, policy)),
            tokens,
            storage,
        }
    }
}

#[cfg(feature = "postgres")]
async fn build_store(config: &AppConfig) -> (Arc<dyn Store>, &'static str) {
    use blog_infra::PostgresStore;
    use blog_infra::database::connect;

    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (Arc::new(InMemoryStore::new()), "memory");
    };

    match connect(db_config).await {
        Ok(conn) => (Arc::new(PostgresStore::new(conn)), "postgres"),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            (Arc::new(InMemoryStore::new()), "memory")
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store(_config: &AppConfig) -> (Arc<dyn Store>, &'static str) {
    tracing::info!("Running without postgres feature - using in-memory store");
    (Arc::new(InMemoryStore::new()), "memory")
}
