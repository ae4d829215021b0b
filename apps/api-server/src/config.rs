//! Application configuration loaded from environment variables.

use std::env;

use blog_core::TagPolicy;
use blog_infra::{DatabaseConfig, JwtConfig};

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TAG_WRITE_POLICY: {0}")]
    TagPolicy(String),

    #[error("invalid {name}: '{value}'")]
    Number { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub tag_policy: TagPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = match env::var("DATABASE_URL") {
            Ok(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_var("DB_MIN_CONNECTIONS", 10)?,
            }),
            Err(_) => None,
        };

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parse_var("JWT_EXPIRATION_HOURS", defaults.expiration_hours)?,
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        let tag_policy = match env::var("TAG_WRITE_POLICY") {
            Ok(raw) => raw.parse::<TagPolicy>().map_err(ConfigError::TagPolicy)?,
            Err(_) => TagPolicy::default(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            database,
            jwt,
            tag_policy,
        })
    }

    /// Log loudly about settings that are only acceptable in development.
    pub fn warn_on_insecure_defaults(&self) {
        if !self.jwt.uses_default_secret() {
            return;
        }

        let is_production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        if is_production {
            tracing::error!(
                "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
            );
        } else {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Number { name, value }),
        Err(_) => Ok(default),
    }
}
