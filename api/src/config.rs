//! Server configuration loaded from the environment.

use std::env;

use tg_core::services::token::TokenServiceConfig;

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// MySQL connection string
    pub database_url: String,
    /// Token service configuration
    pub token: TokenServiceConfig,
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        let defaults = TokenServiceConfig::default();

        let token = TokenServiceConfig {
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            access_token_expiry_minutes: env_i64(
                "ACCESS_TOKEN_EXPIRY_MINUTES",
                defaults.access_token_expiry_minutes,
            ),
            refresh_token_expiry_hours: env_i64(
                "REFRESH_TOKEN_EXPIRY_HOURS",
                defaults.refresh_token_expiry_hours,
            ),
        };

        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mysql://root@localhost:3306/tokengate".to_string()),
            token,
        }
    }
}
