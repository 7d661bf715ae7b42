use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; when unset the DB_* parts are used as-is.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub api_secret: String,
    pub token_lifespan_hours: u64,
    pub refresh_lifespan_hours: u64,
    pub frontend_domain: String,
    pub secure_cookies: bool,
}

/// Upper bound for either token lifespan (ten years).
pub const MAX_LIFESPAN_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_SECRET must be set")]
    MissingSecret,

    #[error("{0} must be greater than zero")]
    ZeroLifespan(&'static str),

    #[error("{0} must not exceed {} hours", MAX_LIFESPAN_HOURS)]
    LifespanTooLong(&'static str),

    #[error("REFRESH_TOKEN_HOUR_LIFESPAN ({refresh}h) is shorter than TOKEN_HOUR_LIFESPAN ({access}h)")]
    RefreshShorterThanAccess { access: u64, refresh: u64 },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DB_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        // Server overrides
        if let Ok(v) = env::var("API_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Security overrides
        if let Ok(v) = env::var("API_SECRET") {
            self.security.api_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_HOUR_LIFESPAN") {
            self.security.token_lifespan_hours = v.parse().unwrap_or(self.security.token_lifespan_hours);
        }
        if let Ok(v) = env::var("REFRESH_TOKEN_HOUR_LIFESPAN") {
            self.security.refresh_lifespan_hours = v.parse().unwrap_or(self.security.refresh_lifespan_hours);
        }
        if let Ok(v) = env::var("FRONTEND_DOMAIN") {
            self.security.frontend_domain = v;
        }

        self
    }

    /// Checks the settings that must hold before the server may start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.security.token_lifespan_hours == 0 {
            return Err(ConfigError::ZeroLifespan("TOKEN_HOUR_LIFESPAN"));
        }
        if self.security.refresh_lifespan_hours == 0 {
            return Err(ConfigError::ZeroLifespan("REFRESH_TOKEN_HOUR_LIFESPAN"));
        }
        if self.security.token_lifespan_hours > MAX_LIFESPAN_HOURS {
            return Err(ConfigError::LifespanTooLong("TOKEN_HOUR_LIFESPAN"));
        }
        if self.security.refresh_lifespan_hours > MAX_LIFESPAN_HOURS {
            return Err(ConfigError::LifespanTooLong("REFRESH_TOKEN_HOUR_LIFESPAN"));
        }
        if self.security.refresh_lifespan_hours < self.security.token_lifespan_hours {
            return Err(ConfigError::RefreshShorterThanAccess {
                access: self.security.token_lifespan_hours,
                refresh: self.security.refresh_lifespan_hours,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                host: "127.0.0.1".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: "password".to_string(),
                name: "db_phone_review".to_string(),
                max_connections: 10,
                connection_timeout: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            security: SecurityConfig {
                api_secret: "supersecret".to_string(),
                token_lifespan_hours: 24,
                refresh_lifespan_hours: 168,
                frontend_domain: "http://localhost:3000".to_string(),
                secure_cookies: false,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                host: "127.0.0.1".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: String::new(),
                name: "db_phone_review".to_string(),
                max_connections: 20,
                connection_timeout: 5,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            security: SecurityConfig {
                // No default secret outside development
                api_secret: String::new(),
                token_lifespan_hours: 24,
                refresh_lifespan_hours: 168,
                frontend_domain: "http://localhost:3000".to_string(),
                secure_cookies: true,
            },
        }
    }

    /// Configuration used by tests and `serve --memory`.
    pub fn for_tests() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.security.api_secret, "supersecret");
        assert_eq!(config.security.token_lifespan_hours, 24);
        assert_eq!(config.security.refresh_lifespan_hours, 168);
        assert!(!config.security.secure_cookies);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_production_config_requires_secret() {
        let config = AppConfig::production();
        assert!(config.security.secure_cookies);
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));
    }

    #[test]
    fn rejects_refresh_shorter_than_access() {
        let mut config = AppConfig::development();
        config.security.refresh_lifespan_hours = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RefreshShorterThanAccess { access: 24, refresh: 1 })
        ));
    }

    #[test]
    fn rejects_lifespans_beyond_the_cap() {
        let mut config = AppConfig::development();
        config.security.refresh_lifespan_hours = u64::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LifespanTooLong("REFRESH_TOKEN_HOUR_LIFESPAN"))
        );

        config.security.token_lifespan_hours = MAX_LIFESPAN_HOURS + 1;
        assert_eq!(config.validate(), Err(ConfigError::LifespanTooLong("TOKEN_HOUR_LIFESPAN")));

        config.security.token_lifespan_hours = MAX_LIFESPAN_HOURS;
        config.security.refresh_lifespan_hours = MAX_LIFESPAN_HOURS;
        assert!(config.validate().is_ok());
    }
}
