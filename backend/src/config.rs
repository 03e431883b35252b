use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://courses.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "course_backend=debug";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// `EnvFilter` directives, from `RUST_LOG`.
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from the process environment, loading `.env` first if present.
    pub fn new_from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| AppError::Config(format!("BIND_ADDR is not a socket address: {}", bind_addr)))?;

        let log_filter = lookup("RUST_LOG")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("JWT_SECRET is not set".to_string()))?;

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            jwt_secret,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")]))
            .expect("Failed to build config");

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "1"),
            ("BIND_ADDR", "0.0.0.0:8000"),
            ("RUST_LOG", "course_backend=info,sqlx=warn"),
        ]))
        .expect("Failed to build config");

        assert_eq!(config.log_filter, "course_backend=info,sqlx=warn");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("BIND_ADDR", "localhost"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
