//! Service configuration module
//! Loads API settings from environment variables (after `.env` via dotenv)

use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use tracing::debug;

use crate::validation::{HeaderRules, MissingHeaderPolicy};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Which store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres(DatabaseConfig),
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load database configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let connection_string = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnv("DATABASE_URL".to_string()))?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid max_connections: {}", e)))?;

        if max_connections == 0 {
            return Err(ConfigError::InvalidConfig(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        debug!(
            "Database configuration loaded: max_connections={}",
            max_connections
        );

        Ok(DatabaseConfig {
            connection_string,
            max_connections,
        })
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` (`text` or `json`, default `text`)
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "text".to_string())
            .to_lowercase()
            .as_str()
        {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidConfig(format!(
                "Invalid LOG_FORMAT: {}",
                other
            ))),
        }
    }
}

/// Complete API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    pub store: StoreBackend,
    pub missing_header_policy: MissingHeaderPolicy,
    pub header_rules: HeaderRules,
}

impl ApiConfig {
    /// Load complete API configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid API_PORT: {}", e)))?;
        let listen_addr = format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid API_HOST: {}", e)))?;

        let store = match env::var("APP_STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres(DatabaseConfig::from_env()?),
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidConfig(format!(
                    "Invalid APP_STORE: {} (expected postgres or memory)",
                    other
                )))
            }
        };

        let missing_header_policy = env::var("MISSING_HEADER_POLICY")
            .unwrap_or_else(|_| "first".to_string())
            .parse::<MissingHeaderPolicy>()
            .map_err(ConfigError::InvalidConfig)?;

        Ok(ApiConfig {
            listen_addr,
            store,
            missing_header_policy,
            header_rules: HeaderRules::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment is process-global; serialise the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "API_HOST",
        "API_PORT",
        "APP_STORE",
        "DATABASE_URL",
        "DB_MAX_CONNECTIONS",
        "MISSING_HEADER_POLICY",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_memory_store_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();
        env::set_var("APP_STORE", "memory");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.missing_header_policy, MissingHeaderPolicy::First);
        assert_eq!(config.header_rules, HeaderRules::default());
        clear_env();
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();

        let err = ApiConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ref v) if v == "DATABASE_URL"));

        env::set_var("DATABASE_URL", "postgres://localhost/applications");
        env::set_var("DB_MAX_CONNECTIONS", "3");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Postgres(DatabaseConfig {
                connection_string: "postgres://localhost/applications".to_string(),
                max_connections: 3,
            })
        );
        clear_env();
    }

    #[test]
    fn test_invalid_values_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();
        env::set_var("APP_STORE", "memory");

        env::set_var("API_PORT", "not-a-port");
        assert!(matches!(ApiConfig::from_env(), Err(ConfigError::InvalidConfig(_))));
        env::remove_var("API_PORT");

        env::set_var("MISSING_HEADER_POLICY", "some");
        assert!(matches!(ApiConfig::from_env(), Err(ConfigError::InvalidConfig(_))));
        env::remove_var("MISSING_HEADER_POLICY");

        env::set_var("APP_STORE", "redis");
        assert!(matches!(ApiConfig::from_env(), Err(ConfigError::InvalidConfig(_))));
        clear_env();
    }

    #[test]
    fn test_log_format() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear_env();
        assert_eq!(LogFormat::from_env().unwrap(), LogFormat::Text);
        env::set_var("LOG_FORMAT", "JSON");
        assert_eq!(LogFormat::from_env().unwrap(), LogFormat::Json);
        env::set_var("LOG_FORMAT", "xml");
        assert!(LogFormat::from_env().is_err());
        clear_env();
    }
}
