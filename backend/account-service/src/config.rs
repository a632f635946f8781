/// Configuration management
use serde::Deserialize;
use std::fmt;

/// Upper bound for `TOKEN_TTL_HOURS` (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Process configuration, read once at startup from the environment
///
/// | variable | default |
/// |---|---|
/// | `APP_HOST` | `0.0.0.0` |
/// | `APP_PORT` | `8080` |
/// | `DATABASE_URL` | required |
/// | `DATABASE_MAX_CONNECTIONS` | `10` |
/// | `JWT_SECRET` | required |
/// | `TOKEN_TTL_HOURS` | `24` |
/// | `RUN_MIGRATIONS` | `true` |
/// | `LOG_FORMAT` | `text` (`json` for structured logs) |
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_host")]
    pub app_host: String,

    #[serde(default = "default_app_port")]
    pub app_port: u16,

    pub database_url: String,

    #[serde(default = "default_db_max_connections")]
    pub database_max_connections: u32,

    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,

    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// Default value functions
fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_token_ttl_hours() -> i64 {
    crypto_core::jwt::SESSION_TOKEN_EXPIRY_HOURS
}

fn default_run_migrations() -> bool {
    true
}

fn default_log_format() -> String {
    "text".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET must not be empty"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_HOURS must be positive"));
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::Invalid(
                "TOKEN_TTL_HOURS must not exceed one year (8760)",
            ));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_host", &self.app_host)
            .field("app_port", &self.app_port)
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("run_migrations", &self.run_migrations)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/accounts"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.app_host, "0.0.0.0");
        assert_eq!(config.app_port, 8080);
        assert_eq!(config.token_ttl_hours, 24);
        assert!(config.run_migrations);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result: Result<Config, _> =
            envy::from_iter(vars(&[("DATABASE_URL", "postgres://localhost/accounts")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_secret_rejected() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/accounts"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_token_ttl_bounds() {
        let config_with_ttl = |ttl: &str| -> Config {
            envy::from_iter(vars(&[
                ("DATABASE_URL", "postgres://localhost/accounts"),
                ("JWT_SECRET", "s3cret"),
                ("TOKEN_TTL_HOURS", ttl),
            ]))
            .unwrap()
        };

        assert!(config_with_ttl("8760").validate().is_ok());
        assert!(matches!(
            config_with_ttl("8761").validate(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config_with_ttl("1000000000000").validate(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config_with_ttl("0").validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://user:hunter2@db/accounts"),
            ("JWT_SECRET", "s3cret"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
        assert!(config.json_logs());
    }
}
