//! Configuration for the catalog CLI

use core_config::{ConfigError, Environment, FromEnv, PaginationConfig, env_or_default};

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub environment: Environment,
    pub pagination: PaginationConfig,
}

impl FromEnv for Config {
    /// Reads from environment variables:
    /// - APP_NAME: defaults to "catalog"
    /// - APP_ENV: "production" or anything else for development
    /// - PAGINATION_DEFAULT_SIZE / PAGINATION_MAX_SIZE: see [`PaginationConfig`]
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_name: env_or_default("APP_NAME", "catalog"),
            environment: Environment::from_env(),
            pagination: PaginationConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(
            [
                "APP_NAME",
                "APP_ENV",
                "PAGINATION_DEFAULT_SIZE",
                "PAGINATION_MAX_SIZE",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app_name, "catalog");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.pagination, PaginationConfig::default());
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("APP_NAME", Some("front-desk")),
                ("APP_ENV", Some("production")),
                ("PAGINATION_DEFAULT_SIZE", Some("5")),
                ("PAGINATION_MAX_SIZE", Some("25")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app_name, "front-desk");
                assert!(config.environment.is_production());
                assert_eq!(config.pagination.limits().max_size, 25);
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_pagination() {
        temp_env::with_vars(
            [
                ("PAGINATION_DEFAULT_SIZE", Some("50")),
                ("PAGINATION_MAX_SIZE", Some("10")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PAGINATION_MAX_SIZE"));
            },
        );
    }
}
