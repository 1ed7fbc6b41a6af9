use ::pagination::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::{env_parse, ConfigError, FromEnv};

/// Page size bounds applied by the domain services
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl PaginationConfig {
    pub fn limits(&self) -> PageLimits {
        PageLimits::new(self.default_page_size, self.max_page_size)
    }
}

impl FromEnv for PaginationConfig {
    /// Reads from environment variables with defaults:
    /// - PAGINATION_DEFAULT_SIZE: defaults to 20
    /// - PAGINATION_MAX_SIZE: defaults to 100
    fn from_env() -> Result<Self, ConfigError> {
        let default_page_size = env_parse("PAGINATION_DEFAULT_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_page_size = env_parse("PAGINATION_MAX_SIZE", MAX_PAGE_SIZE)?;

        if default_page_size == 0 {
            return Err(ConfigError::ParseError {
                key: "PAGINATION_DEFAULT_SIZE".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        if max_page_size < default_page_size {
            return Err(ConfigError::ParseError {
                key: "PAGINATION_MAX_SIZE".to_string(),
                details: format!("must be at least the default page size ({default_page_size})"),
            });
        }

        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}
