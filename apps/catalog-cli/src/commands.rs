//! Command handlers. Each run starts from empty in-memory storage.

use core_config::{ConfigError, env_required};
use domain_examples::{CreateExample, Example, ExampleService, InMemoryExampleRepository};
use domain_users::{InMemoryUserRepository, NewUser, UserService, UserView};
use eyre::{Result, WrapErr};
use pagination::{PageQuery, PageResult};
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Read when `--password` is not given, so it stays out of shell history
pub const PASSWORD_ENV: &str = "CATALOG_PASSWORD";

/// Seed the catalog from a JSON fixture and return one page of it
pub async fn list(
    config: &Config,
    fixture: &Path,
    search: Option<&str>,
    query: PageQuery,
) -> Result<PageResult<Example>> {
    let raw = tokio::fs::read_to_string(fixture)
        .await
        .wrap_err_with(|| format!("Failed to read fixture {}", fixture.display()))?;
    let inputs: Vec<CreateExample> =
        serde_json::from_str(&raw).wrap_err("Fixture must be a JSON array of examples")?;

    let service =
        ExampleService::with_limits(InMemoryExampleRepository::new(), config.pagination.limits());
    let seeded = inputs.len();
    for input in inputs {
        service.create(input).await?;
    }
    info!(seeded, fixture = %fixture.display(), "Seeded catalog");

    let request = query.normalize(service.limits());
    Ok(service.find_all(search, request).await?)
}

/// Register a user and return the stored view
pub async fn register(config: &Config, user: NewUser) -> Result<UserView> {
    let service =
        UserService::with_limits(InMemoryUserRepository::new(), config.pagination.limits());
    Ok(service.register(user).await?)
}

pub fn resolve_password(flag: Option<String>) -> Result<String, ConfigError> {
    match flag {
        Some(password) => Ok(password),
        None => env_required(PASSWORD_ENV),
    }
}
