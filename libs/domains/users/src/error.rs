use thiserror::Error;
use value_objects::{ResourceId, ValueObjectError};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(ResourceId),

    #[error(transparent)]
    InvalidFormat(#[from] ValueObjectError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;
