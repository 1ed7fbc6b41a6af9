use thiserror::Error;
use value_objects::{ResourceId, ValueObjectError};

#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("Example not found: {0}")]
    NotFound(ResourceId),

    #[error(transparent)]
    InvalidFormat(#[from] ValueObjectError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ExampleResult<T> = Result<T, ExampleError>;

impl From<validator::ValidationErrors> for ExampleError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ExampleError::Validation(errors.to_string())
    }
}
