use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Invalid {concept}: '{value}'")]
    InvalidFormat { concept: &'static str, value: String },
}

pub type ValueObjectResult<T> = Result<T, ValueObjectError>;

impl ValueObjectError {
    pub fn invalid(concept: &'static str, value: impl Into<String>) -> Self {
        ValueObjectError::InvalidFormat {
            concept,
            value: value.into(),
        }
    }

    /// Name of the value object that rejected the input
    pub fn concept(&self) -> &'static str {
        match self {
            ValueObjectError::InvalidFormat { concept, .. } => concept,
        }
    }
}
