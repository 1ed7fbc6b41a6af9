use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use value_objects::ResourceId;

use crate::error::{ExampleError, ExampleResult};

pub const NAME_MAX_LENGTH: u64 = 100;
pub const DESCRIPTION_MAX_LENGTH: u64 = 500;

/// Rejects values made only of whitespace
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// The generic resource managed by [`crate::ExampleService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Example {
    /// `None` until storage assigns one
    pub id: Option<ResourceId>,
    #[validate(
        length(min = 1, max = NAME_MAX_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(
        length(max = DESCRIPTION_MAX_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an example
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateExample {
    #[validate(
        length(min = 1, max = NAME_MAX_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LENGTH))]
    pub description: Option<String>,
}

/// DTO for a full replace. Every field overwrites, an absent description
/// clears the stored one.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ReplaceExample {
    #[validate(
        length(min = 1, max = NAME_MAX_LENGTH),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LENGTH))]
    pub description: Option<String>,
}

/// Untyped partial update as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatchRequest {
    pub property: String,
    pub value: String,
}

impl PatchRequest {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// The closed set of fields a patch may touch.
///
/// The identifier and timestamps have no variant and cannot be patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamplePatch {
    Name(String),
    Description(String),
}

impl ExamplePatch {
    pub const NAME: &'static str = "name";
    pub const DESCRIPTION: &'static str = "description";

    pub fn property(&self) -> &'static str {
        match self {
            ExamplePatch::Name(_) => Self::NAME,
            ExamplePatch::Description(_) => Self::DESCRIPTION,
        }
    }
}

impl TryFrom<PatchRequest> for ExamplePatch {
    type Error = ExampleError;

    fn try_from(request: PatchRequest) -> Result<Self, Self::Error> {
        match request.property.as_str() {
            Self::NAME => Ok(ExamplePatch::Name(request.value)),
            Self::DESCRIPTION => Ok(ExamplePatch::Description(request.value)),
            _ => Err(ExampleError::UnknownProperty(request.property)),
        }
    }
}

/// By-example filter. `None` fields are wildcards; text fields match by
/// case-insensitive substring.
///
/// Only `name` and `description` take part in matching. The identifier and
/// timestamps are never filtered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExampleFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ExampleFilter {
    pub fn by_name(text: impl Into<String>) -> Self {
        Self {
            name: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, example: &Example) -> bool {
        let name_matches = self
            .name
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&example.name, needle));

        let description_matches = match self.description.as_deref() {
            None => true,
            Some(needle) => example
                .description
                .as_deref()
                .is_some_and(|haystack| contains_ignore_case(haystack, needle)),
        };

        name_matches && description_matches
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Example {
    /// Build an unsaved example, checking the aggregate invariants
    pub fn new(name: impl Into<String>, description: Option<String>) -> ExampleResult<Self> {
        let now = Utc::now();
        let example = Self {
            id: None,
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
        };
        example.validate()?;
        Ok(example)
    }

    pub fn from_input(input: CreateExample) -> ExampleResult<Self> {
        Self::new(input.name, input.description)
    }

    /// Copy with every mutable field taken from `replacement`
    pub fn replaced(&self, replacement: ReplaceExample) -> ExampleResult<Self> {
        let example = Self {
            name: replacement.name,
            description: replacement.description,
            updated_at: Utc::now(),
            ..self.clone()
        };
        example.validate()?;
        Ok(example)
    }

    /// Copy with exactly one field changed
    pub fn patched(&self, patch: ExamplePatch) -> ExampleResult<Self> {
        let mut example = self.clone();
        match patch {
            ExamplePatch::Name(name) => example.name = name,
            ExamplePatch::Description(description) => example.description = Some(description),
        }
        example.updated_at = Utc::now();
        example.validate()?;
        Ok(example)
    }

    /// Copy carrying a storage-assigned identifier
    pub fn with_id(&self, id: ResourceId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }
}
