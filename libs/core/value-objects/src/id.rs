use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValueObjectError;

/// Numeric identifier of a persisted aggregate.
///
/// `0` is the "not yet persisted" placeholder; storage assigns the real value
/// on first save.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    pub const CONCEPT: &'static str = "identifier";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Placeholder for an aggregate that storage has not seen yet
    pub fn generate() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_persisted(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ResourceId> for u64 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for ResourceId {
    type Error = ValueObjectError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| ValueObjectError::invalid(Self::CONCEPT, value.to_string()))
    }
}

impl FromStr for ResourceId {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ValueObjectError::invalid(Self::CONCEPT, s))
    }
}
