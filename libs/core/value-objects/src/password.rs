use std::fmt;

use crate::error::{ValueObjectError, ValueObjectResult};

const MIN_LENGTH: usize = 8;
const REDACTED: &str = "[redacted]";

/// A password, either plaintext that passed the strength rules or an
/// already-encrypted value read back from storage.
///
/// The wrapped value never appears in `Debug` output or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    value: String,
    encrypted: bool,
}

impl Password {
    pub const CONCEPT: &'static str = "password";

    /// Validate a plaintext password: at least 8 characters with one ASCII
    /// lowercase letter, one ASCII uppercase letter and one digit.
    pub fn new(plaintext: impl Into<String>) -> ValueObjectResult<Self> {
        let value = plaintext.into();

        let long_enough = value.chars().count() >= MIN_LENGTH;
        let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());

        if !(long_enough && has_lower && has_upper && has_digit) {
            return Err(ValueObjectError::invalid(Self::CONCEPT, REDACTED));
        }

        Ok(Self {
            value,
            encrypted: false,
        })
    }

    /// Wrap a stored hash without re-checking plaintext rules.
    ///
    /// Only storage rehydration and the hashing step may call this; user input
    /// always goes through [`Password::new`].
    pub fn from_encrypted(hash: impl Into<String>) -> Self {
        Self {
            value: hash.into(),
            encrypted: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("value", &REDACTED)
            .field("encrypted", &self.encrypted)
            .finish()
    }
}
