//! Shared test utilities for domain testing
//!
//! - `TestDataBuilder`: deterministic names, emails and phone numbers
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("my_test");
//! let room = builder.name("room", "main");
//! let email = builder.email("guest");
//! assert!(email.ends_with("@hotel.test"));
//! ```

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same values, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unique name, e.g. `test-room-12345-main`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Unique, well-formed email address for a label
    pub fn email(&self, label: &str) -> String {
        format!("{}.{}@hotel.test", label, self.seed)
    }

    /// Well-formed E.164 number derived from the seed
    pub fn phone(&self) -> String {
        // leading 1 keeps the first digit non-zero, 12 digits in total
        format!("+1{:011}", self.seed % 100_000_000_000)
    }

    /// A plaintext password that satisfies the strength rules
    pub fn password(&self) -> String {
        format!("Passw0rd{}", self.seed % 1_000_000)
    }
}

/// Test assertion helpers
pub mod assertions {
    use value_objects::ResourceId;

    /// Assert that two identifiers are equal with a nice error message
    pub fn assert_id_eq(actual: ResourceId, expected: ResourceId, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected id {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
