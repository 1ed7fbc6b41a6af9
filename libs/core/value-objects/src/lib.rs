//! Self-validating value objects
//!
//! Each type checks its format once, at construction, and is immutable
//! afterwards. An invalid instance cannot exist: construction returns
//! [`ValueObjectError::InvalidFormat`] instead.

pub mod email;
pub mod error;
pub mod id;
pub mod password;
pub mod phone;

pub use email::Email;
pub use error::{ValueObjectError, ValueObjectResult};
pub use id::ResourceId;
pub use password::Password;
pub use phone::PhoneNumber;
