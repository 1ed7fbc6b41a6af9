//! Users Domain
//!
//! The `User` aggregate keeps itself valid by construction: contact fields
//! are value objects (`Email`, `PhoneNumber`, `Password`) and every change
//! goes through a transition that returns a new instance.
//!
//! # Features
//!
//! - Registration with Argon2 password hashing
//! - Profile updates and password changes
//! - Deactivation (users are never deleted)
//! - Paged listing with email search
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService};
//!
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{NewUser, ProfileUpdate, Role, User, UserFilter, UserRecord, UserView};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
