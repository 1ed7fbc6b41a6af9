//! Examples Domain
//!
//! A generic paginated resource: create, read, full replace, single-field
//! patch, delete and free-text search over the [`Example`] aggregate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← NotFound checks, search filter, patch dispatch
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Persistence port (trait + in-memory adapter)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Aggregate, DTOs, patch variants, filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_examples::{InMemoryExampleRepository, ExampleService};
//!
//! let repository = InMemoryExampleRepository::new();
//! let service = ExampleService::new(repository);
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ExampleError, ExampleResult};
pub use models::{
    CreateExample, Example, ExampleFilter, ExamplePatch, PatchRequest, ReplaceExample,
};
pub use repository::{ExampleRepository, InMemoryExampleRepository};
pub use service::{ExampleService, SEARCH_FIELD};
