//! Storage-agnostic pagination primitives
//!
//! Domain services describe "page P of size S, sorted by O" with a
//! [`PageRequest`] and hand back a [`PageResult`]. Neither type knows about a
//! database or ORM paging API, so repository adapters translate to and from
//! their own paging types at the edge.
//!
//! # Usage
//!
//! ```rust
//! use pagination::{PageLimits, PageQuery, PageResult};
//!
//! let request = PageQuery {
//!     page: Some(-3),
//!     size: Some(500),
//!     sort: vec!["name,desc".to_string()],
//! }
//! .normalize(&PageLimits::default());
//!
//! assert_eq!(request.page, 0);
//! assert_eq!(request.size, 100);
//!
//! let result = PageResult::from_raw(vec!["a", "b"], 42, request.page, request.size);
//! assert_eq!(result.pages, 1);
//! ```

pub mod request;
pub mod result;
pub mod sort;

pub use request::{PageLimits, PageQuery, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use result::PageResult;
pub use sort::{SortDirection, SortOrder, sort_by_orders};
