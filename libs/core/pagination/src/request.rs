use serde::{Deserialize, Serialize};

use crate::sort::SortOrder;

/// Page size used when a caller omits one or sends a non-positive value
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound applied to caller-supplied page sizes
pub const MAX_PAGE_SIZE: u32 = 100;

/// Bounds used when normalizing page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl PageLimits {
    /// Build limits, keeping `1 <= default_size <= max_size`.
    pub fn new(default_size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        Self {
            default_size: default_size.clamp(1, max_size),
            max_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Raw listing parameters as a caller sends them (query string, RPC message).
///
/// Nothing is trusted: values may be missing, negative or oversized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// `property[,direction]` entries, e.g. `name,desc`
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PageQuery {
    /// Turn raw parameters into a valid [`PageRequest`]. Never fails.
    pub fn normalize(&self, limits: &PageLimits) -> PageRequest {
        let page = self
            .page
            .filter(|p| *p > 0)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(0);

        let size = match self.size {
            Some(s) if s > 0 => u32::try_from(s).unwrap_or(u32::MAX),
            _ => 0,
        };

        let sort = self
            .sort
            .iter()
            .filter_map(|raw| SortOrder::parse(raw))
            .collect();

        PageRequest { page, size, sort }.normalize(limits)
    }
}

/// A normalized request for one page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Items per page
    pub size: u32,
    /// Sort keys in priority order
    #[serde(default)]
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    /// First page with the default size
    pub fn first(limits: &PageLimits) -> Self {
        Self::new(0, limits.default_size)
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Clamp the size into `1..=limits.max_size`, substituting the default for
    /// zero. Idempotent.
    pub fn normalize(self, limits: &PageLimits) -> Self {
        let size = match self.size {
            0 => limits.default_size,
            s => s.min(limits.max_size),
        };

        Self { size, ..self }
    }

    /// Number of items to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Select this page's window out of an already filtered and sorted listing
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.size).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(&PageLimits::default())
    }
}
