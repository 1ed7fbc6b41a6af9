use serde::{Deserialize, Serialize};

/// One page of a listing plus the totals needed to navigate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items on this page, in listing order
    pub items: Vec<T>,
    /// Number of matching items across all pages
    pub total: u64,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// `items.is_empty()`
    pub empty: bool,
    /// `ceil(total / size)`, or 0 for a zero size
    pub pages: u64,
}

impl<T> PageResult<T> {
    /// Build a result and derive `empty` and `pages`.
    pub fn from_raw(items: Vec<T>, total: u64, page: u32, size: u32) -> Self {
        let pages = match size {
            0 => 0,
            s => total.div_ceil(u64::from(s)),
        };

        Self {
            empty: items.is_empty(),
            items,
            total,
            page,
            size,
            pages,
        }
    }

    /// Convert the items, keeping order and totals
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            empty: self.empty,
            pages: self.pages,
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.pages
    }
}
