//! Pagination utilities for service layer
//!
//! Lists are returned whole unless the caller asks for a page.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    /// Build from optional query values; `None` when neither was given.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Option<Self> {
        if page.is_none() && per_page.is_none() {
            return None;
        }
        let d = Self::default();
        Some(Self { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) })
    }

    /// Clamp to sane values and return `(offset, limit)`.
    pub fn normalize(self) -> (usize, usize) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        let offset = (page as usize - 1).saturating_mul(per_page as usize);
        (offset, per_page as usize)
    }

    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        let (offset, limit) = self.normalize();
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}
