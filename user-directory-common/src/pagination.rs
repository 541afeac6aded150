//! Pagination descriptor and list query parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// `{page, limit, total, totalPages}` as reported alongside a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Describe page `page` of `total` items split into pages of `limit`.
    ///
    /// `total_pages` is `ceil(total / limit)`, or zero when `limit` is not positive.
    pub fn new(page: i64, limit: i64, total: u64) -> Self {
        let total_pages = match u64::try_from(limit) {
            Ok(limit) if limit > 0 => total.div_ceil(limit),
            _ => 0,
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// `[start, end)` bounds of this page, before clamping to the collection.
    ///
    /// `None` when the page can never contain anything (`page < 1` or `limit < 1`).
    pub fn window(&self) -> Option<(usize, usize)> {
        if self.page < 1 || self.limit < 1 {
            return None;
        }
        let start = (self.page - 1).checked_mul(self.limit)?;
        let start = usize::try_from(start).ok()?;
        let limit = usize::try_from(self.limit).ok()?;
        Some((start, start.saturating_add(limit)))
    }

    /// The items of `all` that fall on this page. Out-of-range pages are empty.
    pub fn slice<'a, T>(&self, all: &'a [T]) -> &'a [T] {
        match self.window() {
            Some((start, end)) if start < all.len() => &all[start..end.min(all.len())],
            _ => &[],
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT, 0)
    }
}

/// Parameters of a list request as issued by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ListUsersParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Query-string pairs for this request. Zero numbers and empty strings are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            query.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(role) = self.role.as_deref().filter(|r| !r.is_empty()) {
            query.push(("role", role.to_string()));
        }
        query
    }
}
