use serde::{Deserialize, Serialize};

use super::DomainError;

/// 1-based page request with an upper bound on page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request, clamping `limit` to `max_limit`.
    ///
    /// `page` and `limit` must both be positive.
    pub fn new(page: u32, limit: u32, max_limit: u32) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::InvalidInput(
                "page must be greater than 0".to_string(),
            ));
        }
        if limit == 0 {
            return Err(DomainError::InvalidInput(
                "limit must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit: limit.min(max_limit.max(1)),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// One page of results plus the unpaginated total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}
