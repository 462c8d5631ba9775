use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "marketCap")]
    MarketCap,
    #[serde(rename = "24hVolume")]
    Volume24h,
    #[serde(rename = "change")]
    Change,
    #[serde(rename = "listedAt")]
    ListedAt,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Query string sent to `GET /coins`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_SIZE)
    }
}

impl SearchParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            order_by: None,
            order_direction: None,
        }
    }

    /// Params for the single top-ranked coin.
    pub fn first_coin() -> Self {
        Self::with_limit(1)
    }

    /// Moves to the page described by `pagination`, keeping the sort.
    pub fn paged(&self, pagination: Pagination) -> Result<Self, DashboardError> {
        let (limit, offset) = pagination.limit_offset()?;
        Ok(Self {
            limit,
            offset,
            ..self.clone()
        })
    }

    /// Applies a new sort and jumps back to the first page.
    pub fn sorted(&self, sort: Sort) -> Self {
        Self {
            limit: self.limit,
            offset: 0,
            order_by: Some(sort.order_by),
            order_direction: Some(sort.order_direction),
        }
    }

    /// One-based page the offset falls on.
    pub fn current_page(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }
}

/// Table change event: which page is showing and how big pages are.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn limit_offset(&self) -> Result<(u32, u32), DashboardError> {
        if self.current == 0 || self.page_size == 0 {
            return Err(DashboardError::InvalidPagination(format!(
                "page {} with size {}",
                self.current, self.page_size
            )));
        }
        let offset = self
            .page_size
            .checked_mul(self.current - 1)
            .ok_or_else(|| {
                DashboardError::InvalidPagination(format!(
                    "offset overflows for page {} with size {}",
                    self.current, self.page_size
                ))
            })?;
        Ok((self.page_size, offset))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub order_by: OrderBy,
    pub order_direction: OrderDirection,
}

pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64)
}
