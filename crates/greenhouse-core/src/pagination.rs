//! Paginated result envelope.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::criteria::Pagination;

/// One page of items together with the unpaginated match count.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    /// Items on this page, at most `per_page` of them.
    pub items: Vec<T>,
    /// Number of items matching the filters, ignoring pagination.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
}

impl<T> PaginatedResult<T> {
    /// Creates a result for the given pagination.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page(),
            per_page: pagination.per_page(),
        }
    }

    /// A page with no items and a zero total.
    #[must_use]
    pub fn empty(pagination: &Pagination) -> Self {
        Self::new(Vec::new(), 0, pagination)
    }

    /// `ceil(total / per_page)`, or 0 when nothing matched.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// Converts each item, keeping the paging fields.
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl<T: Serialize> Serialize for PaginatedResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PaginatedResult", 5)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("per_page", &self.per_page)?;
        state.serialize_field("total_pages", &self.total_pages())?;
        state.end()
    }
}

/// Number of items a correct repository returns for `total` matches.
#[must_use]
pub fn expected_page_len(total: u64, pagination: &Pagination) -> u64 {
    let remaining = total.saturating_sub(pagination.skip());
    remaining.min(pagination.limit())
}
