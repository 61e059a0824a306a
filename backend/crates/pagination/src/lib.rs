//! Page/take pagination primitives shared by Run IT list endpoints.
//!
//! Pages are one-based. A request for page `n` with `take` items skips
//! `(n - 1) * take` records of a stably ordered result set. Adapters fetch one
//! extra record ([`PageRequest::lookahead_limit`]) so the envelope can report
//! whether another page exists without a separate count query.
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(2, 10).expect("valid page request");
//! assert_eq!(request.offset(), 10);
//!
//! let rows: Vec<u32> = (11..=21).collect();
//! let page = Paginated::from_lookahead(request, rows);
//! assert_eq!(page.items.len(), 10);
//! assert!(page.has_more);
//! ```

use serde::{Deserialize, Serialize};

/// Page used when a request omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when a request omits `take`.
pub const DEFAULT_TAKE: u32 = 10;
/// Largest page size a client may request.
pub const MAX_TAKE: u32 = 100;

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are one-based; zero is rejected.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must contain at least one record.
    #[error("take must be at least 1")]
    ZeroTake,
    /// The requested page size exceeds [`MAX_TAKE`].
    #[error("take must be at most {max}, got {requested}")]
    TakeTooLarge {
        /// Largest accepted page size.
        max: u32,
        /// Page size supplied by the caller.
        requested: u32,
    },
}

/// Raw query parameters as received from an HTTP query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// One-based page number.
    pub page: Option<u32>,
    /// Number of records per page.
    pub take: Option<u32>,
}

/// Validated one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    take: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `take` is zero or `take`
    /// exceeds [`MAX_TAKE`].
    pub const fn new(page: u32, take: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if take == 0 {
            return Err(PageRequestError::ZeroTake);
        }
        if take > MAX_TAKE {
            return Err(PageRequestError::TakeTooLarge {
                max: MAX_TAKE,
                requested: take,
            });
        }
        Ok(Self { page, take })
    }

    /// Build a request from optional query parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Propagates the validation failures of [`PageRequest::new`].
    pub const fn from_query(query: PageQuery) -> Result<Self, PageRequestError> {
        let page = match query.page {
            Some(page) => page,
            None => DEFAULT_PAGE,
        };
        let take = match query.take {
            Some(take) => take,
            None => DEFAULT_TAKE,
        };
        Self::new(page, take)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Records per page.
    #[must_use]
    pub const fn take(&self) -> u32 {
        self.take
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.take as u64
    }

    /// Number of records adapters should fetch: one page plus one lookahead row.
    #[must_use]
    pub const fn lookahead_limit(&self) -> u64 {
        self.take as u64 + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            take: DEFAULT_TAKE,
        }
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Requested page size.
    pub take: u32,
    /// Whether at least one more record exists after this page.
    pub has_more: bool,
}

impl<T> Paginated<T> {
    /// Build an envelope from rows fetched with [`PageRequest::lookahead_limit`].
    ///
    /// Any rows beyond `take` are dropped and reported through `has_more`.
    #[must_use]
    pub fn from_lookahead(request: PageRequest, mut rows: Vec<T>) -> Self {
        let take = usize::try_from(request.take()).unwrap_or(usize::MAX);
        let has_more = rows.len() > take;
        rows.truncate(take);
        Self {
            items: rows,
            page: request.page(),
            take: request.take(),
            has_more,
        }
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            take: self.take,
            has_more: self.has_more,
        }
    }
}
