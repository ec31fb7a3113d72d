//! Page-number pagination primitives for the users backend.
//!
//! [`PageRequest`] carries a zero-based page number and a page size. Both are
//! validated on construction so repositories can compute offsets without
//! re-checking bounds. [`Page`] is the bounded slice a repository returns, and
//! [`PageEnvelope`] is its wire representation with the derived counters
//! clients expect (`total_pages`, `first`, `last`, and so on).
//!
//! ```
//! use pagination::{Page, PageEnvelope, PageRequest};
//!
//! let request = PageRequest::new(1, 2).expect("valid request");
//! let page = Page::new(vec!["c", "d"], request, 5);
//! let envelope = PageEnvelope::from(page);
//! assert_eq!(envelope.total_pages, 3);
//! assert!(!envelope.last);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when a caller does not supply one.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;

/// Page size used when a caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page number was below zero.
    #[error("page number must not be negative (got {value})")]
    NegativePage {
        /// Rejected page number.
        value: i64,
    },
    /// The page size was zero or below.
    #[error("page size must be at least 1 (got {value})")]
    NonPositiveSize {
        /// Rejected page size.
        value: i64,
    },
    /// A value did not fit the supported range.
    #[error("{field} is too large (got {value})")]
    OutOfRange {
        /// Name of the offending component.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },
}

/// Zero-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request, rejecting a zero page size.
    ///
    /// # Errors
    /// Returns [`PageRequestError::NonPositiveSize`] when `size` is zero.
    pub const fn new(number: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::NonPositiveSize { value: 0 });
        }
        Ok(Self { number, size })
    }

    /// Build a request from signed values as they arrive from query strings.
    ///
    /// # Errors
    /// Returns [`PageRequestError::NegativePage`] for a negative page number,
    /// [`PageRequestError::NonPositiveSize`] for a size below one, and
    /// [`PageRequestError::OutOfRange`] when either value exceeds `u32`.
    pub fn from_signed(number: i64, size: i64) -> Result<Self, PageRequestError> {
        if number < 0 {
            return Err(PageRequestError::NegativePage { value: number });
        }
        if size < 1 {
            return Err(PageRequestError::NonPositiveSize { value: size });
        }
        let page_number = u32::try_from(number).map_err(|_| PageRequestError::OutOfRange {
            field: "page",
            value: number,
        })?;
        let page_size = u32::try_from(size).map_err(|_| PageRequestError::OutOfRange {
            field: "size",
            value: size,
        })?;
        Self::new(page_number, page_size)
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPageRequest {
    page: i64,
    size: i64,
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: i64::from(value.number),
            size: i64::from(value.size),
        }
    }
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::from_signed(value.page, value.size)
    }
}

/// Ordered slice of items for one [`PageRequest`], plus the total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Build a page from the items a store returned for `request`.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            request,
            total_elements,
        }
    }

    /// Page with no items and a zero total.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page in store order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Request that produced this page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to hold `total_elements`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.request.size as u64)
    }

    /// Whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.request.number == 0
    }

    /// Whether no further page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        (self.request.number as u64) + 1 >= self.total_pages()
    }

    /// Whether the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}

/// Serialisable page representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    /// Items on the page.
    pub content: Vec<T>,
    /// Zero-based page number.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
    /// Total items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Number of items on this page.
    pub number_of_elements: usize,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
    /// Whether the page holds no items.
    pub empty: bool,
}

impl<T> From<Page<T>> for PageEnvelope<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();
        let request = page.request;
        let total_elements = page.total_elements;
        let content = page.items;
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number: request.number,
            size: request.size,
            total_elements,
            total_pages,
            first,
            last,
        }
    }
}
