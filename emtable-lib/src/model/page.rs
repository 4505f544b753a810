//! Page selection and paged view model.

use serde::Deserialize;
use serde::Serialize;

/// The page a table is showing.
///
/// `page_number` is 1-indexed and `page_size` is expected to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// Rows per page.
    pub page_size: usize,
    /// 1-indexed page number.
    pub page_number: usize,
}

impl PageState {
    /// Creates a page state.
    pub fn new(page_size: usize, page_number: usize) -> Self {
        Self {
            page_size,
            page_number,
        }
    }

    /// Returns a copy pointing at another page of the same size.
    pub fn with_page_number(self, page_number: usize) -> Self {
        Self {
            page_number,
            ..self
        }
    }

    /// Index of the first row of the page in the full row set.
    pub fn start(&self) -> usize {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Index one past the last row of the page in the full row set.
    pub fn end(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_number: 1,
        }
    }
}

/// One rendered page of rows plus pagination metadata.
///
/// `item_count` is the number of rows after filtering and before
/// pagination; `data` is the contiguous slice of those rows that falls on
/// the requested page, clamped to the available rows.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{PageState, PageVm};
///
/// let page = PageVm::slice(&[1, 2, 3, 4, 5], PageState::new(2, 3));
/// assert_eq!(page.data, vec![5]);
/// assert_eq!(page.item_count, 5);
/// assert_eq!(page.page_count(), 3);
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVm<T> {
    /// Rows per page.
    pub page_size: usize,
    /// 1-indexed page number.
    pub page_number: usize,
    /// Total rows across all pages.
    pub item_count: usize,
    /// Rows on this page.
    pub data: Vec<T>,
}

impl<T: Clone> PageVm<T> {
    /// Cuts the page described by `page` out of `rows`.
    pub fn slice(rows: &[T], page: PageState) -> Self {
        let start = page.start().min(rows.len());
        let end = page.end().min(rows.len()).max(start);
        Self {
            page_size: page.page_size,
            page_number: page.page_number,
            item_count: rows.len(),
            data: rows[start..end].to_vec(),
        }
    }
}

impl<T> PageVm<T> {
    /// Number of pages needed for all rows; at least 1.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.item_count.div_ceil(self.page_size).max(1)
    }

    /// Returns `true` if a later page has rows.
    pub fn has_next(&self) -> bool {
        self.page_number < self.page_count()
    }

    /// Returns `true` if this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// 1-based position of the first row on the page, 0 when empty.
    pub fn first_item_number(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last row on the page, 0 when empty.
    pub fn last_item_number(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.first_item_number() + self.data.len() - 1
        }
    }

    /// The page state this view was cut with.
    pub fn page_state(&self) -> PageState {
        PageState::new(self.page_size, self.page_number)
    }
}
