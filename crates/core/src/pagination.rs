//! Page-number pagination with a fixed page size.

use serde::Serialize;

use crate::validation::{non_empty, ValidationErrors};

/// Records per page for every public listing.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Query-string name of the page selector.
pub const PAGE_FIELD: &str = "page";

/// A 1-indexed page window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub per_page: u32,
}

impl PageWindow {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1).saturating_mul(i64::from(self.per_page))
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pagination metadata returned alongside every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: i64,
    pub last_page: i64,
    /// 1-based position of the first record on this page.
    pub from: Option<i64>,
    /// 1-based position of the last record on this page.
    pub to: Option<i64>,
}

impl PageMeta {
    pub fn new(window: PageWindow, total: i64, returned: usize) -> Self {
        let per_page = i64::from(window.per_page);
        let last_page = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        let (from, to) = if returned == 0 {
            (None, None)
        } else {
            let from = window.offset() + 1;
            (Some(from), Some(from + returned as i64 - 1))
        };

        Self {
            current_page: window.page,
            per_page: window.per_page,
            total,
            last_page,
            from,
            to,
        }
    }
}

/// `{ "data": [...], "meta": {...} }` listing envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, window: PageWindow, total: i64) -> Self {
        let meta = PageMeta::new(window, total, data.len());
        Self { data, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Validate the raw `page` parameter, recording violations into `errors`.
///
/// Returns page 1 when the parameter is absent or invalid; callers must check
/// `errors` before using the result.
pub fn parse_page(raw: Option<&str>, errors: &mut ValidationErrors) -> u32 {
    let Some(raw) = non_empty(raw) else {
        return 1;
    };
    match raw.parse::<i64>() {
        Ok(n) if n < 1 => {
            errors.add(PAGE_FIELD, "min", "The page field must be at least 1.");
            1
        }
        Ok(n) => match u32::try_from(n) {
            Ok(page) => page,
            Err(_) => {
                errors.add(PAGE_FIELD, "max", "The page field is too large.");
                1
            }
        },
        Err(_) => {
            errors.add(PAGE_FIELD, "integer", "The page field must be an integer.");
            1
        }
    }
}
