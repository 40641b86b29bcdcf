// src/utils/pagination.rs

/// Number of questions returned per listing page.
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Half-open row window `[start, stop)` over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: i64,
    pub stop: i64,
}

impl PageWindow {
    /// Value for the SQL `OFFSET` clause.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// Value for the SQL `LIMIT` clause.
    pub fn limit(&self) -> i64 {
        self.stop - self.start
    }
}

/// Maps a 1-based page number onto a row window.
///
/// Returns `None` for pages below 1 and for pages so large the window
/// would overflow; callers treat both as "no such page".
pub fn paginate(records_per_page: i64, page: i64) -> Option<PageWindow> {
    if records_per_page < 1 || page < 1 {
        return None;
    }

    let start = records_per_page.checked_mul(page - 1)?;
    let stop = records_per_page.checked_mul(page)?;

    Some(PageWindow { start, stop })
}
