//! Pagination of song listings and lyrics
//!
//! Both listings and lyrics are paged by a 1-indexed page number and a page
//! size. Lyrics pages count verse blocks rather than rows.

use crate::error::ApiError;

/// Page used when the query does not name one
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the query does not name one
pub const DEFAULT_LIMIT: u32 = 10;

/// Verses are separated by a blank line
pub const VERSE_DELIMITER: &str = "\n\n";

/// Validated page request (`page >= 1`, `limit >= 1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Returns `None` when either value is zero
    pub fn new(page: u32, limit: u32) -> Option<Self> {
        (page >= 1 && limit >= 1).then_some(Self { page, limit })
    }

    /// Parse raw `page`/`limit` query values, applying defaults for absent ones
    ///
    /// # Examples
    /// ```
    /// use songlib_api::pagination::PageRequest;
    ///
    /// let p = PageRequest::from_query(Some("3"), None).unwrap();
    /// assert_eq!(p.page(), 3);
    /// assert_eq!(p.limit(), 10);
    /// assert_eq!(p.offset(), 20);
    ///
    /// assert!(PageRequest::from_query(Some("0"), None).is_err());
    /// ```
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, ApiError> {
        let page = parse_positive("page", page, DEFAULT_PAGE)?;
        let limit = parse_positive("limit", limit, DEFAULT_LIMIT)?;
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items before this page, saturating at `i64::MAX`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parse a path id; only positive integers are valid
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::BadRequest("Invalid id".to_string())),
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: u32) -> Result<u32, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ApiError::BadRequest(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

/// Select one page of verse blocks from lyrics text
///
/// A page that starts past the last verse is empty. The last page may hold
/// fewer than `limit` verses.
pub fn verse_page(text: &str, page: PageRequest) -> String {
    let verses: Vec<&str> = text.split(VERSE_DELIMITER).collect();

    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    if start >= verses.len() {
        return String::new();
    }
    let end = start.saturating_add(page.limit() as usize).min(verses.len());

    verses[start..end].join(VERSE_DELIMITER)
}
