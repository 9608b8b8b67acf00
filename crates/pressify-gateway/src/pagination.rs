//! Page-number pagination over the CMS's cursor-based connections.
//!
//! The upstream connection is cursor-based; callers think in page number and
//! page size. The cursor for page *n* is derived by treating the result set
//! as a zero-indexed sequence and encoding position `(n − 1) × size − 1`,
//! the item just before the requested page.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pressify_core::Post;
use serde::{Deserialize, Serialize};

/// Default listing page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter and pagination inputs for the post listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    /// 1-based page number. Values below 1 are treated as 1.
    pub page: usize,

    /// Page size. Values below 1 are treated as 1.
    pub per_page: usize,

    /// Restrict to posts attached to any of these category ids.
    pub category_ids: Vec<i64>,

    /// Free-text search string, passed through to the CMS search semantics.
    pub search: Option<String>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            category_ids: Vec::new(),
            search: None,
        }
    }
}

impl PostFilter {
    /// Clamp page and page size to their minimums.
    pub(crate) fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.max(1),
            category_ids: self.category_ids.clone(),
            search: self.search.clone(),
        }
    }
}

/// Compute the pagination cursor for a page request.
///
/// Page 1 starts from the beginning of the sequence and sends no cursor.
pub fn page_cursor(page: usize, per_page: usize) -> Option<String> {
    if page <= 1 {
        return None;
    }
    let index = (page - 1) * per_page.max(1) - 1;
    Some(BASE64.encode(format!("arrayconnection:{index}")))
}

/// One page of the post listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    /// Posts on this page, newest first.
    pub posts: Vec<Post>,

    /// Number of items on this page. The CMS exposes no result-set total on
    /// this connection, so this is a lower bound on the true total, not an
    /// authoritative count.
    pub total: usize,

    /// `ceil(total / per_page)`, with the same lower-bound caveat.
    pub total_pages: usize,

    /// Whether the CMS reports more results after this page. Unlike `total`
    /// this is authoritative.
    pub has_next_page: bool,
}

impl PostPage {
    /// The empty listing, used as the safe fallback representation.
    pub fn empty() -> Self {
        Self {
            posts: Vec::new(),
            total: 0,
            total_pages: 0,
            has_next_page: false,
        }
    }

    /// Shape a page from fetched posts.
    pub(crate) fn from_posts(posts: Vec<Post>, per_page: usize, has_next_page: bool) -> Self {
        let total = posts.len();
        let total_pages = total.div_ceil(per_page.max(1));
        Self {
            posts,
            total,
            total_pages,
            has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(cursor: &str) -> String {
        String::from_utf8(BASE64.decode(cursor).expect("base64")).expect("utf8")
    }

    #[test]
    fn test_first_page_has_no_cursor() {
        assert_eq!(page_cursor(1, 10), None);
        assert_eq!(page_cursor(0, 10), None);
    }

    #[test]
    fn test_cursor_position_formula() {
        // Page n, size p -> position (n-1)*p - 1.
        assert_eq!(decode(&page_cursor(2, 10).expect("cursor")), "arrayconnection:9");
        assert_eq!(decode(&page_cursor(3, 10).expect("cursor")), "arrayconnection:19");
        assert_eq!(decode(&page_cursor(2, 2).expect("cursor")), "arrayconnection:1");
        assert_eq!(decode(&page_cursor(5, 7).expect("cursor")), "arrayconnection:27");
        assert_eq!(decode(&page_cursor(2, 1).expect("cursor")), "arrayconnection:0");
        // Degenerate page size clamps to 1 instead of underflowing.
        assert_eq!(page_cursor(2, 0), page_cursor(2, 1));
    }

    #[test]
    fn test_filter_normalization() {
        let filter = PostFilter {
            page: 0,
            per_page: 0,
            ..PostFilter::default()
        };
        let normalized = filter.normalized();
        assert_eq!(normalized.page, 1);
        assert_eq!(normalized.per_page, 1);
    }

    #[test]
    fn test_filter_defaults() {
        let filter = PostFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, DEFAULT_PAGE_SIZE);
        assert!(filter.category_ids.is_empty());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_page_shaping() {
        let page = PostPage::from_posts(Vec::new(), 10, false);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert_eq!(page, PostPage::empty());
    }
}
