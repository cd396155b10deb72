//! List request and response types.

use ad_core::config::StoreConfig;

/// Parameters of a single `List` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page size. Zero or negative selects the default; values
    /// above the maximum are capped.
    pub page_size: i32,
    /// Name of the last resource of the previous page. Empty means "start".
    pub page_token: Option<String>,
}

impl PageRequest {
    /// Request the first page with the given size.
    pub fn new(page_size: i32) -> Self {
        Self {
            page_size,
            page_token: None,
        }
    }

    /// Continue after the resource named by `token`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Page size after clamping to `limits`.
    pub fn normalized_size(&self, limits: &StoreConfig) -> usize {
        let limits = limits.limits();
        let size = if self.page_size <= 0 {
            limits.default_page_size
        } else {
            (self.page_size as u32).min(limits.max_page_size)
        };
        size as usize
    }

    /// The page token, if one was supplied and is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    /// Resources in this page, newest first.
    pub items: Vec<T>,
    /// Name of the last item when more entries follow it; `None` on the
    /// final page.
    pub next_page_token: Option<String>,
}
