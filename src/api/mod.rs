//! API service modules for Up endpoints.
//!
//! Each service provides methods for one resource type. Services are generic
//! over the client: `XService<UpClient>` has async methods, and with the
//! `blocking` feature `XService<blocking::UpClient>` has the same methods
//! running on the calling thread.

mod accounts;
mod categories;
mod tags;
mod transactions;
mod webhooks;

use serde::Serialize;

pub use accounts::{AccountsQuery, AccountsService};
pub use categories::CategoriesService;
pub use tags::TagsService;
pub use transactions::{TransactionsQuery, TransactionsService};
pub use webhooks::WebhooksService;

/// Pagination options for listings without filters.
///
/// # Example
///
/// ```
/// use up_bank::api::ListOptions;
///
/// let options = ListOptions::default().limit(10).page_size(5);
/// assert_eq!(options.limit, Some(10));
/// ```
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ListOptions {
    /// Maximum number of elements the list will ever hold
    #[serde(skip)]
    pub limit: Option<usize>,
    /// Elements per page; defaults to the client's configured page size
    #[serde(rename = "page[size]", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ListOptions {
    /// Stop after `limit` elements.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request `page_size` elements per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Fill in the page size actually sent to the server.
    pub(crate) fn resolve(mut self, default_page_size: u32) -> Self {
        self.page_size = Some(effective_page_size(
            self.limit,
            self.page_size,
            default_page_size,
        ));
        self
    }
}

/// The `page[size]` to request: the configured size, reduced to `limit` when
/// fewer elements are wanted, and never below one.
pub(crate) fn effective_page_size(
    limit: Option<usize>,
    page_size: Option<u32>,
    default_page_size: u32,
) -> u32 {
    let page_size = page_size.unwrap_or(default_page_size);
    let page_size = match limit {
        Some(limit) => page_size.min(u32::try_from(limit).unwrap_or(u32::MAX)),
        None => page_size,
    };
    page_size.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_page_size() {
        assert_eq!(effective_page_size(None, None, 20), 20);
        assert_eq!(effective_page_size(Some(5), None, 20), 5);
        assert_eq!(effective_page_size(Some(50), Some(30), 20), 30);
        assert_eq!(effective_page_size(Some(0), None, 20), 1);
        assert_eq!(effective_page_size(None, Some(0), 20), 1);
    }

    #[test]
    fn test_list_options_query() {
        let options = ListOptions::default().limit(3).resolve(20);
        assert_eq!(options.page_size, Some(3));
        assert_eq!(
            serde_json::to_value(options).unwrap(),
            serde_json::json!({ "page[size]": 3 })
        );
    }
}
