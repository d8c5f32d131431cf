//! Tags service.

#[cfg(feature = "blocking")]
use crate::client::{blocking, PaginatedList};
use crate::client::{AsyncPaginatedList, UpClient};
use crate::models::Tag;
use crate::Result;

use super::ListOptions;

/// Service for listing tags.
///
/// Tags are created implicitly by
/// [`TransactionsService::add_tags`](super::TransactionsService).
#[derive(Debug, Clone)]
pub struct TagsService<C> {
    client: C,
}

impl<C> TagsService<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

impl TagsService<UpClient> {
    /// List tags in use, alphabetically, lazily paginated.
    pub async fn list(&self, options: ListOptions) -> Result<AsyncPaginatedList<Tag, UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client.get_list("/tags", &options, options.limit).await
    }
}

#[cfg(feature = "blocking")]
impl TagsService<blocking::UpClient> {
    /// List tags in use, alphabetically, lazily paginated.
    pub fn list(&self, options: ListOptions) -> Result<PaginatedList<Tag, blocking::UpClient>> {
        let options = options.resolve(self.client.config().page_size);
        self.client.get_list("/tags", &options, options.limit)
    }
}
