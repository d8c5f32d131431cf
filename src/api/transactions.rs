//! Transactions service.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[cfg(feature = "blocking")]
use crate::client::{blocking, PaginatedList};
use crate::client::{AsyncPaginatedList, UpClient};
use crate::models::{
    AccountId, CategoryId, Document, ResourceIdentifier, TagId, Transaction, TransactionId,
    TransactionStatus,
};
use crate::Result;

use super::effective_page_size;

/// Service for transaction operations.
///
/// # Example
///
/// ```no_run
/// use futures_util::TryStreamExt;
/// use up_bank::api::TransactionsQuery;
/// use up_bank::models::{AccountId, TransactionStatus};
///
/// # async fn example(client: up_bank::UpClient) -> up_bank::Result<()> {
/// let account = AccountId::new("7b3121f9-40f3-4230-bdd7-6709e68426fb");
///
/// let mut held = client
///     .transactions()
///     .list(
///         TransactionsQuery::default()
///             .account(account)
///             .status(TransactionStatus::Held),
///     )
///     .await?;
///
/// let held: Vec<_> = held.stream().try_collect().await?;
/// println!("{} pending transaction(s)", held.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TransactionsService<C> {
    client: C,
}

/// Filters and pagination for listing transactions.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TransactionsQuery {
    /// Only list transactions of this account; all accounts when `None`
    #[serde(skip)]
    pub account: Option<AccountId>,
    /// Only return held or only settled transactions
    #[serde(rename = "filter[status]", skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// Only return transactions created at or after this time
    #[serde(rename = "filter[since]", skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Only return transactions created before this time
    #[serde(rename = "filter[until]", skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    /// Only return transactions in this category
    #[serde(rename = "filter[category]", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Only return transactions with this tag
    #[serde(rename = "filter[tag]", skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagId>,
    /// Maximum number of transactions the list will ever hold
    #[serde(skip)]
    pub limit: Option<usize>,
    /// Transactions per page
    #[serde(rename = "page[size]", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl TransactionsQuery {
    /// Only list transactions of this account.
    pub fn account(mut self, account: impl Into<AccountId>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Only return transactions with this status.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only return transactions created at or after `since`.
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Only return transactions created before `until`.
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Only return transactions in this category.
    pub fn category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Only return transactions with this tag.
    pub fn tag(mut self, tag: impl Into<TagId>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Stop after `limit` transactions.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request `page_size` transactions per page.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn resolve(mut self, default_page_size: u32) -> Self {
        self.page_size = Some(effective_page_size(
            self.limit,
            self.page_size,
            default_page_size,
        ));
        self
    }

    fn path(&self) -> String {
        match &self.account {
            Some(account) => format!("/accounts/{}/transactions", account),
            None => "/transactions".to_string(),
        }
    }
}

fn category_path(id: &TransactionId) -> String {
    format!("/transactions/{}/relationships/category", id)
}

fn tags_path(id: &TransactionId) -> String {
    format!("/transactions/{}/relationships/tags", id)
}

fn category_body(category: Option<&CategoryId>) -> Document<Option<ResourceIdentifier>> {
    Document {
        data: category.map(|category| ResourceIdentifier::new("categories", category.as_str())),
    }
}

fn tags_body(tags: &[TagId]) -> Document<Vec<ResourceIdentifier>> {
    Document {
        data: tags
            .iter()
            .map(|tag| ResourceIdentifier::new("tags", tag.as_str()))
            .collect(),
    }
}

impl<C> TransactionsService<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

impl TransactionsService<UpClient> {
    /// List transactions, newest first, lazily paginated.
    pub async fn list(
        &self,
        query: TransactionsQuery,
    ) -> Result<AsyncPaginatedList<Transaction, UpClient>> {
        let query = query.resolve(self.client.config().page_size);
        self.client.get_list(&query.path(), &query, query.limit).await
    }

    /// Get a specific transaction by ID.
    pub async fn get(&self, id: &TransactionId) -> Result<Transaction> {
        self.client.get_data(&format!("/transactions/{}", id)).await
    }

    /// Assign a category to a transaction, or remove it with `None`.
    pub async fn categorize(&self, id: &TransactionId, category: Option<&CategoryId>) -> Result<()> {
        self.client
            .patch(&category_path(id), &category_body(category))
            .await
    }

    /// Attach tags to a transaction.
    pub async fn add_tags(&self, id: &TransactionId, tags: &[TagId]) -> Result<()> {
        self.client.post(&tags_path(id), Some(&tags_body(tags))).await
    }

    /// Detach tags from a transaction.
    pub async fn remove_tags(&self, id: &TransactionId, tags: &[TagId]) -> Result<()> {
        self.client.delete(&tags_path(id), Some(&tags_body(tags))).await
    }
}

#[cfg(feature = "blocking")]
impl TransactionsService<blocking::UpClient> {
    /// List transactions, newest first, lazily paginated.
    pub fn list(
        &self,
        query: TransactionsQuery,
    ) -> Result<PaginatedList<Transaction, blocking::UpClient>> {
        let query = query.resolve(self.client.config().page_size);
        self.client.get_list(&query.path(), &query, query.limit)
    }

    /// Get a specific transaction by ID.
    pub fn get(&self, id: &TransactionId) -> Result<Transaction> {
        self.client.get_data(&format!("/transactions/{}", id))
    }

    /// Assign a category to a transaction, or remove it with `None`.
    pub fn categorize(&self, id: &TransactionId, category: Option<&CategoryId>) -> Result<()> {
        self.client.patch(&category_path(id), &category_body(category))
    }

    /// Attach tags to a transaction.
    pub fn add_tags(&self, id: &TransactionId, tags: &[TagId]) -> Result<()> {
        self.client.post(&tags_path(id), Some(&tags_body(tags)))
    }

    /// Detach tags from a transaction.
    pub fn remove_tags(&self, id: &TransactionId, tags: &[TagId]) -> Result<()> {
        self.client.delete(&tags_path(id), Some(&tags_body(tags)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_query_path() {
        assert_eq!(TransactionsQuery::default().path(), "/transactions");
        assert_eq!(
            TransactionsQuery::default().account("abc").path(),
            "/accounts/abc/transactions"
        );
    }

    #[test]
    fn test_query_serialization() {
        let since = Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap();
        let query = TransactionsQuery::default()
            .account("abc")
            .status(TransactionStatus::Settled)
            .since(since)
            .category("good-life")
            .tag("Holiday")
            .resolve(20);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({
                "filter[status]": "SETTLED",
                "filter[since]": "2022-03-01T00:00:00Z",
                "filter[category]": "good-life",
                "filter[tag]": "Holiday",
                "page[size]": 20
            })
        );
    }

    #[test]
    fn test_relationship_bodies() {
        let category = CategoryId::new("takeaway");
        assert_eq!(
            serde_json::to_value(category_body(Some(&category))).unwrap(),
            serde_json::json!({ "data": { "type": "categories", "id": "takeaway" } })
        );
        assert_eq!(
            serde_json::to_value(category_body(None)).unwrap(),
            serde_json::json!({ "data": null })
        );
        assert_eq!(
            serde_json::to_value(tags_body(&[TagId::new("Pizza Night")])).unwrap(),
            serde_json::json!({ "data": [{ "type": "tags", "id": "Pizza Night" }] })
        );
    }
}
