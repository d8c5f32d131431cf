//! Accounts service.

use serde::Serialize;

#[cfg(feature = "blocking")]
use crate::client::{blocking, PaginatedList};
use crate::client::{AsyncPaginatedList, UpClient};
use crate::models::{Account, AccountId, AccountType, OwnershipType};
use crate::Result;

use super::effective_page_size;

/// Service for account operations.
///
/// # Example
///
/// ```no_run
/// use up_bank::api::AccountsQuery;
/// use up_bank::models::AccountType;
///
/// # async fn example(client: up_bank::UpClient) -> up_bank::Result<()> {
/// let mut savers = client
///     .accounts()
///     .list(AccountsQuery::default().account_type(AccountType::Saver))
///     .await?;
///
/// for account in savers.fetch_all().await? {
///     println!("{}: {}", account.display_name, account.balance);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AccountsService<C> {
    client: C,
}

/// Filters and pagination for listing accounts.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AccountsQuery {
    /// Only return accounts of this type
    #[serde(rename = "filter[accountType]", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    /// Only return accounts with this ownership structure
    #[serde(rename = "filter[ownershipType]", skip_serializing_if = "Option::is_none")]
    pub ownership_type: Option<OwnershipType>,
    /// Maximum number of accounts the list will ever hold
    #[serde(skip)]
    pub limit: Option<usize>,
    /// Accounts per page
    #[serde(rename = "page[size]", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl AccountsQuery {
    /// Only return accounts of this type.
    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    /// Only return accounts with this ownership structure.
    pub fn ownership_type(mut self, ownership_type: OwnershipType) -> Self {
        self.ownership_type = Some(ownership_type);
        self
    }

    /// Stop after `limit` accounts.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request `page_size` accounts per page.
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
}

impl<C> AccountsService<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

impl AccountsService<UpClient> {
    /// List accounts, lazily paginated.
    pub async fn list(&self, query: AccountsQuery) -> Result<AsyncPaginatedList<Account, UpClient>> {
        let query = query.resolve(self.client.config().page_size);
        self.client.get_list("/accounts", &query, query.limit).await
    }

    /// Get a specific account by ID.
    pub async fn get(&self, id: &AccountId) -> Result<Account> {
        self.client.get_data(&format!("/accounts/{}", id)).await
    }
}

#[cfg(feature = "blocking")]
impl AccountsService<blocking::UpClient> {
    /// List accounts, lazily paginated.
    pub fn list(
        &self,
        query: AccountsQuery,
    ) -> Result<PaginatedList<Account, blocking::UpClient>> {
        let query = query.resolve(self.client.config().page_size);
        self.client.get_list("/accounts", &query, query.limit)
    }

    /// Get a specific account by ID.
    pub fn get(&self, id: &AccountId) -> Result<Account> {
        self.client.get_data(&format!("/accounts/{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serialization() {
        let query = AccountsQuery::default()
            .account_type(AccountType::Saver)
            .ownership_type(OwnershipType::Joint)
            .limit(2)
            .resolve(20);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({
                "filter[accountType]": "SAVER",
                "filter[ownershipType]": "JOINT",
                "page[size]": 2
            })
        );
    }
}
