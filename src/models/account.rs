//! Account models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{MoneyObject, Resource};
use super::enums::{AccountType, OwnershipType};
use super::primitives::AccountId;
use crate::api::TransactionsQuery;

/// A bank account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Resource<AccountAttributes>")]
pub struct Account {
    /// Unique account id
    pub id: AccountId,
    /// Name shown for the account in the Up app
    pub display_name: String,
    /// Saver, transactional or home loan
    pub account_type: AccountType,
    /// Individual or joint ownership
    pub ownership_type: OwnershipType,
    /// Available balance, net of amounts on hold
    pub balance: MoneyObject,
    /// When the account was opened
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountAttributes {
    display_name: String,
    account_type: AccountType,
    ownership_type: OwnershipType,
    balance: MoneyObject,
    created_at: DateTime<Utc>,
}

impl Account {
    /// A query for the transactions of this account.
    ///
    /// ```no_run
    /// # async fn example(client: up_bank::UpClient, account: up_bank::models::Account) -> up_bank::Result<()> {
    /// let mut recent = client.transactions().list(account.transactions().limit(5)).await?;
    /// println!("{}", recent.get(0).await?.description);
    /// # Ok(())
    /// # }
    /// ```
    pub fn transactions(&self) -> TransactionsQuery {
        TransactionsQuery::default().account(&self.id)
    }
}

impl From<Resource<AccountAttributes>> for Account {
    fn from(resource: Resource<AccountAttributes>) -> Self {
        let attributes = resource.attributes;
        Self {
            id: AccountId::new(resource.id),
            display_name: attributes.display_name,
            account_type: attributes.account_type,
            ownership_type: attributes.ownership_type,
            balance: attributes.balance,
            created_at: attributes.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "type": "accounts",
            "id": "7b3121f9-40f3-4230-bdd7-6709e68426fb",
            "attributes": {
                "displayName": "Spending",
                "accountType": "TRANSACTIONAL",
                "ownershipType": "INDIVIDUAL",
                "balance": {
                    "currencyCode": "AUD",
                    "value": "1.00",
                    "valueInBaseUnits": 100
                },
                "createdAt": "2022-03-22T10:12:05+11:00"
            },
            "relationships": {
                "transactions": {
                    "links": {
                        "related": "https://api.up.com.au/api/v1/accounts/7b3121f9-40f3-4230-bdd7-6709e68426fb/transactions"
                    }
                }
            },
            "links": {
                "self": "https://api.up.com.au/api/v1/accounts/7b3121f9-40f3-4230-bdd7-6709e68426fb"
            }
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id.as_str(), "7b3121f9-40f3-4230-bdd7-6709e68426fb");
        assert_eq!(account.display_name, "Spending");
        assert_eq!(account.account_type, AccountType::Transactional);
        assert_eq!(account.balance.value, dec!(1.00));
        assert_eq!(account.created_at.to_rfc3339(), "2022-03-21T23:12:05+00:00");
        assert_eq!(account.transactions().account, Some(account.id.clone()));
    }
}
