//! # up-bank-rs
//!
//! A typed Rust client for the [Up](https://up.com.au) banking API.
//!
//! Collection endpoints return lazily paginated lists: a listing call fetches
//! the first page, and further pages are fetched only when an access needs
//! them. Lists can be capped with a `limit`, indexed, sliced with a step, and
//! iterated (or streamed, for the async client) from the start at any time.
//!
//! ## Features
//!
//! - **Async client**: [`UpClient`] on `reqwest` and any async runtime
//! - **Blocking client**: [`blocking::UpClient`] behind the default `blocking` feature
//! - **Lazy pagination**: [`AsyncPaginatedList`] and [`PaginatedList`]
//! - **Type Safety**: Typed identifiers, decimal money amounts, UTC timestamps
//! - **Webhooks**: Create, ping and inspect delivery logs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use up_bank::UpClient;
//! use up_bank::api::TransactionsQuery;
//!
//! #[tokio::main]
//! async fn main() -> up_bank::Result<()> {
//!     // Reads the personal access token from UP_TOKEN
//!     let client = UpClient::from_env()?;
//!     println!("Authenticated as {}", client.ping().await?);
//!
//!     // Only the pages needed for the first 5 transactions are fetched
//!     let mut transactions = client
//!         .transactions()
//!         .list(TransactionsQuery::default().limit(5))
//!         .await?;
//!
//!     for transaction in transactions.fetch_all().await? {
//!         println!("{}: {}", transaction.long_description(), transaction.amount);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Blocking Example
//!
//! ```rust,no_run
//! use up_bank::blocking::UpClient;
//!
//! fn main() -> up_bank::Result<()> {
//!     let client = UpClient::from_env()?;
//!
//!     let mut accounts = client.accounts().list(Default::default())?;
//!
//!     // Every third account, fetching pages as the slice advances
//!     for account in accounts.slice(..).step(3) {
//!         println!("{}", account?.display_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AccountId, CategoryId, TagId, TransactionId, WebhookId};
pub use client::{AsyncPaginatedList, ClientConfig, PaginatedList, UpClient};

#[cfg(feature = "blocking")]
pub use client::blocking;

/// Prelude module for convenient imports.
///
/// ```rust
/// use up_bank::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{AccountsQuery, ListOptions, TransactionsQuery};
    pub use crate::client::{AsyncPaginatedList, ClientConfig, PaginatedList, UpClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Identifiers
        AccountId, CategoryId, TagId, TransactionId, WebhookId,
        // Enums
        AccountType, OwnershipType, TransactionStatus, WebhookEventType,
        // Models
        Account, Category, MoneyObject, Tag, Transaction, Webhook, WebhookEvent, WebhookLog,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let account = AccountId::new("7b3121f9-40f3-4230-bdd7-6709e68426fb");
        assert_eq!(account.as_str(), "7b3121f9-40f3-4230-bdd7-6709e68426fb");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.up.com.au/api/v1");
        assert_eq!(config.page_size, 20);
    }
}
