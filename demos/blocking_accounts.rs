//! Blocking client example.
//!
//! Prints every account with its balance and latest transaction, without an
//! async runtime.
//!
//! Run with: UP_TOKEN=up:yeah:... cargo run --example blocking_accounts

use up_bank::api::{AccountsQuery, TransactionsQuery};
use up_bank::blocking::UpClient;

fn main() -> up_bank::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = UpClient::from_env()?;

    let mut accounts = client.accounts().list(AccountsQuery::default())?;
    for account in accounts.iter() {
        let account = account?;
        println!("{} ({:?}): {}", account.display_name, account.account_type, account.balance);

        let mut latest = client
            .transactions()
            .list(TransactionsQuery::default().account(&account.id).limit(1))?;
        match latest.get(0) {
            Ok(transaction) => println!("    latest: {}", transaction.long_description()),
            Err(up_bank::Error::IndexOutOfRange { .. }) => println!("    no transactions"),
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
