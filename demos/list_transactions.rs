//! Lazy pagination example.
//!
//! Lists the most recent transactions across all accounts, fetching pages
//! only as far as needed, then shows random access and stepped slices.
//!
//! Run with: UP_TOKEN=up:yeah:... cargo run --example list_transactions

use futures_util::TryStreamExt;
use up_bank::api::TransactionsQuery;
use up_bank::UpClient;

#[tokio::main]
async fn main() -> up_bank::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = UpClient::from_env()?;
    println!("Authenticated as {}", client.ping().await?);

    // Small pages so the lazy fetching is visible with RUST_LOG=up_bank=debug
    let mut transactions = client
        .transactions()
        .list(TransactionsQuery::default().limit(30).page_size(10))
        .await?;
    println!("First page holds {} transaction(s)", transactions.len());

    // Fetches the second page
    if let Ok(transaction) = transactions.get(15).await {
        println!("16th most recent: {}", transaction.long_description());
    }

    // Every fifth transaction, fetching the third page on the way
    let sampled: Vec<_> = transactions.slice(..).step(5).into_stream().try_collect().await?;
    for transaction in &sampled {
        println!(
            "  {} {:>12} {}",
            transaction.created_at.format("%Y-%m-%d"),
            transaction.amount.to_string(),
            transaction.description
        );
    }

    println!("\nFetched {} of at most 30 transaction(s)", transactions.len());
    Ok(())
}
