//! HTTP clients and the pagination engine for the Up API.
//!
//! This module provides the main entry point [`UpClient`] (async), its
//! blocking twin [`blocking::UpClient`] (behind the default `blocking`
//! feature), and the lazily paginated lists both return from listing calls.
//!
//! # Example
//!
//! ```no_run
//! use up_bank::UpClient;
//!
//! # async fn example() -> up_bank::Result<()> {
//! let client = UpClient::new("up:yeah:your-personal-access-token")?;
//!
//! let accounts = client.accounts().list(Default::default()).await?;
//! println!("{} account(s) on the first page", accounts.len());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "blocking")]
pub mod blocking;
mod config;
mod http;
pub mod paginated;
pub mod transport;

pub use config::{ClientConfig, BASE_URL, DEFAULT_PAGE_SIZE, TOKEN_ENV_VAR};
pub use http::UpClient;
pub use paginated::{AsyncPaginatedList, AsyncSlice, PaginatedList, Slice};
pub use transport::{AsyncTransport, Factory, RawPage, Transport};
