//! Strongly-typed resource identifiers.
//!
//! Wrapping the string ids of the API in distinct types prevents passing a
//! tag where a category is expected, at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }
    };
}

resource_id!(
    /// The unique identifier of an account.
    ///
    /// # Example
    ///
    /// ```
    /// use up_bank::AccountId;
    ///
    /// let account = AccountId::new("7b3121f9-40f3-4230-bdd7-6709e68426fb");
    /// println!("Account: {}", account);
    /// ```
    AccountId
);

resource_id!(
    /// The unique identifier of a transaction.
    TransactionId
);

resource_id!(
    /// The identifier of a category, a human-readable but URL-safe slug
    /// such as `"restaurants-and-cafes"`.
    CategoryId
);

resource_id!(
    /// The label of a tag, which doubles as its identifier.
    TagId
);

resource_id!(
    /// The unique identifier of a webhook.
    WebhookId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id() {
        let account = AccountId::new("7b3121f9");
        assert_eq!(account.as_str(), "7b3121f9");
        assert_eq!(account.to_string(), "7b3121f9");
    }

    #[test]
    fn test_tag_id_from_str() {
        let tag: TagId = "Pizza Night".into();
        assert_eq!(tag.as_str(), "Pizza Night");
        assert_eq!(serde_json::to_string(&tag).unwrap(), r#""Pizza Night""#);
    }
}
