//! Enumeration types for the Up API.

use serde::{Deserialize, Serialize};

/// The bank account type of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// A savings account ("Saver")
    Saver,
    /// An everyday spending account
    Transactional,
    /// A home loan account
    HomeLoan,
}

/// The ownership structure of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    /// Owned by a single customer
    Individual,
    /// Owned jointly by two customers ("2Up")
    Joint,
}

/// The processing status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Authorised but not yet settled; the amount may still change
    Held,
    /// Settled and final
    Settled,
}

/// How a card purchase was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardPurchaseMethodKind {
    /// Scanned barcode
    BarCode,
    /// Optical character recognition
    Ocr,
    /// Card with PIN
    CardPin,
    /// Card details entered manually
    CardDetails,
    /// Card stored by the merchant
    CardOnFile,
    /// Online purchase
    Ecommerce,
    /// Magnetic stripe swipe
    MagneticStripe,
    /// Tap-and-go
    Contactless,
    /// A method this crate does not know yet
    #[serde(other)]
    Unknown,
}

/// The type of a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookEventType {
    /// Sent when a webhook is pinged manually
    Ping,
    /// A new transaction was created
    TransactionCreated,
    /// A held transaction settled
    TransactionSettled,
    /// A held transaction was deleted without settling
    TransactionDeleted,
    /// An event type this crate does not know yet
    #[serde(other)]
    Unknown,
}

impl WebhookEventType {
    /// Returns `true` if events of this type carry a transaction.
    pub fn has_transaction(&self) -> bool {
        matches!(
            self,
            WebhookEventType::TransactionCreated
                | WebhookEventType::TransactionSettled
                | WebhookEventType::TransactionDeleted
        )
    }
}

/// The outcome of one webhook delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookDeliveryStatus {
    /// The receiver answered with a 2xx status
    Delivered,
    /// The receiver could not be reached
    Undeliverable,
    /// The receiver answered with a non-2xx status
    BadResponseCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_wire_names() {
        assert_eq!(serde_json::to_string(&AccountType::HomeLoan).unwrap(), r#""HOME_LOAN""#);
        let parsed: AccountType = serde_json::from_str(r#""TRANSACTIONAL""#).unwrap();
        assert_eq!(parsed, AccountType::Transactional);
    }

    #[test]
    fn test_unknown_card_purchase_method() {
        let parsed: CardPurchaseMethodKind = serde_json::from_str(r#""HOLOGRAM""#).unwrap();
        assert_eq!(parsed, CardPurchaseMethodKind::Unknown);
    }

    #[test]
    fn test_webhook_event_type() {
        let parsed: WebhookEventType = serde_json::from_str(r#""TRANSACTION_SETTLED""#).unwrap();
        assert!(parsed.has_transaction());
        assert!(!WebhookEventType::Ping.has_transaction());
    }
}
