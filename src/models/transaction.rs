//! Transaction models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::common::{MoneyObject, Resource, ToMany, ToOne};
use super::enums::{CardPurchaseMethodKind, TransactionStatus};
use super::primitives::{AccountId, CategoryId, TagId, TransactionId};

/// A movement of money into or out of an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Resource<TransactionAttributes, TransactionRelationships>")]
pub struct Transaction {
    /// Unique transaction id
    pub id: TransactionId,
    /// Held or settled
    pub status: TransactionStatus,
    /// The original, unprocessed text of the transaction
    pub raw_text: Option<String>,
    /// Short description, usually the merchant name
    pub description: String,
    /// Attached message, such as a payment note
    pub message: Option<String>,
    /// Whether categories can be assigned to this transaction
    pub is_categorizable: bool,
    /// Amount while the transaction was held
    pub hold_info: Option<HoldInfo>,
    /// Details of the round up applied, if any
    pub round_up: Option<RoundUp>,
    /// Instant cashback reimbursed for this transaction, if any
    pub cashback: Option<Cashback>,
    /// The amount in Australian dollars
    pub amount: MoneyObject,
    /// The amount in the foreign currency, for foreign transactions
    pub foreign_amount: Option<MoneyObject>,
    /// The card used for the purchase, if any
    pub card_purchase_method: Option<CardPurchaseMethod>,
    /// When the transaction settled; `None` while held
    pub settled_at: Option<DateTime<Utc>>,
    /// When the transaction was first seen
    pub created_at: DateTime<Utc>,
    /// The account the transaction belongs to
    pub account_id: AccountId,
    /// The other account of an internal transfer
    pub transfer_account_id: Option<AccountId>,
    /// The assigned category
    pub category_id: Option<CategoryId>,
    /// The parent of the assigned category
    pub parent_category_id: Option<CategoryId>,
    /// Tags attached to the transaction
    pub tags: Vec<TagId>,
}

impl Transaction {
    /// Returns `true` while the transaction has not settled.
    pub fn is_pending(&self) -> bool {
        self.status != TransactionStatus::Settled
    }

    /// The description followed by the message, when there is one.
    pub fn long_description(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => format!("{}: {}", self.description, message),
            _ => self.description.clone(),
        }
    }
}

/// Amounts of a transaction while it was held.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldInfo {
    /// The held amount in Australian dollars
    pub amount: MoneyObject,
    /// The held amount in the foreign currency, for foreign transactions
    pub foreign_amount: Option<MoneyObject>,
}

/// How a transaction was rounded up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundUp {
    /// Total round up including boosts, as a negative value
    pub amount: MoneyObject,
    /// The boosted portion, if a boost was added
    pub boost_portion: Option<MoneyObject>,
}

/// Cashback paid for a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashback {
    /// Why the cashback was paid
    pub description: String,
    /// The cashback amount, as a positive value
    pub amount: MoneyObject,
}

/// The card used for a purchase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPurchaseMethod {
    /// The kind of card purchase
    pub method: CardPurchaseMethodKind,
    /// Last four digits of the card, if applicable
    pub card_number_suffix: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionAttributes {
    status: TransactionStatus,
    raw_text: Option<String>,
    description: String,
    message: Option<String>,
    is_categorizable: bool,
    hold_info: Option<HoldInfo>,
    round_up: Option<RoundUp>,
    cashback: Option<Cashback>,
    amount: MoneyObject,
    foreign_amount: Option<MoneyObject>,
    #[serde(default)]
    card_purchase_method: Option<CardPurchaseMethod>,
    settled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRelationships {
    account: ToOne,
    transfer_account: Option<ToOne>,
    category: Option<ToOne>,
    parent_category: Option<ToOne>,
    tags: Option<ToMany>,
}

impl From<Resource<TransactionAttributes, TransactionRelationships>> for Transaction {
    fn from(resource: Resource<TransactionAttributes, TransactionRelationships>) -> Self {
        let attributes = resource.attributes;
        let relationships = resource.relationships;
        Self {
            id: TransactionId::new(resource.id),
            status: attributes.status,
            raw_text: attributes.raw_text,
            description: attributes.description,
            message: attributes.message,
            is_categorizable: attributes.is_categorizable,
            hold_info: attributes.hold_info,
            round_up: attributes.round_up,
            cashback: attributes.cashback,
            amount: attributes.amount,
            foreign_amount: attributes.foreign_amount,
            card_purchase_method: attributes.card_purchase_method,
            settled_at: attributes.settled_at,
            created_at: attributes.created_at,
            account_id: AccountId::new(relationships.account.id().unwrap_or_default()),
            transfer_account_id: relationships
                .transfer_account
                .and_then(ToOne::id)
                .map(AccountId::new),
            category_id: relationships.category.and_then(ToOne::id).map(CategoryId::new),
            parent_category_id: relationships
                .parent_category
                .and_then(ToOne::id)
                .map(CategoryId::new),
            tags: relationships
                .tags
                .map(|tags| tags.ids().map(TagId::new).collect())
                .unwrap_or_default(),
        }
    }
}
