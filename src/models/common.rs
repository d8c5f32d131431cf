//! JSON:API envelopes and value types shared by all resources.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyObject {
    /// The ISO 4217 currency code
    pub currency_code: String,
    /// The amount, e.g. `-11.95`
    pub value: Decimal,
    /// The amount in the smallest denomination of the currency, e.g. `-1195`
    pub value_in_base_units: i64,
}

impl MoneyObject {
    /// Returns `true` if money left the account.
    pub fn is_debit(&self) -> bool {
        self.value_in_base_units < 0
    }
}

impl fmt::Display for MoneyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency_code)
    }
}

/// A top-level JSON:API document holding a single primary resource.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Document<T> {
    pub data: T,
}

/// A JSON:API resource object.
#[derive(Debug, Deserialize)]
pub(crate) struct Resource<A, R = NoRelationships> {
    pub id: String,
    pub attributes: A,
    #[serde(default)]
    pub relationships: R,
}

/// Relationships a model does not read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NoRelationships {}

/// A JSON:API relationship object; `D` is an optional identifier or a list.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Relationship<D> {
    pub data: D,
}

/// A JSON:API resource identifier (`{"type": ..., "id": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub(crate) fn new(kind: &str, id: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.into(),
        }
    }
}

pub(crate) type ToOne = Relationship<Option<ResourceIdentifier>>;
pub(crate) type ToMany = Relationship<Vec<ResourceIdentifier>>;

impl ToOne {
    pub(crate) fn id(self) -> Option<String> {
        self.data.map(|identifier| identifier.id)
    }
}

impl ToMany {
    pub(crate) fn ids(self) -> impl Iterator<Item = String> {
        self.data.into_iter().map(|identifier| identifier.id)
    }
}

/// Response of `GET /util/ping`.
#[derive(Debug, Deserialize)]
pub(crate) struct PingResponse {
    pub meta: PingMeta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PingMeta {
    pub id: String,
}
