//! Category and tag models.

use serde::Deserialize;

use super::common::{Resource, ToMany, ToOne};
use crate::api::TransactionsQuery;
use super::primitives::{CategoryId, TagId};

/// A spending category, possibly nested under a parent category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Resource<CategoryAttributes, CategoryRelationships>")]
pub struct Category {
    /// URL-safe slug identifying the category
    pub id: CategoryId,
    /// Display name of the category
    pub name: String,
    /// The parent category, for child categories
    pub parent: Option<CategoryId>,
    /// Child categories, for parent categories
    pub children: Vec<CategoryId>,
}

impl Category {
    /// Returns `true` for top-level categories.
    pub fn is_parent(&self) -> bool {
        self.parent.is_none()
    }

    /// A query for the transactions in this category.
    pub fn transactions(&self) -> TransactionsQuery {
        TransactionsQuery::default().category(&self.id)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryAttributes {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryRelationships {
    parent: Option<ToOne>,
    children: Option<ToMany>,
}

impl From<Resource<CategoryAttributes, CategoryRelationships>> for Category {
    fn from(resource: Resource<CategoryAttributes, CategoryRelationships>) -> Self {
        let relationships = resource.relationships;
        Self {
            id: CategoryId::new(resource.id),
            name: resource.attributes.name,
            parent: relationships.parent.and_then(ToOne::id).map(CategoryId::new),
            children: relationships
                .children
                .map(|children| children.ids().map(CategoryId::new).collect())
                .unwrap_or_default(),
        }
    }
}

/// A label attached to transactions.
///
/// Tags carry no attributes; the label is the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Tag {
    /// The label of the tag
    pub id: TagId,
}

impl Tag {
    /// A query for the transactions carrying this tag.
    pub fn transactions(&self) -> TransactionsQuery {
        TransactionsQuery::default().tag(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_child_category() {
        let json = r#"{
            "type": "categories",
            "id": "restaurants-and-cafes",
            "attributes": { "name": "Restaurants & Cafes" },
            "relationships": {
                "parent": { "data": { "type": "categories", "id": "good-life" } },
                "children": { "data": [] }
            }
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Restaurants & Cafes");
        assert_eq!(category.parent, Some(CategoryId::new("good-life")));
        assert!(category.children.is_empty());
        assert!(!category.is_parent());
    }

    #[test]
    fn test_deserialize_parent_category() {
        let json = r#"{
            "type": "categories",
            "id": "good-life",
            "attributes": { "name": "Good Life" },
            "relationships": {
                "parent": { "data": null },
                "children": {
                    "data": [
                        { "type": "categories", "id": "booze" },
                        { "type": "categories", "id": "restaurants-and-cafes" }
                    ]
                }
            }
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert!(category.is_parent());
        assert_eq!(category.transactions().category, Some(CategoryId::new("good-life")));
        assert_eq!(
            category.children,
            vec![CategoryId::new("booze"), CategoryId::new("restaurants-and-cafes")]
        );
    }

    #[test]
    fn test_deserialize_tag() {
        let json = r#"{
            "type": "tags",
            "id": "Holiday",
            "relationships": { "transactions": { "links": { "related": "https://api.up.com.au/api/v1/transactions?filter%5Btag%5D=Holiday" } } }
        }"#;

        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.id, TagId::new("Holiday"));

        let query = tag.transactions().limit(10);
        assert_eq!(query.tag, Some(TagId::new("Holiday")));
        assert!(query.account.is_none());
    }
}
