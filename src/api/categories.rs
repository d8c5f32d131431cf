//! Categories service.

use serde::Serialize;

#[cfg(feature = "blocking")]
use crate::client::blocking;
use crate::client::UpClient;
use crate::models::{Category, CategoryId, Document};
use crate::Result;

/// Service for category operations.
///
/// Categories are a fixed tree maintained by Up and are not paginated.
///
/// # Example
///
/// ```no_run
/// use up_bank::models::CategoryId;
///
/// # async fn example(client: up_bank::UpClient) -> up_bank::Result<()> {
/// let good_life = CategoryId::new("good-life");
/// for category in client.categories().list(Some(&good_life)).await? {
///     println!("{} ({})", category.name, category.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CategoriesService<C> {
    client: C,
}

#[derive(Debug, Serialize)]
struct CategoriesQuery<'a> {
    #[serde(rename = "filter[parent]", skip_serializing_if = "Option::is_none")]
    parent: Option<&'a CategoryId>,
}

impl<C> CategoriesService<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

impl CategoriesService<UpClient> {
    /// List all categories, or only the children of `parent`.
    pub async fn list(&self, parent: Option<&CategoryId>) -> Result<Vec<Category>> {
        let document: Document<Vec<Category>> = self
            .client
            .get_with_query("/categories", &CategoriesQuery { parent })
            .await?;
        Ok(document.data)
    }

    /// Get a specific category by ID.
    pub async fn get(&self, id: &CategoryId) -> Result<Category> {
        self.client.get_data(&format!("/categories/{}", id)).await
    }
}

#[cfg(feature = "blocking")]
impl CategoriesService<blocking::UpClient> {
    /// List all categories, or only the children of `parent`.
    pub fn list(&self, parent: Option<&CategoryId>) -> Result<Vec<Category>> {
        let document: Document<Vec<Category>> = self
            .client
            .get_with_query("/categories", &CategoriesQuery { parent })?;
        Ok(document.data)
    }

    /// Get a specific category by ID.
    pub fn get(&self, id: &CategoryId) -> Result<Category> {
        self.client.get_data(&format!("/categories/{}", id))
    }
}
