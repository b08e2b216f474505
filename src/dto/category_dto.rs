use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::trimmed;
use crate::model::category::Category;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        CategoryView {
            id: category.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: category.name,
        }
    }
}
