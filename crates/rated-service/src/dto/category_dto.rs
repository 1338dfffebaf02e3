//! Category-related DTOs.

use rated_core::{validation::rules, Category, CategoryId, TopCategory, TopCategoryId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request carrying a category or top category name.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryNameRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Name cannot be blank")
    )]
    pub name: String,
}

impl CategoryNameRequest {
    /// Creates a request for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Category response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// Top category with its member categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategoryResponse {
    pub id: TopCategoryId,
    pub name: String,
    pub categories: Vec<CategoryResponse>,
}

impl TopCategoryResponse {
    /// Builds the response, keeping only the listed categories that belong to `top`.
    #[must_use]
    pub fn new(top: TopCategory, categories: &[Category]) -> Self {
        Self {
            id: top.id,
            name: top.name,
            categories: categories
                .iter()
                .filter(|category| top.category_ids.contains(&category.id))
                .map(CategoryResponse::from)
                .collect(),
        }
    }
}
