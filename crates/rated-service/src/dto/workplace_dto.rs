//! Workplace-related DTOs.

use super::CategoryResponse;
use chrono::{DateTime, Utc};
use rated_core::{validation::rules, StarRating, Workplace, WorkplaceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Star histogram: bucket `"1"`..`"5"` to a whole-number percentage string.
pub type StarPercentages = BTreeMap<String, String>;

/// Request to register a new workplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateWorkplaceRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Name cannot be blank")
    )]
    pub name: String,

    #[validate(length(max = 50, message = "VAT number must be at most 50 characters"))]
    pub vat: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
}

impl CreateWorkplaceRequest {
    /// Builds the workplace, trimming text and dropping blank optional fields.
    #[must_use]
    pub fn into_workplace(self) -> Workplace {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let mut workplace = Workplace::new(
            self.name.trim().to_string(),
            present(self.vat),
            present(self.website),
        );
        workplace.address = present(self.address);
        workplace
    }
}

/// Full workplace view with its cached aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkplaceResponse {
    pub id: WorkplaceId,
    pub name: String,
    pub vat: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub stars: StarRating,
    pub amount_of_reviews: u64,
    pub categories: Vec<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkplaceResponse {
    /// Builds the response from a workplace and its aggregates.
    #[must_use]
    pub fn new(workplace: Workplace, stars: StarRating, amount_of_reviews: u64) -> Self {
        Self {
            id: workplace.id,
            name: workplace.name,
            vat: workplace.vat,
            website: workplace.website,
            address: workplace.address,
            stars,
            amount_of_reviews,
            categories: workplace.categories.into_iter().map(CategoryResponse::from).collect(),
            created_at: workplace.created_at,
            updated_at: workplace.updated_at,
        }
    }
}

/// Compact workplace view used in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkplaceSummary {
    pub id: WorkplaceId,
    pub name: String,
    pub website: Option<String>,
    pub stars: StarRating,
    pub amount_of_reviews: u64,
    pub categories: Vec<CategoryResponse>,
}

impl WorkplaceSummary {
    /// Builds the summary from a workplace and its aggregates.
    #[must_use]
    pub fn new(workplace: Workplace, stars: StarRating, amount_of_reviews: u64) -> Self {
        Self {
            id: workplace.id,
            name: workplace.name,
            website: workplace.website,
            stars,
            amount_of_reviews,
            categories: workplace.categories.into_iter().map(CategoryResponse::from).collect(),
        }
    }
}

/// Every rating aggregate of one workplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub workplace_id: WorkplaceId,
    pub stars: StarRating,
    pub amount_of_reviews: u64,
    pub star_percentages: StarPercentages,
}
