//! Review-related DTOs.

use chrono::{DateTime, Utc};
use rated_core::{validation::rules, Review, ReviewId, Stars, UserId, WorkplaceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to submit a review of a workplace.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    #[validate(custom(function = "rules::valid_stars", message = "Stars must be between 0 and 5 with at most one decimal"))]
    pub stars: Decimal,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Title cannot be blank")
    )]
    pub title: String,

    #[validate(custom(function = "rules::not_blank", message = "Comment cannot be blank"))]
    pub comment: String,
}

/// Author edit of an existing review. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(custom(function = "rules::valid_stars", message = "Stars must be between 0 and 5 with at most one decimal"))]
    pub stars: Option<Decimal>,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "rules::not_blank", message = "Title cannot be blank")
    )]
    pub title: Option<String>,

    #[validate(custom(function = "rules::not_blank", message = "Comment cannot be blank"))]
    pub comment: Option<String>,
}

/// Review response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub workplace_id: WorkplaceId,
    pub author_id: UserId,
    pub stars: Stars,
    pub title: String,
    pub comment: String,
    pub verified_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            workplace_id: review.workplace_id,
            author_id: review.author_id,
            stars: review.stars,
            title: review.title,
            comment: review.comment,
            verified_by: review.verified_by,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rated_core::ValidateExt;
    use std::str::FromStr;

    fn submit(stars: &str, title: &str) -> SubmitReviewRequest {
        SubmitReviewRequest {
            stars: Decimal::from_str(stars).unwrap(),
            title: title.to_string(),
            comment: "Great mentors".to_string(),
        }
    }

    #[test]
    fn test_submit_request_validation() {
        assert!(submit("4.5", "Solid").validate_request().is_ok());
        assert!(submit("5.5", "Too many").validate_request().is_err());
        assert!(submit("-1", "Negative").validate_request().is_err());
        assert!(submit("3", "   ").validate_request().is_err());
        assert!(submit("3", &"x".repeat(256)).validate_request().is_err());
    }

    #[test]
    fn test_update_request_allows_empty() {
        assert!(UpdateReviewRequest::default().validate_request().is_ok());
        let bad = UpdateReviewRequest {
            stars: Some(Decimal::from(6)),
            ..Default::default()
        };
        assert!(bad.validate_request().is_err());
    }

    #[test]
    fn test_response_serializes_stars_as_decimal_string() {
        let review = Review::new(
            WorkplaceId::new(),
            UserId::new(),
            Stars::whole(4).unwrap(),
            "Title".to_string(),
            "Comment".to_string(),
        );
        let json = serde_json::to_value(ReviewResponse::from(review)).unwrap();
        assert_eq!(json["stars"], "4.0");
        assert!(json["verified_by"].is_null());
    }
}
