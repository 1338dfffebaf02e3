//! Workplace rating aggregation.
//!
//! [`metrics`] holds the pure aggregate computations; [`WorkplaceRatingService`]
//! serves them through the cache.

pub mod metrics;
mod rating_service;

pub use rating_service::{WorkplaceRatingService, WorkplaceRatingServiceImpl};
