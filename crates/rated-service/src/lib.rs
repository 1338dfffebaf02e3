//! # Rated Service
//!
//! Business services for the Rated backend:
//!
//! - [`rating`]: cached workplace aggregates (average stars, review count,
//!   star histogram, first review page)
//! - [`invalidation`]: evicts those aggregates ahead of review and category
//!   writes
//! - review, workplace and category services built on both
//!
//! Writes follow snapshot, invalidate, commit. Reads go through the cache
//! and fall back to the store on a miss or a cache outage.

pub mod cache;
pub mod category_service;
pub mod dto;
pub mod r#impl;
pub mod invalidation;
pub mod rating;
pub mod review_service;
pub mod workplace_service;

#[cfg(test)]
mod test_support;

pub use cache::*;
pub use category_service::*;
pub use dto::*;
pub use invalidation::*;
pub use r#impl::*;
pub use rating::*;
pub use review_service::*;
pub use workplace_service::*;
