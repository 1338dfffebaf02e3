//! # Rated REST
//!
//! Read-only REST API layer using Axum for the Rated backend.
//! Serves workplace lookups with their cached ratings, review listings,
//! the category listing and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
