//! Custom Axum extractors.

mod pagination;

pub use pagination::*;
