//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `review_service.rs`).

mod category_service_impl;
mod review_service_impl;
mod workplace_service_impl;

pub use category_service_impl::CategoryServiceImpl;
pub use review_service_impl::ReviewServiceImpl;
pub use workplace_service_impl::WorkplaceServiceImpl;
