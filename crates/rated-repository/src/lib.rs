//! # Rated Repository
//!
//! Data access for the Rated backend:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ReviewRepository>     (store interface)
//! MySqlReviewRepository              (SQLx implementation)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```
//!
//! Ids are stored as `CHAR(36)`, star ratings as `DECIMAL(2,1)`. Schema
//! migrations live in the workspace `migrations/` directory and are embedded
//! at compile time.

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
