//! Data Transfer Objects (DTOs).

mod category_dto;
mod review_dto;
mod workplace_dto;

pub use category_dto::*;
pub use review_dto::*;
pub use workplace_dto::*;
