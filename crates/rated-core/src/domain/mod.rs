//! Domain entities and value objects.

mod category;
mod review;
mod stars;
mod workplace;

pub use category::*;
pub use review::*;
pub use stars::*;
pub use workplace::*;
