//! REST API controllers.

pub mod category_controller;
pub mod health_controller;
pub mod workplace_controller;

pub use health_controller::*;
