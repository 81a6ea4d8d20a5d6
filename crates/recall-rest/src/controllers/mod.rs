//! REST API controllers.

pub mod category_controller;
pub mod flashcard_controller;
pub mod health_controller;

pub use health_controller::*;
