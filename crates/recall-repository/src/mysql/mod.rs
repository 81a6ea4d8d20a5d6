//! MySQL repository implementations.

mod category_repository;
mod flashcard_repository;

pub use category_repository::*;
pub use flashcard_repository::*;
