//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `category_service.rs`).

pub mod category_service_impl;
pub mod flashcard_service_impl;

pub use category_service_impl::{CategoryServiceImpl, CategoryServiceImplParameters};
pub use flashcard_service_impl::{FlashcardServiceImpl, FlashcardServiceImplParameters};
