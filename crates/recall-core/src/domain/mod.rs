//! Domain entities.

mod category;
mod flashcard;

pub use category::*;
pub use flashcard::*;
