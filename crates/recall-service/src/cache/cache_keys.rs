//! Cache key generators for consistent key naming.

use recall_core::{CategoryId, UserId};

const CATEGORY_PREFIX: &str = "category";
const FLASHCARD_PREFIX: &str = "flashcard";

/// Hash holding every category of a user.
#[must_use]
pub fn categories(user_id: &UserId) -> String {
    format!("{CATEGORY_PREFIX}:{user_id}")
}

/// Hash holding the flashcards of one category of a user.
#[must_use]
pub fn flashcards(user_id: &UserId, category_id: CategoryId) -> String {
    format!("{FLASHCARD_PREFIX}:{user_id}:{category_id}")
}
