//! # Recall Repository
//!
//! Durable store for categories and flashcards.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CategoryRepository> / Arc<dyn FlashcardRepository>
//! MySqlCategoryRepository / MySqlFlashcardRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
